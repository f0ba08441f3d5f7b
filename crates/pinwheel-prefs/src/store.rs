use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use pinwheel_core::PreferenceRecord;

use crate::bus::{PreferenceChangeBus, PreferenceChanged};
use crate::drain::LockDrainWorker;
use crate::kv::KeyValueStore;
use crate::lock_table::SeedStats;
use crate::LockTable;

/// Durable per-package preferences, publishing a change event whenever a
/// write alters the package's lock fields.
pub struct PreferenceStore {
    backend: Box<dyn KeyValueStore>,
    bus: PreferenceChangeBus,
    writes: Mutex<()>,
    initialized: AtomicBool,
}

impl PreferenceStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            bus: PreferenceChangeBus::new(),
            writes: Mutex::new(()),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn bus(&self) -> &PreferenceChangeBus {
        &self.bus
    }

    pub fn subscribe(&self) -> flume::Receiver<PreferenceChanged> {
        self.bus.subscribe()
    }

    /// Never fails: unreadable or malformed records yield the default.
    pub fn get(&self, package_name: &str) -> PreferenceRecord {
        let bytes = match self.backend.get(package_name) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return PreferenceRecord::default(),
            Err(err) => {
                tracing::warn!(
                    package = %package_name,
                    error = %format!("{err:#}"),
                    "failed to read preference; using defaults"
                );
                return PreferenceRecord::default();
            }
        };

        match PreferenceRecord::from_json(&bytes) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(
                    package = %package_name,
                    error = %format!("{err:#}"),
                    "malformed preference payload; using defaults"
                );
                PreferenceRecord::default()
            }
        }
    }

    /// Persists `record`, then publishes a change if the lock fields moved.
    /// A failed write publishes nothing.
    pub fn set(&self, package_name: &str, record: PreferenceRecord) -> Result<()> {
        let _guard = self.writes.lock();
        let previous = self.get(package_name);

        let payload = record
            .to_json()
            .with_context(|| format!("failed to serialize preference for '{package_name}'"))?;
        self.backend
            .set(package_name, &payload)
            .with_context(|| format!("failed to persist preference for '{package_name}'"))?;

        if previous.lock_differs(&record) {
            let event = PreferenceChanged {
                package_name: package_name.to_string(),
                lock_version: record.lock_version(),
            };
            let delivered = self.bus.publish(event);
            tracing::debug!(
                package = %package_name,
                lock_version = record.lock_version(),
                delivered,
                "published preference change"
            );
        }
        Ok(())
    }

    pub fn entries(&self) -> Result<Vec<(String, PreferenceRecord)>> {
        let keys = self
            .backend
            .keys()
            .context("failed to enumerate stored preferences")?;
        Ok(keys
            .into_iter()
            .map(|key| {
                let record = self.get(&key);
                (key, record)
            })
            .collect())
    }

    /// Rebuilds `table` from stored preferences, bypassing the bus. Entries
    /// without a stored lock are removed.
    pub fn seed(&self, table: &LockTable) -> Result<SeedStats> {
        let locks = self
            .entries()?
            .into_iter()
            .filter_map(|(key, record)| record.lock_version().map(|version| (key, version)));
        let stats = table.replace_all(locks);
        tracing::info!(
            loaded = stats.loaded,
            removed = stats.removed,
            failed = stats.failed,
            "seeded lock table from stored preferences"
        );
        Ok(stats)
    }

    /// Startup wiring: subscribes the drain worker, seeds `table` from stored
    /// preferences, then starts draining. Events published while seeding are
    /// queued and applied afterwards. Locks that fail to seed are logged and
    /// skipped; the worker still starts.
    pub fn init(&self, table: Arc<LockTable>) -> Result<LockDrainWorker> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            anyhow::bail!("preference store is already initialized");
        }

        let events = self.bus.subscribe();
        let worker = self
            .seed(&table)
            .and_then(|_| LockDrainWorker::spawn(table, events));
        if worker.is_err() {
            self.initialized.store(false, Ordering::SeqCst);
        }
        worker
    }

    /// Disconnects subscribers; the drain worker finishes queued events and
    /// exits.
    pub fn close(&self) {
        self.bus.close();
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
