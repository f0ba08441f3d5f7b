use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};

use crate::bus::PreferenceChanged;
use crate::LockTable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainStats {
    pub applied: usize,
    pub failed: usize,
}

/// Background thread applying preference changes to a [`LockTable`] in the
/// order they were published. Exits once the bus disconnects it.
#[derive(Debug)]
pub struct LockDrainWorker {
    handle: JoinHandle<DrainStats>,
}

impl LockDrainWorker {
    pub fn spawn(
        table: Arc<LockTable>,
        events: flume::Receiver<PreferenceChanged>,
    ) -> Result<Self> {
        let handle = thread::Builder::new()
            .name("pinwheel-lock-drain".to_string())
            .spawn(move || drain(&table, &events))
            .context("failed to spawn lock drain worker")?;
        Ok(Self { handle })
    }

    pub fn join(self) -> Result<DrainStats> {
        self.handle
            .join()
            .map_err(|_| anyhow!("lock drain worker panicked"))
    }
}

fn drain(table: &LockTable, events: &flume::Receiver<PreferenceChanged>) -> DrainStats {
    let mut stats = DrainStats::default();
    for event in events.iter() {
        match table.apply(&event) {
            Ok(()) => {
                stats.applied += 1;
                tracing::debug!(
                    package = %event.package_name,
                    lock_version = event.lock_version,
                    "applied lock change"
                );
            }
            Err(err) => {
                stats.failed += 1;
                tracing::warn!(
                    package = %event.package_name,
                    error = %format!("{err:#}"),
                    "failed to apply lock change; skipping"
                );
            }
        }
    }
    tracing::debug!(applied = stats.applied, failed = stats.failed, "lock drain finished");
    stats
}
