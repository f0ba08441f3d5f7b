use std::collections::BTreeMap;

use anyhow::Result;
use parking_lot::{Mutex, RwLock};

use crate::bus::PreferenceChanged;

/// Storage behind a [`LockTable`]. The sync engine may supply its own
/// database-backed implementation.
pub trait LockBackend: Send + Sync {
    fn put(&self, package_name: &str, version_code: i64) -> Result<()>;
    fn delete(&self, package_name: &str) -> Result<()>;
    fn get(&self, package_name: &str) -> Result<Option<i64>>;
    fn entries(&self) -> Result<BTreeMap<String, i64>>;
}

#[derive(Debug, Default)]
pub struct MemoryLockBackend {
    entries: RwLock<BTreeMap<String, i64>>,
}

impl LockBackend for MemoryLockBackend {
    fn put(&self, package_name: &str, version_code: i64) -> Result<()> {
        self.entries
            .write()
            .insert(package_name.to_string(), version_code);
        Ok(())
    }

    fn delete(&self, package_name: &str) -> Result<()> {
        self.entries.write().remove(package_name);
        Ok(())
    }

    fn get(&self, package_name: &str) -> Result<Option<i64>> {
        Ok(self.entries.read().get(package_name).copied())
    }

    fn entries(&self) -> Result<BTreeMap<String, i64>> {
        Ok(self.entries.read().clone())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub loaded: usize,
    pub removed: usize,
    pub failed: usize,
}

/// Package/version locks consulted by the repository sync engine.
///
/// A value of `0` locks every update of the package; a positive value locks
/// updates up to and including that version code. Writes are serialized so a
/// second writer cannot interleave with the drain worker.
pub struct LockTable {
    backend: Box<dyn LockBackend>,
    writes: Mutex<()>,
}

impl LockTable {
    pub fn new(backend: impl LockBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            writes: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryLockBackend::default())
    }

    pub fn put(&self, package_name: &str, version_code: i64) -> Result<()> {
        let _guard = self.writes.lock();
        self.backend.put(package_name, version_code)
    }

    pub fn delete(&self, package_name: &str) -> Result<()> {
        let _guard = self.writes.lock();
        self.backend.delete(package_name)
    }

    pub fn get(&self, package_name: &str) -> Result<Option<i64>> {
        self.backend.get(package_name)
    }

    pub fn enumerate(&self) -> Result<BTreeMap<String, i64>> {
        self.backend.entries()
    }

    /// Makes the table hold exactly `entries`: stale packages are deleted
    /// and every entry is written, all under one write guard. A failing
    /// mutation is logged and skipped.
    pub fn replace_all<I>(&self, entries: I) -> SeedStats
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        let wanted: BTreeMap<String, i64> = entries.into_iter().collect();
        let _guard = self.writes.lock();
        let mut stats = SeedStats::default();

        let existing = self.backend.entries().unwrap_or_else(|err| {
            tracing::warn!(
                error = %format!("{err:#}"),
                "failed to list existing locks; stale entries may remain"
            );
            BTreeMap::new()
        });
        for package_name in existing.keys().filter(|key| !wanted.contains_key(*key)) {
            match self.backend.delete(package_name) {
                Ok(()) => stats.removed += 1,
                Err(err) => {
                    stats.failed += 1;
                    tracing::warn!(
                        package = %package_name,
                        error = %format!("{err:#}"),
                        "failed to drop stale lock; skipping"
                    );
                }
            }
        }

        for (package_name, version_code) in &wanted {
            match self.backend.put(package_name, *version_code) {
                Ok(()) => stats.loaded += 1,
                Err(err) => {
                    stats.failed += 1;
                    tracing::warn!(
                        package = %package_name,
                        version_code,
                        error = %format!("{err:#}"),
                        "failed to seed lock; skipping"
                    );
                }
            }
        }
        stats
    }

    pub fn apply(&self, event: &PreferenceChanged) -> Result<()> {
        match event.lock_version {
            Some(version_code) => self.put(&event.package_name, version_code),
            None => self.delete(&event.package_name),
        }
    }

    pub fn is_update_suppressed(&self, package_name: &str, version_code: i64) -> Result<bool> {
        Ok(match self.get(package_name)? {
            Some(0) => true,
            Some(locked) => version_code <= locked,
            None => false,
        })
    }
}

impl std::fmt::Debug for LockTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockTable").finish_non_exhaustive()
    }
}
