use std::collections::BTreeMap;
use std::fs;
use std::io;

use anyhow::{Context, Result};
use parking_lot::RwLock;

use crate::PrefixLayout;

/// Durable blob storage keyed by package name.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}

/// One `<package>.json` file per key under the layout's preferences dir.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    layout: PrefixLayout,
}

impl FileKeyValueStore {
    pub fn new(layout: PrefixLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PrefixLayout {
        &self.layout
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_package_name(key)?;
        let path = self.layout.preference_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read preference: {}", path.display()))
            }
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        validate_package_name(key)?;
        self.layout.ensure_base_dirs()?;

        let path = self.layout.preference_path(key);
        let tmp_path = self
            .layout
            .tmp_state_dir()
            .join(format!("{key}.json.{}.tmp", std::process::id()));
        fs::write(&tmp_path, value)
            .with_context(|| format!("failed to write preference: {}", tmp_path.display()))?;
        if let Err(err) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err)
                .with_context(|| format!("failed to commit preference: {}", path.display()));
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let dir = self.layout.preferences_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&dir)
            .with_context(|| format!("failed to read preferences directory: {}", dir.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|v| v.to_str()) != Some("json") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|v| v.to_str()) else {
                continue;
            };
            if validate_package_name(stem).is_err() {
                tracing::warn!(path = %path.display(), "skipping preference file with invalid name");
                continue;
            }
            keys.push(stem.to_string());
        }

        keys.sort();
        Ok(keys)
    }
}

pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 255 {
        anyhow::bail!("invalid package name: must be 1-255 characters");
    }

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        anyhow::bail!("invalid package name: '{name}'");
    };

    let first_is_valid = first.is_ascii_alphanumeric() || first == '_';
    let rest_is_valid =
        chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' || ch == '-');
    if !first_is_valid || !rest_is_valid {
        anyhow::bail!("invalid package name: '{name}'");
    }

    Ok(())
}
