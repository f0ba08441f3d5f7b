use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixLayout {
    prefix: PathBuf,
}

impl PrefixLayout {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    pub fn config_path(&self) -> PathBuf {
        self.prefix.join("config.toml")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.prefix.join("state")
    }

    pub fn tmp_state_dir(&self) -> PathBuf {
        self.state_dir().join("tmp")
    }

    pub fn preferences_dir(&self) -> PathBuf {
        self.state_dir().join("preferences")
    }

    pub fn preference_path(&self, name: &str) -> PathBuf {
        self.preferences_dir().join(format!("{name}.json"))
    }

    pub fn ensure_base_dirs(&self) -> Result<()> {
        for dir in [self.state_dir(), self.tmp_state_dir(), self.preferences_dir()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        Ok(())
    }
}

pub fn default_user_prefix() -> Result<PathBuf> {
    resolve_user_prefix(|name| std::env::var(name).ok(), cfg!(windows))
}

pub(crate) fn resolve_user_prefix<F>(lookup: F, windows: bool) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(prefix) = lookup("PINWHEEL_PREFIX") {
        if !prefix.trim().is_empty() {
            return Ok(PathBuf::from(prefix));
        }
    }

    if windows {
        let app_data = lookup("LOCALAPPDATA")
            .context("LOCALAPPDATA is not set; cannot resolve Windows user prefix")?;
        return Ok(PathBuf::from(app_data).join("Pinwheel"));
    }

    let home = lookup("HOME").context("HOME is not set; cannot resolve user prefix")?;
    Ok(PathBuf::from(home).join(".pinwheel"))
}
