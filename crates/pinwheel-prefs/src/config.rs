use std::fs;

use anyhow::{Context, Result};
use pinwheel_core::Platform;
use serde::{Deserialize, Serialize};

use crate::PrefixLayout;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinwheelConfig {
    #[serde(default)]
    pub primary_platform: Option<String>,
}

impl PinwheelConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse pinwheel config")?;
        if let Some(platform) = &config.primary_platform {
            if platform.trim().is_empty() {
                anyhow::bail!("primary_platform must not be empty");
            }
        }
        Ok(config)
    }

    pub fn load(layout: &PrefixLayout) -> Result<Self> {
        let path = layout.config_path();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed parsing config: {}", path.display()))
    }

    pub fn primary_platform(&self) -> Platform {
        match &self.primary_platform {
            Some(platform) => Platform::new(platform.trim()),
            None => Platform::current(),
        }
    }
}
