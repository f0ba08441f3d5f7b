use std::collections::BTreeSet;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::InstalledItem;

/// One downloadable build of a product version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub package_name: String,
    pub version_name: String,
    pub version_code: i64,
    #[serde(default)]
    pub platforms: BTreeSet<String>,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub incompatibilities: Vec<String>,
    #[serde(default = "crate::product::release_selected_default")]
    pub selected: bool,
    #[serde(default)]
    pub release_name: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub size: u64,
}

impl Release {
    pub fn targets(&self, platform: &str) -> bool {
        self.platforms.contains(platform)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub repository_id: u64,
    pub package_name: String,
    pub name: String,
    pub version_name: String,
    pub version_code: i64,
    #[serde(default = "crate::product::product_compatible_default")]
    pub compatible: bool,
    #[serde(default)]
    pub releases: Vec<Release>,
}

impl Product {
    pub fn from_json_str(input: &str) -> anyhow::Result<Self> {
        let product: Self =
            serde_json::from_str(input).context("failed to parse product metadata")?;
        if product.package_name.trim().is_empty() {
            return Err(anyhow!("product package name must not be empty"));
        }
        for release in &product.releases {
            if release.package_name != product.package_name {
                return Err(anyhow!(
                    "release '{}' belongs to '{}', not '{}'",
                    release.version_name,
                    release.package_name,
                    product.package_name
                ));
            }
            if release.platforms.iter().any(|p| p.trim().is_empty()) {
                return Err(anyhow!(
                    "release '{}' of '{}' declares an empty platform",
                    release.version_name,
                    product.package_name
                ));
            }
        }
        Ok(product)
    }

    /// Releases that survived upstream preference filtering.
    pub fn selected_releases(&self) -> impl Iterator<Item = &Release> {
        self.releases.iter().filter(|release| release.selected)
    }

    /// Whether a selected release is signed like `signature`. This is the
    /// same test the release selector applies to installed packages.
    pub fn has_signature(&self, signature: &str) -> bool {
        self.selected_releases()
            .any(|release| release.signature == signature)
    }

    pub fn can_update(&self, installed: Option<&InstalledItem>) -> bool {
        match installed {
            Some(installed) => {
                self.compatible
                    && self.version_code > installed.version_code
                    && self.has_signature(&installed.signature)
            }
            None => false,
        }
    }
}

pub(crate) fn release_selected_default() -> bool {
    true
}

pub(crate) fn product_compatible_default() -> bool {
    true
}
