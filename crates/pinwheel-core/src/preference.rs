use serde::{Deserialize, Serialize};

/// Per-package override of the default update behavior.
///
/// Serialized as a JSON object with `ignoreUpdates` and `ignoreVersionCode`
/// keys. Missing keys fall back to the default record and unknown keys are
/// ignored, so older and newer payloads both decode.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferenceRecord {
    pub ignore_updates: bool,
    pub ignore_version_code: i64,
}

impl PreferenceRecord {
    pub fn new(ignore_updates: bool, ignore_version_code: i64) -> Self {
        Self {
            ignore_updates,
            ignore_version_code,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Lock table value for this record: `Some(0)` blocks every update,
    /// `Some(v)` blocks updates up to `v`, `None` means no lock entry.
    pub fn lock_version(&self) -> Option<i64> {
        if self.ignore_updates {
            Some(0)
        } else if self.ignore_version_code > 0 {
            Some(self.ignore_version_code)
        } else {
            None
        }
    }

    pub fn should_ignore_update(&self, version_code: i64) -> bool {
        self.ignore_updates || self.ignore_version_code == version_code
    }

    /// Tracks only the fields that feed the lock table.
    pub fn lock_differs(&self, other: &Self) -> bool {
        self.ignore_updates != other.ignore_updates
            || self.ignore_version_code != other.ignore_version_code
    }

    pub fn to_json(&self) -> anyhow::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> anyhow::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
