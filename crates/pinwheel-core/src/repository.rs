use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub address: String,
    #[serde(default = "crate::repository::repository_enabled_default")]
    pub enabled: bool,
}

impl Repository {
    pub fn new(id: u64, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            enabled: true,
        }
    }
}

pub(crate) fn repository_enabled_default() -> bool {
    true
}
