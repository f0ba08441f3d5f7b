use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstalledItem {
    pub package_name: String,
    pub version_name: String,
    pub version_code: i64,
    pub signature: String,
}

impl InstalledItem {
    pub fn new(
        package_name: impl Into<String>,
        version_name: impl Into<String>,
        version_code: i64,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            version_name: version_name.into(),
            version_code,
            signature: signature.into(),
        }
    }

    /// Builds the item from the package's raw signing certificate
    /// characters, hashing them into the comparable signature string.
    pub fn from_certificate(
        package_name: impl Into<String>,
        version_name: impl Into<String>,
        version_code: i64,
        cert_chars: &str,
    ) -> Self {
        Self::new(
            package_name,
            version_name,
            version_code,
            pinwheel_security::signature_hash(cert_chars),
        )
    }
}
