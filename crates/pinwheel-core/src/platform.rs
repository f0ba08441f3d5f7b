use std::fmt;

/// ABI identifier used by package indexes to tag release builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Platform(String);

impl Platform {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn current() -> Self {
        Self::from_arch(std::env::consts::ARCH)
    }

    pub fn from_arch(arch: &str) -> Self {
        let id = match arch {
            "aarch64" => "arm64-v8a",
            "arm" => "armeabi-v7a",
            "x86_64" => "x86_64",
            "x86" => "x86",
            other => other,
        };
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
