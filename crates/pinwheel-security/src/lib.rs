mod signature;

pub use signature::{certificate_fingerprint, signature_hash};
