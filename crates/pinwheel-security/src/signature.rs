use md5::Md5;
use sha2::{Digest, Sha256};

const MIN_FINGERPRINT_KEY_LEN: usize = 256;

/// Signature string stored on installed items and index releases: lowercase
/// hex MD5 of the certificate's character encoding.
pub fn signature_hash(cert_chars: &str) -> String {
    hex::encode(Md5::digest(cert_chars.as_bytes()))
}

/// Uppercase hex SHA-256 of a repository public key. Keys shorter than 256
/// bytes yield an empty fingerprint.
pub fn certificate_fingerprint(key: &[u8]) -> String {
    if key.len() < MIN_FINGERPRINT_KEY_LEN {
        tracing::debug!(len = key.len(), "key too short for fingerprint");
        return String::new();
    }
    hex::encode_upper(Sha256::digest(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_hash_is_lowercase_md5_hex() {
        assert_eq!(signature_hash(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(signature_hash("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn fingerprint_requires_long_key() {
        assert_eq!(certificate_fingerprint(&[0u8; 32]), "");
    }

    #[test]
    fn fingerprint_is_uppercase_sha256_hex() {
        let key = [0u8; 256];
        let fingerprint = certificate_fingerprint(&key);
        assert_eq!(fingerprint.len(), 64);
        assert_eq!(
            fingerprint,
            "5341E6B2646979A70E57653007A1F310169421EC9BDD9F1A5648F75ADE005AF1"
        );
    }
}
