//! Key fingerprints
//!
//! A key fingerprint is the SHA3-384 digest of the raw public key bytes,
//! encoded as unpadded base64url. Fingerprints identify signing keys in
//! assertion headers (`sign-key-sha3-384`, `public-key-sha3-384`).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha3::{Digest, Sha3_384};

/// Length in bytes of a SHA3-384 digest
pub const FINGERPRINT_LEN: usize = 48;

/// Compute the fingerprint of raw public key material
pub fn key_fingerprint(key: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(Sha3_384::digest(key))
}

/// Check that a fingerprint string is a well-formed SHA3-384 digest
pub fn is_well_formed(fingerprint: &str) -> bool {
    URL_SAFE_NO_PAD
        .decode(fingerprint)
        .map(|digest| digest.len() == FINGERPRINT_LEN)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_well_formed() {
        let fp = key_fingerprint(&[0u8; 32]);
        assert!(is_well_formed(&fp));
        // 48 bytes -> 64 base64 characters, no padding
        assert_eq!(fp.len(), 64);
        assert!(!fp.contains('='));
    }

    #[test]
    fn test_fingerprint_is_url_safe() {
        // Fingerprints appear in headers; they must never use '+' or '/'
        for seed in 0u8..64 {
            let fp = key_fingerprint(&[seed; 32]);
            assert!(!fp.contains('+'), "fingerprint {fp} not url-safe");
            assert!(!fp.contains('/'), "fingerprint {fp} not url-safe");
        }
    }

    #[test]
    fn test_fingerprint_depends_on_input() {
        assert_ne!(key_fingerprint(b"key-a"), key_fingerprint(b"key-b"));
    }

    #[test]
    fn test_rejects_standard_base64_padding() {
        assert!(!is_well_formed("AAAA=="));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("not base64url!!"));
    }
}
