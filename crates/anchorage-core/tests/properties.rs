//! Property-Based Tests for the Assertion Decoder
//!
//! The decoder is the trust boundary for every byte that enters the
//! anchor set, so it must never panic and must reject anything that is
//! not a structurally complete assertion:
//! 1. Arbitrary input never panics the decoder
//! 2. Arbitrary corruption of a valid assertion never panics the decoder
//! 3. Well-formed assertions decode to their declared fields
//!
//! Uses proptest for property-based testing with arbitrary inputs.

use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::SigningKey;
use proptest::prelude::*;
use rand::rngs::OsRng;

use anchorage_core::{decode, key_fingerprint, Assertion, AssertionError};

// =============================================================================
// Test Helpers
// =============================================================================

fn mock_signature() -> String {
    STANDARD.encode([0x5A; 64])
}

/// Build a well-formed account assertion text
fn mint_account(authority: &str, account_id: &str, display_name: &str, validation: &str) -> String {
    format!(
        "type: account\n\
         authority-id: {authority}\n\
         account-id: {account_id}\n\
         display-name: {display_name}\n\
         timestamp: 2021-01-01T00:00:00.0Z\n\
         validation: {validation}\n\
         sign-key-sha3-384: {fp}\n\
         \n\
         {sig}\n",
        fp = key_fingerprint(b"test-signing-key"),
        sig = mock_signature(),
    )
}

/// Build a well-formed account-key assertion text around a fresh key
fn mint_account_key(account_id: &str, name: &str) -> String {
    let key = SigningKey::generate(&mut OsRng);
    let public = key.verifying_key().to_bytes();
    let body = STANDARD.encode(public);
    format!(
        "type: account-key\n\
         authority-id: testrig\n\
         public-key-sha3-384: {key_fp}\n\
         account-id: {account_id}\n\
         name: {name}\n\
         since: 2021-01-01T00:00:00.0Z\n\
         body-length: {len}\n\
         sign-key-sha3-384: {sign_fp}\n\
         \n\
         {body}\n\
         \n\
         {sig}\n",
        key_fp = key_fingerprint(&public),
        sign_fp = key_fingerprint(b"test-signing-key"),
        len = body.len(),
        sig = mock_signature(),
    )
}

// =============================================================================
// PROPERTY 1: Decoding never panics
// =============================================================================

proptest! {
    /// Arbitrary bytes must produce a value or an error, never a panic
    #[test]
    fn prop_arbitrary_bytes_never_panic(input in prop::collection::vec(any::<u8>(), 0..2048)) {
        let _ = decode(&input);
    }

    /// Truncating a valid assertion at any point never panics
    #[test]
    fn prop_truncation_never_panics(cut in 0usize..400) {
        let text = mint_account("testrig", "acct-1", "Test Rig", "certified");
        let cut = cut.min(text.len());
        let _ = decode(&text.as_bytes()[..cut]);
    }

    /// Flipping a single byte of a valid assertion never panics
    #[test]
    fn prop_byte_flip_never_panics(index in 0usize..400, flip in 1u8..255) {
        let text = mint_account("testrig", "acct-1", "Test Rig", "certified");
        let mut bytes = text.into_bytes();
        let index = index % bytes.len();
        bytes[index] ^= flip;
        let _ = decode(&bytes);
    }
}

// =============================================================================
// PROPERTY 2: Well-formed assertions decode to their declared fields
// =============================================================================

proptest! {
    /// Minted accounts decode with every header preserved
    #[test]
    fn prop_minted_account_decodes(
        authority in "[a-z][a-z0-9-]{2,15}",
        account_id in "[a-zA-Z0-9]{3,32}",
        display_name in "[A-Za-z][A-Za-z0-9 ]{0,30}",
    ) {
        let text = mint_account(&authority, &account_id, &display_name, "unproven");
        let decoded = decode(text.as_bytes()).expect("minted assertion must decode");

        let Assertion::Account(account) = decoded else {
            panic!("expected account assertion");
        };
        prop_assert_eq!(account.authority_id, authority);
        prop_assert_eq!(account.account_id, account_id);
        prop_assert_eq!(account.display_name, display_name);
    }

    /// Minted account-keys decode, carry valid key material, and the
    /// fingerprint always matches the material
    #[test]
    fn prop_minted_account_key_decodes(
        account_id in "[a-zA-Z0-9]{3,32}",
        name in "[a-z][a-z0-9-]{2,20}",
    ) {
        let text = mint_account_key(&account_id, &name);
        let decoded = decode(text.as_bytes()).expect("minted assertion must decode");

        let Assertion::AccountKey(key) = decoded else {
            panic!("expected account-key assertion");
        };
        prop_assert_eq!(&key.account_id, &account_id);
        prop_assert_eq!(&key.name, &name);
        prop_assert_eq!(
            key.public_key_fingerprint.clone(),
            key_fingerprint(&key.public_key)
        );
        prop_assert!(key.verifying_key().is_ok());
    }

    /// Decoding is deterministic
    #[test]
    fn prop_decode_deterministic(account_id in "[a-zA-Z0-9]{3,32}") {
        let text = mint_account("testrig", &account_id, "Test Rig", "verified");
        let first = decode(text.as_bytes()).unwrap();
        let second = decode(text.as_bytes()).unwrap();
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// PROPERTY 3: Declared lengths are enforced
// =============================================================================

proptest! {
    /// Any body-length that disagrees with the actual body is rejected
    #[test]
    fn prop_wrong_body_length_rejected(declared in 0usize..200) {
        prop_assume!(declared != 44); // actual length of a base64 Ed25519 key
        let text = mint_account_key("acct-1", "signer")
            .replace("body-length: 44", &format!("body-length: {declared}"));

        let result = decode(text.as_bytes());
        prop_assert!(result.is_err());
    }
}

// =============================================================================
// ADDITIONAL UNIT TESTS (non-proptest)
// =============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_problem() {
        let text = mint_account("testrig", "acct-1", "Test Rig", "golden");
        let err = decode(text.as_bytes()).unwrap_err();
        assert!(matches!(err, AssertionError::InvalidValidation(_)));
        assert!(err.to_string().contains("golden"));
    }

    #[test]
    fn test_trailing_newline_is_optional() {
        let text = mint_account("testrig", "acct-1", "Test Rig", "certified");
        let trimmed = text.trim_end_matches('\n');
        assert_eq!(
            decode(text.as_bytes()).unwrap(),
            decode(trimmed.as_bytes()).unwrap()
        );
    }

    #[test]
    fn test_whole_second_timestamps_accepted() {
        // Minted texts use fractional seconds; whole seconds are fine too
        let text = mint_account("testrig", "acct-1", "Test Rig", "certified")
            .replace("2021-01-01T00:00:00.0Z", "2021-01-01T00:00:00Z");
        assert!(decode(text.as_bytes()).is_ok());
    }
}
