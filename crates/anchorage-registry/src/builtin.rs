//! Built-in trust anchors
//!
//! The compiled-in assertions that bootstrap trust: the Meridian authority
//! account, its root signing key, and the Copperline secondary account with
//! its delegated signing key. [`BuiltinAnchors::load`] decodes them once at
//! process start; a decode failure means the build artifact itself is
//! corrupted and must be treated as unrecoverable by the caller.
//!
//! The staging trust context ships no anchors in standard builds. Enabling
//! the `staging-anchors` feature compiles in the staging authority set.

use anchorage_core::{decode, Assertion, AssertionError};
use thiserror::Error;

const MERIDIAN_ACCOUNT: &str = r"type: account
authority-id: meridian
account-id: meridian
display-name: Meridian
timestamp: 2019-06-01T00:00:00.0Z
username: meridian
validation: certified
sign-key-sha3-384: aT8UmeYi7oyCTYoV3dKE15R0UgaWOxJJ-Kj-e8J3uGJeHv2GzzfVWLRpRqOQGp2j

RSqyHz31p5e+uUGgRvX5iG4BZl8ySzTU4obCYh2cU9tWN73IZGUtP+/vJpaPbvNvIjvweHPC+iQ3
8D+EER1eBQ==
";

const MERIDIAN_ROOT_KEY: &str = r"type: account-key
authority-id: meridian
revision: 2
public-key-sha3-384: aT8UmeYi7oyCTYoV3dKE15R0UgaWOxJJ-Kj-e8J3uGJeHv2GzzfVWLRpRqOQGp2j
account-id: meridian
name: root
since: 2019-06-01T00:00:00.0Z
body-length: 44
sign-key-sha3-384: aT8UmeYi7oyCTYoV3dKE15R0UgaWOxJJ-Kj-e8J3uGJeHv2GzzfVWLRpRqOQGp2j

FZA+59VSTUPu8Iju1PsdazJslILufQX1tNlAS++Wv3U=

VxdlF9Ro4AvnD+uM5v5cod0mAxwOkeHMiW/l95Se4OrXv1cYZNLt4LKkV+79LMtemNAwEkjFApql
QzIqwCQ7BQ==
";

const COPPERLINE_ACCOUNT: &str = r"type: account
authority-id: meridian
account-id: 2k5y0yWirSLB0OKxPVXpaeRnUXEFpGxc
display-name: Copperline Industrial
timestamp: 2020-11-19T09:14:27.0Z
username: copperline
validation: unproven
sign-key-sha3-384: aT8UmeYi7oyCTYoV3dKE15R0UgaWOxJJ-Kj-e8J3uGJeHv2GzzfVWLRpRqOQGp2j

KKZteTnHK1U5R94/zHJQvHAYdDYECpLwajHUYD3Yem/lh58kbONvAt7e0jnI+T2XpA5f9bXYX6ga
6XryBDg8Bw==
";

const COPPERLINE_FLEET_KEY: &str = r"type: account-key
authority-id: meridian
public-key-sha3-384: LxzeZeALX4-X0ohm3rTv_pjW9PBEJttKNwFd6zpxPUSmhbKfCc-2q7nei0tdqqbA
account-id: 2k5y0yWirSLB0OKxPVXpaeRnUXEFpGxc
name: fleet-signer
since: 2021-04-29T13:45:50.0Z
body-length: 44
sign-key-sha3-384: aT8UmeYi7oyCTYoV3dKE15R0UgaWOxJJ-Kj-e8J3uGJeHv2GzzfVWLRpRqOQGp2j

n6D5Vk4zEPchw7zcViP0/kSriNe1kxkJizBqcaOvmzk=

a0lhNn4k2SX9P4X8q9ntleR7Bg++ouUp34JkRwBdBmsctqiLSeiYafroXwjdODYOI6FJSQGGZZMe
PTU4iC2MBQ==
";

#[cfg(feature = "staging-anchors")]
const MERIDIAN_STAGING_ACCOUNT: &str = r"type: account
authority-id: meridian-staging
account-id: meridian-staging
display-name: Meridian Staging
timestamp: 2019-06-01T00:00:00.0Z
username: meridian-staging
validation: certified
sign-key-sha3-384: 6RyvlAPTxGn09CqQiiit2VEXjxxbiANZICguqFvA2uWwCqFyn9qzCfpwUKJDuTb7

IWy8+dPIpPQTVcKdb11RYSBk27PMfX8LPwJ3lo9d/gJUITkNV3qNKHQdGAfhTBb37KA8XTdvmRvR
+TKoQsadCQ==
";

#[cfg(feature = "staging-anchors")]
const MERIDIAN_STAGING_ROOT_KEY: &str = r"type: account-key
authority-id: meridian-staging
public-key-sha3-384: 6RyvlAPTxGn09CqQiiit2VEXjxxbiANZICguqFvA2uWwCqFyn9qzCfpwUKJDuTb7
account-id: meridian-staging
name: root
since: 2019-06-01T00:00:00.0Z
body-length: 44
sign-key-sha3-384: 6RyvlAPTxGn09CqQiiit2VEXjxxbiANZICguqFvA2uWwCqFyn9qzCfpwUKJDuTb7

AVoicWgXuXTG9Y2gtblMSHvPoYvEX5Xsqyoqynd06iQ=

htSdIO7B6S9+JghlpjpuzqBxOARA5iM4CKeehuO0LT0ko1orpM0WAP4s0hKlQDEGqBwzxmhamN/f
+OD+DJ/IAw==
";

/// The production anchors, in declaration order: the authority account, its
/// root signing key, the secondary account, the secondary's signing key.
/// Later verification steps rely on encountering the root account before
/// its delegated keys.
const PRODUCTION_ANCHORS: [(&str, &str); 4] = [
    ("meridian account", MERIDIAN_ACCOUNT),
    ("meridian root key", MERIDIAN_ROOT_KEY),
    ("copperline account", COPPERLINE_ACCOUNT),
    ("copperline fleet-signer key", COPPERLINE_FLEET_KEY),
];

#[cfg(feature = "staging-anchors")]
const STAGING_ANCHORS: [(&str, &str); 2] = [
    ("meridian-staging account", MERIDIAN_STAGING_ACCOUNT),
    ("meridian-staging root key", MERIDIAN_STAGING_ROOT_KEY),
];

/// A built-in anchor failed to decode.
///
/// This can only happen when the build artifact is corrupted or tampered
/// with; callers must treat it as unrecoverable and exit rather than run
/// with a partial anchor set.
#[derive(Debug, Error)]
#[error("cannot decode built-in trust anchor '{anchor}': {source}")]
pub struct AnchorLoadError {
    /// Which embedded anchor failed
    pub anchor: &'static str,
    /// Why it failed to decode
    #[source]
    pub source: AssertionError,
}

/// The decoded built-in anchor collections, one per trust context
#[derive(Debug, Clone)]
pub struct BuiltinAnchors {
    production: Vec<Assertion>,
    staging: Vec<Assertion>,
}

impl BuiltinAnchors {
    /// Decode every compiled-in anchor, preserving declaration order.
    ///
    /// Intended to run once at process start, before any component queries
    /// trust state.
    pub fn load() -> Result<Self, AnchorLoadError> {
        Ok(Self {
            production: decode_all(&PRODUCTION_ANCHORS)?,
            staging: staging_anchors()?,
        })
    }

    /// The production trust context's anchors
    pub fn production(&self) -> &[Assertion] {
        &self.production
    }

    /// The staging trust context's anchors; empty unless the
    /// `staging-anchors` feature is compiled in
    pub fn staging(&self) -> &[Assertion] {
        &self.staging
    }
}

fn decode_all(anchors: &[(&'static str, &str)]) -> Result<Vec<Assertion>, AnchorLoadError> {
    anchors
        .iter()
        .map(|&(anchor, text)| {
            decode(text.as_bytes()).map_err(|source| AnchorLoadError { anchor, source })
        })
        .collect()
}

#[cfg(feature = "staging-anchors")]
fn staging_anchors() -> Result<Vec<Assertion>, AnchorLoadError> {
    decode_all(&STAGING_ANCHORS)
}

#[cfg(not(feature = "staging-anchors"))]
fn staging_anchors() -> Result<Vec<Assertion>, AnchorLoadError> {
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_anchors_decode() {
        let anchors = BuiltinAnchors::load().expect("built-in anchors must decode");
        assert_eq!(anchors.production().len(), 4);
    }

    #[test]
    fn test_production_declaration_order() {
        let anchors = BuiltinAnchors::load().unwrap();
        let types: Vec<_> = anchors
            .production()
            .iter()
            .map(|a| a.type_name())
            .collect();
        assert_eq!(types, ["account", "account-key", "account", "account-key"]);

        // The authority's own records come before the delegated ones
        assert_eq!(anchors.production()[0].account_id(), "meridian");
        assert_eq!(anchors.production()[1].account_id(), "meridian");
    }

    #[test]
    fn test_builtin_key_material_is_valid() {
        let anchors = BuiltinAnchors::load().unwrap();
        for assertion in anchors.production() {
            if let Assertion::AccountKey(key) = assertion {
                key.verifying_key()
                    .expect("built-in key material must parse");
            }
        }
    }

    #[cfg(not(feature = "staging-anchors"))]
    #[test]
    fn test_standard_build_has_no_staging_anchors() {
        let anchors = BuiltinAnchors::load().unwrap();
        assert!(anchors.staging().is_empty());
    }

    #[cfg(feature = "staging-anchors")]
    #[test]
    fn test_staging_build_compiles_in_staging_anchors() {
        let anchors = BuiltinAnchors::load().unwrap();
        assert!(!anchors.staging().is_empty());
        for assertion in anchors.staging() {
            assert_eq!(assertion.authority_id(), "meridian-staging");
        }
    }

    #[test]
    fn test_load_error_names_the_anchor() {
        let err = decode_all(&[("broken anchor", "type: account\n\nnot base64\n")]).unwrap_err();
        assert_eq!(err.anchor, "broken anchor");
        assert!(err.to_string().contains("broken anchor"));
    }
}
