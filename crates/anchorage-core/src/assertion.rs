//! Assertion data model
//!
//! Decoded assertions are immutable. Every accessor and collection in this
//! crate hands out by-value copies; holders of an [`Assertion`] can never
//! mutate state owned by somebody else through it.

use crate::error::{AssertionError, Result};
use chrono::{DateTime, Utc};
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

/// A decoded, structurally validated signed identity document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Assertion {
    /// An identity record
    Account(Account),
    /// A public signing key bound to an account
    AccountKey(AccountKey),
}

impl Assertion {
    /// The authority that issued this assertion
    pub fn authority_id(&self) -> &str {
        match self {
            Assertion::Account(account) => &account.authority_id,
            Assertion::AccountKey(key) => &key.authority_id,
        }
    }

    /// The account this assertion is about (the subject for accounts,
    /// the owning account for account-keys)
    pub fn account_id(&self) -> &str {
        match self {
            Assertion::Account(account) => &account.account_id,
            Assertion::AccountKey(key) => &key.account_id,
        }
    }

    /// The wire-format `type` header value
    pub fn type_name(&self) -> &'static str {
        match self {
            Assertion::Account(_) => "account",
            Assertion::AccountKey(_) => "account-key",
        }
    }

    /// Fingerprint of the key that signed this assertion
    pub fn sign_key_fingerprint(&self) -> &str {
        match self {
            Assertion::Account(account) => &account.sign_key_fingerprint,
            Assertion::AccountKey(key) => &key.sign_key_fingerprint,
        }
    }
}

/// An identity record: the subject of trust
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Authority that vouches for this account
    pub authority_id: String,
    /// Stable account identifier
    pub account_id: String,
    /// Human-readable name
    pub display_name: String,
    /// Optional account username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// How far the authority has validated this account
    pub validation: ValidationLevel,
    /// When this assertion was issued (RFC 3339)
    pub timestamp: DateTime<Utc>,
    /// Fingerprint of the key that signed this assertion
    pub sign_key_fingerprint: String,
    /// Raw signature blocks, in declaration order
    pub signatures: Vec<Vec<u8>>,
}

/// A public signing key bound to an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKey {
    /// Authority that vouches for this key binding
    pub authority_id: String,
    /// Account that owns this key
    pub account_id: String,
    /// Name of the key within the account
    pub name: String,
    /// SHA3-384 fingerprint of the public key material
    pub public_key_fingerprint: String,
    /// Start of the key's validity window (RFC 3339)
    pub since: DateTime<Utc>,
    /// Revision of this key assertion, if reissued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<u32>,
    /// Raw Ed25519 public key bytes
    pub public_key: [u8; 32],
    /// Fingerprint of the key that signed this assertion
    pub sign_key_fingerprint: String,
    /// Raw signature blocks, in declaration order
    pub signatures: Vec<Vec<u8>>,
}

impl AccountKey {
    /// Parse the key material into a verifying key.
    ///
    /// [`decode`](crate::decode) validates the material, so this succeeds
    /// for any decoded assertion; hand-constructed values may fail.
    pub fn verifying_key(&self) -> Result<VerifyingKey> {
        VerifyingKey::from_bytes(&self.public_key)
            .map_err(|e| AssertionError::InvalidKeyMaterial(e.to_string()))
    }
}

/// How far an authority has validated an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// No validation performed
    Unproven,
    /// Ownership verified
    Verified,
    /// Highlighted by the authority
    Starred,
    /// Operated by the authority itself
    Certified,
}

impl ValidationLevel {
    /// Parse a wire-format `validation` header value
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "unproven" => Ok(ValidationLevel::Unproven),
            "verified" => Ok(ValidationLevel::Verified),
            "starred" => Ok(ValidationLevel::Starred),
            "certified" => Ok(ValidationLevel::Certified),
            other => Err(AssertionError::InvalidValidation(other.to_string())),
        }
    }

    /// The wire-format header value
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Unproven => "unproven",
            ValidationLevel::Verified => "verified",
            ValidationLevel::Starred => "starred",
            ValidationLevel::Certified => "certified",
        }
    }
}

impl std::fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
