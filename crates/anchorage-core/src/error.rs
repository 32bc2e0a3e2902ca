//! Error types for assertion decoding

use thiserror::Error;

/// Result type alias using AssertionError
pub type Result<T> = std::result::Result<T, AssertionError>;

/// Errors produced while decoding an assertion
#[derive(Error, Debug)]
pub enum AssertionError {
    /// Input bytes are not valid UTF-8
    #[error("assertion is not valid UTF-8")]
    NotUtf8,

    /// A header line is not a well-formed `key: value` pair
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    /// The same header appears more than once
    #[error("duplicate header: {0}")]
    DuplicateHeader(String),

    /// The `type` header names an unknown assertion type
    #[error("unknown assertion type: {0:?}")]
    UnknownType(String),

    /// A required header is absent
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    /// A timestamp header does not parse as RFC 3339
    #[error("invalid {field} timestamp: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    /// The `revision` header is not a non-negative integer
    #[error("invalid revision: {0:?}")]
    InvalidRevision(String),

    /// The `validation` header names an unknown validation level
    #[error("invalid validation level: {0:?}")]
    InvalidValidation(String),

    /// The `body-length` header is not a non-negative integer
    #[error("invalid body-length: {0:?}")]
    InvalidBodyLength(String),

    /// The body does not have the declared length
    #[error("body length mismatch: header declares {declared}, body has {actual}")]
    BodyLengthMismatch { declared: usize, actual: usize },

    /// A body is required for this assertion type but absent
    #[error("assertion type {0} requires a body")]
    MissingBody(&'static str),

    /// No signature block follows the headers and body
    #[error("assertion has no signature")]
    MissingSignature,

    /// A signature block is not structurally valid
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// A key fingerprint header is not a base64url SHA3-384 digest
    #[error("invalid {field} fingerprint: {value:?}")]
    InvalidFingerprint { field: &'static str, value: String },

    /// The declared public key fingerprint does not match the key material
    #[error("public key fingerprint mismatch: header declares {declared}, key material hashes to {actual}")]
    FingerprintMismatch { declared: String, actual: String },

    /// The body does not decode to a valid Ed25519 public key
    #[error("invalid public key material: {0}")]
    InvalidKeyMaterial(String),
}
