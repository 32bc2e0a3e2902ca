//! # Anchorage Core
//!
//! Assertion model and wire-format decoding for the Anchorage trust
//! framework.
//!
//! An *assertion* is a signed, structured identity document. Two kinds
//! exist today:
//!
//! - **Account**: an identity record, the subject of trust
//! - **Account-key**: a public signing key bound to an account, used to
//!   validate further signed documents issued as that account
//!
//! Assertions travel as a line-oriented text format: a header block of
//! `key: value` metadata, an optional body, and one or more base64
//! signature blocks. [`decode`] parses that format and performs all
//! structural validation; consumers such as the trust registry treat the
//! resulting [`Assertion`] values as opaque and immutable.

pub mod assertion;
pub mod decode;
pub mod error;
pub mod fingerprint;

pub use assertion::{Account, AccountKey, Assertion, ValidationLevel};
pub use decode::decode;
pub use error::{AssertionError, Result};
pub use fingerprint::key_fingerprint;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
