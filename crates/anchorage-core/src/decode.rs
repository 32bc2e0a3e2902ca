//! Assertion wire-format decoding
//!
//! The wire format is line-oriented text: a header block of `key: value`
//! metadata lines, a blank line, an optional body (present exactly when the
//! `body-length` header is present), another blank line, and one or more
//! base64 signature blocks separated by blank lines.
//!
//! [`decode`] rejects malformed encodings and verifies embedded signatures
//! structurally: every signature block must decode from base64 to at least
//! an Ed25519 signature's worth of bytes, fingerprint headers must be
//! well-formed SHA3-384 digests, and account-key bodies must carry valid
//! key material matching the declared fingerprint. Verifying signatures
//! against key material is the verification pipeline's job, not this
//! module's.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use ed25519_dalek::VerifyingKey;

use crate::assertion::{Account, AccountKey, Assertion, ValidationLevel};
use crate::error::{AssertionError, Result};
use crate::fingerprint;

/// Minimum decoded length of a signature block (one Ed25519 signature)
const SIGNATURE_MIN_LEN: usize = 64;

/// Decode and structurally validate an assertion from its wire form
pub fn decode(bytes: &[u8]) -> Result<Assertion> {
    let text = std::str::from_utf8(bytes).map_err(|_| AssertionError::NotUtf8)?;

    let (head, rest) = text
        .split_once("\n\n")
        .ok_or(AssertionError::MissingSignature)?;
    let headers = parse_headers(head)?;

    let (body, signature_text) = match headers.get("body-length") {
        Some(declared) => {
            let declared: usize = declared
                .parse()
                .map_err(|_| AssertionError::InvalidBodyLength(declared.clone()))?;
            let (body, signature_text) = rest
                .split_once("\n\n")
                .ok_or(AssertionError::MissingSignature)?;
            if body.len() != declared {
                return Err(AssertionError::BodyLengthMismatch {
                    declared,
                    actual: body.len(),
                });
            }
            (Some(body), signature_text)
        }
        None => (None, rest),
    };

    let signatures = parse_signatures(signature_text)?;

    let type_name = required(&headers, "type")?;
    match type_name {
        "account" => decode_account(&headers, signatures),
        "account-key" => decode_account_key(&headers, body, signatures),
        other => Err(AssertionError::UnknownType(other.to_string())),
    }
}

fn decode_account(headers: &HashMap<String, String>, signatures: Vec<Vec<u8>>) -> Result<Assertion> {
    Ok(Assertion::Account(Account {
        authority_id: required(headers, "authority-id")?.to_string(),
        account_id: required(headers, "account-id")?.to_string(),
        display_name: required(headers, "display-name")?.to_string(),
        username: headers.get("username").cloned(),
        validation: ValidationLevel::parse(required(headers, "validation")?)?,
        timestamp: timestamp(headers, "timestamp")?,
        sign_key_fingerprint: fingerprint_header(headers, "sign-key-sha3-384")?,
        signatures,
    }))
}

fn decode_account_key(
    headers: &HashMap<String, String>,
    body: Option<&str>,
    signatures: Vec<Vec<u8>>,
) -> Result<Assertion> {
    let body = body.ok_or(AssertionError::MissingBody("account-key"))?;
    let public_key_fingerprint = fingerprint_header(headers, "public-key-sha3-384")?;
    let public_key = decode_key_material(body)?;

    let actual = fingerprint::key_fingerprint(&public_key);
    if actual != public_key_fingerprint {
        return Err(AssertionError::FingerprintMismatch {
            declared: public_key_fingerprint,
            actual,
        });
    }

    let revision = match headers.get("revision") {
        Some(value) => Some(
            value
                .parse::<u32>()
                .map_err(|_| AssertionError::InvalidRevision(value.clone()))?,
        ),
        None => None,
    };

    Ok(Assertion::AccountKey(AccountKey {
        authority_id: required(headers, "authority-id")?.to_string(),
        account_id: required(headers, "account-id")?.to_string(),
        name: required(headers, "name")?.to_string(),
        public_key_fingerprint,
        since: timestamp(headers, "since")?,
        revision,
        public_key,
        sign_key_fingerprint: fingerprint_header(headers, "sign-key-sha3-384")?,
        signatures,
    }))
}

/// Parse the header block into a key/value map, rejecting malformed lines
/// and duplicate keys
fn parse_headers(head: &str) -> Result<HashMap<String, String>> {
    let mut headers = HashMap::new();
    for line in head.lines() {
        let (key, value) = line
            .split_once(": ")
            .ok_or_else(|| AssertionError::MalformedHeader(line.to_string()))?;
        if key.is_empty() || key.contains(' ') {
            return Err(AssertionError::MalformedHeader(line.to_string()));
        }
        if headers.insert(key.to_string(), value.to_string()).is_some() {
            return Err(AssertionError::DuplicateHeader(key.to_string()));
        }
    }
    Ok(headers)
}

/// Parse the trailing signature section: one or more base64 blocks
/// separated by blank lines
fn parse_signatures(text: &str) -> Result<Vec<Vec<u8>>> {
    let mut signatures = Vec::new();
    for block in text.trim_end_matches('\n').split("\n\n") {
        let compact: String = block.lines().collect();
        if compact.is_empty() {
            return Err(AssertionError::MissingSignature);
        }
        let signature = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| AssertionError::InvalidSignature(e.to_string()))?;
        if signature.len() < SIGNATURE_MIN_LEN {
            return Err(AssertionError::InvalidSignature(format!(
                "{} bytes, expected at least {}",
                signature.len(),
                SIGNATURE_MIN_LEN
            )));
        }
        signatures.push(signature);
    }
    Ok(signatures)
}

fn decode_key_material(body: &str) -> Result<[u8; 32]> {
    let raw = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| AssertionError::InvalidKeyMaterial(e.to_string()))?;
    let raw: [u8; 32] = raw.try_into().map_err(|raw: Vec<u8>| {
        AssertionError::InvalidKeyMaterial(format!("{} bytes, expected 32", raw.len()))
    })?;
    VerifyingKey::from_bytes(&raw)
        .map_err(|e| AssertionError::InvalidKeyMaterial(e.to_string()))?;
    Ok(raw)
}

fn required<'a>(headers: &'a HashMap<String, String>, name: &'static str) -> Result<&'a str> {
    headers
        .get(name)
        .map(String::as_str)
        .ok_or(AssertionError::MissingHeader(name))
}

fn timestamp(headers: &HashMap<String, String>, name: &'static str) -> Result<DateTime<Utc>> {
    let value = required(headers, name)?;
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| AssertionError::InvalidTimestamp {
            field: name,
            value: value.to_string(),
        })
}

fn fingerprint_header(headers: &HashMap<String, String>, name: &'static str) -> Result<String> {
    let value = required(headers, name)?;
    if !fingerprint::is_well_formed(value) {
        return Err(AssertionError::InvalidFingerprint {
            field: name,
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}
