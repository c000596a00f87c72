//! Algorithm-tagged envelope around a ciphertext payload.

use std::fmt;

use crate::core::constants::{ENCRYPTED_PREFIX, ENCRYPTED_TAG};

/// A parsed `enc:<ALGO>:<payload>` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub algorithm: &'a str,
    pub payload: &'a str,
}

impl<'a> Envelope<'a> {
    pub fn new(algorithm: &'a str, payload: &'a str) -> Self {
        Self { algorithm, payload }
    }

    /// Split a value into algorithm and payload.
    ///
    /// Returns `None` unless the value starts with `enc:` and carries a
    /// non-empty algorithm identifier followed by `:`.
    pub fn parse(value: &'a str) -> Option<Self> {
        let rest = value.strip_prefix(ENCRYPTED_TAG)?.strip_prefix(':')?;
        let (algorithm, payload) = rest.split_once(':')?;
        if algorithm.is_empty() {
            return None;
        }
        Some(Self { algorithm, payload })
    }
}

impl fmt::Display for Envelope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", ENCRYPTED_TAG, self.algorithm, self.payload)
    }
}

/// Whether a stored value is an encrypted value this crate can open.
///
/// Anything without the exact `enc:AES256:` prefix is plaintext.
pub fn is_encrypted(value: &str) -> bool {
    value.starts_with(ENCRYPTED_PREFIX)
}
