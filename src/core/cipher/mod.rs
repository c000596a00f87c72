//! Cryptographic operations.
//!
//! Values are sealed with a symmetric key derived from the caller's
//! encryption key and wrapped in an envelope that names the algorithm:
//!
//! ```text
//! enc:AES256:<base64(nonce || ciphertext || tag)>
//! ```
//!
//! ## Adding a New Algorithm
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Give it its own algorithm identifier so the envelope stays unambiguous

use serde::{Deserialize, Serialize};

use crate::error::Result;

mod aes;
mod envelope;

pub use aes::Aes256;
pub use envelope::{is_encrypted, Envelope};

/// Symmetric envelope cipher.
pub trait Cipher {
    /// Encrypt `plaintext` under `key`.
    ///
    /// # Returns
    ///
    /// The full envelope string (`enc:<ALGO>:<payload>`).
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if encryption fails.
    fn seal(&self, plaintext: &str, key: &str) -> Result<String>;

    /// Decrypt an envelope produced by [`Cipher::seal`].
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` for any malformed,
    /// tampered or wrongly keyed input.
    fn open(&self, sealed: &str, key: &str) -> Result<String>;

    /// Algorithm identifier written into the envelope.
    fn algorithm(&self) -> &'static str;
}

/// Nonce generation strategy.
///
/// `Random` is the default. `Counter` reproduces the historic fixed nonce
/// (`00 01 .. 0b`), which makes sealing deterministic: the same plaintext
/// and key always give the same ciphertext. It only exists to regenerate
/// old test vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonceMode {
    #[default]
    Random,
    Counter,
}

/// Encrypt a value with the default cipher.
///
/// This is a convenience wrapper around `Aes256::seal`.
///
/// # Errors
///
/// Returns `CipherError` if encryption fails.
pub fn seal(plaintext: &str, key: &str) -> Result<String> {
    Aes256::default().seal(plaintext, key)
}

/// Decrypt a value with the default cipher.
///
/// This is a convenience wrapper around `Aes256::open`.
///
/// # Errors
///
/// Returns `CipherError::DecryptionFailed` if the value cannot be opened.
pub fn open(sealed: &str, key: &str) -> Result<String> {
    Aes256::default().open(sealed, key)
}
