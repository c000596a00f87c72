//! AES-256-GCM cipher implementation.
//!
//! The 256-bit key is the SHA-256 digest of the caller's key string. The
//! sealed blob is `nonce(12) || ciphertext || tag(16)`, base64-encoded.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::{trace, warn};
use zeroize::Zeroizing;

use super::{Cipher, Envelope, NonceMode};
use crate::core::constants::ALGORITHM_ID;
use crate::error::{CipherError, Result};

const KEY_SIZE: usize = 32;
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

/// AES-256-GCM envelope cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256 {
    nonce_mode: NonceMode,
}

impl Aes256 {
    pub fn new(nonce_mode: NonceMode) -> Self {
        if nonce_mode == NonceMode::Counter {
            warn!("deterministic nonce enabled: identical values produce identical ciphertext");
        }
        Self { nonce_mode }
    }

    pub fn nonce_mode(&self) -> NonceMode {
        self.nonce_mode
    }

    fn nonce(&self) -> [u8; NONCE_SIZE] {
        let mut nonce = [0u8; NONCE_SIZE];
        match self.nonce_mode {
            NonceMode::Random => OsRng.fill_bytes(&mut nonce),
            NonceMode::Counter => {
                for (i, byte) in nonce.iter_mut().enumerate() {
                    *byte = i as u8;
                }
            }
        }
        nonce
    }
}

/// SHA-256 of the key string, sized for AES-256.
fn derive_key(key: &str) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut derived = Zeroizing::new([0u8; KEY_SIZE]);
    derived.copy_from_slice(&Sha256::digest(key.as_bytes()));
    derived
}

fn build(key: &str) -> Aes256Gcm {
    let derived = derive_key(key);
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(derived.as_slice()))
}

impl Cipher for Aes256 {
    fn algorithm(&self) -> &'static str {
        ALGORITHM_ID
    }

    fn seal(&self, plaintext: &str, key: &str) -> Result<String> {
        trace!(plaintext_len = plaintext.len(), "sealing");

        let nonce = self.nonce();

        let ciphertext = build(key)
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);

        let payload = BASE64.encode(&blob);
        trace!(blob_len = blob.len(), "sealed");

        Ok(Envelope::new(self.algorithm(), &payload).to_string())
    }

    fn open(&self, sealed: &str, key: &str) -> Result<String> {
        trace!(sealed_len = sealed.len(), "opening");

        let payload = match Envelope::parse(sealed) {
            Some(envelope) if envelope.algorithm == self.algorithm() => envelope.payload,
            _ => return Err(reject("missing or unknown envelope tag")),
        };

        let blob = BASE64
            .decode(payload)
            .map_err(|_| reject("invalid base64 payload"))?;

        if blob.len() < NONCE_SIZE + TAG_SIZE {
            return Err(reject("payload too short"));
        }

        let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);
        let plaintext = Zeroizing::new(
            build(key)
                .decrypt(Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| reject("authentication failed"))?,
        );

        trace!(plaintext_len = plaintext.len(), "opened");

        String::from_utf8(plaintext.to_vec()).map_err(|_| reject("plaintext is not UTF-8"))
    }
}

/// Collapse every failure into the same opaque error.
fn reject(reason: &'static str) -> crate::error::Error {
    trace!(reason, "decryption rejected");
    CipherError::DecryptionFailed.into()
}
