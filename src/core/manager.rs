//! Secret manager.
//!
//! Ties the pieces together: a key is validated by the [`KeyValidator`],
//! values are sealed and opened by the [`Cipher`], and entries are kept in
//! the flat store (`core::env`).

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::cipher::{Aes256, Cipher};
use crate::core::env;
use crate::core::names::{self, NamePolicy};
use crate::core::usage::UsageStore;
use crate::core::validator::{Grant, KeyValidator};
use crate::error::{CipherError, Result};

/// Decrypted variables keyed by exported name.
pub type Secrets = BTreeMap<String, Zeroizing<String>>;

/// Policy-gated access to an encrypted store.
#[derive(Debug)]
pub struct SecretManager<S, C = Aes256> {
    validator: KeyValidator<S>,
    cipher: C,
    names: NamePolicy,
}

impl<S: UsageStore> SecretManager<S, Aes256> {
    /// Manager using the default AES-256-GCM cipher.
    pub fn new(validator: KeyValidator<S>) -> Self {
        Self::with_cipher(validator, Aes256::default())
    }
}

impl<S: UsageStore, C: Cipher> SecretManager<S, C> {
    pub fn with_cipher(validator: KeyValidator<S>, cipher: C) -> Self {
        Self {
            validator,
            cipher,
            names: NamePolicy::default(),
        }
    }

    /// Set how stored names are exported by [`Session::load_all`].
    pub fn with_name_policy(mut self, names: NamePolicy) -> Self {
        self.names = names;
        self
    }

    pub fn validator(&self) -> &KeyValidator<S> {
        &self.validator
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Validate `key` once and return a session bound to it.
    ///
    /// Accepting a temporary credential consumes one of its uses, so
    /// callers doing several operations should unlock once and reuse the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccessDenied` if the key is rejected.
    pub fn unlock(&self, key: &str) -> Result<Session<'_, S, C>> {
        let grant = self.validator.check(key)?;
        if let Grant::Temporary { remaining } = grant {
            info!(remaining, "unlocked with temporary credential");
        }

        Ok(Session {
            manager: self,
            key: Zeroizing::new(key.to_string()),
            grant,
        })
    }

    /// Encrypt `plaintext` and append it to the store under `name`.
    ///
    /// # Returns
    ///
    /// The encrypted value as written (`enc:AES256:...`).
    ///
    /// # Errors
    ///
    /// Returns `Error::AccessDenied` if the key is rejected, a
    /// `ValidationError` for an unusable name, or a `StoreError` if the
    /// append fails.
    pub fn store(
        &self,
        plaintext: &str,
        name: &str,
        key: &str,
        path: impl AsRef<Path>,
    ) -> Result<String> {
        self.unlock(key)?.store(plaintext, name, path)
    }

    /// Load and decrypt every entry of the store.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccessDenied` if the key is rejected,
    /// `StoreError::NotFound` if the store does not exist, or
    /// `CipherError::DecryptionFailed` if no encrypted entry could be opened.
    pub fn load_all(&self, key: &str, path: impl AsRef<Path>) -> Result<Secrets> {
        self.unlock(key)?.load_all(path)
    }

    /// Whether the store holds any encrypted entry. Needs no key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn has_encrypted_entries(&self, path: impl AsRef<Path>) -> Result<bool> {
        Ok(env::has_encrypted(path)?)
    }
}

/// Access granted by a validated key.
pub struct Session<'m, S, C> {
    manager: &'m SecretManager<S, C>,
    key: Zeroizing<String>,
    grant: Grant,
}

impl<S: UsageStore, C: Cipher> Session<'_, S, C> {
    /// How the key was accepted.
    pub fn grant(&self) -> Grant {
        self.grant
    }

    /// Encrypt a value without touching the store.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if sealing fails.
    pub fn seal(&self, plaintext: &str) -> Result<String> {
        self.manager.cipher.seal(plaintext, &self.key)
    }

    /// Encrypt `plaintext` and append it under `name`.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for an unusable name or a `StoreError`
    /// if the append fails.
    pub fn store(&self, plaintext: &str, name: &str, path: impl AsRef<Path>) -> Result<String> {
        names::validate_name(name)?;

        let sealed = self.seal(plaintext)?;
        env::append(name, &sealed, path)?;

        debug!(name, "secret stored");
        Ok(sealed)
    }

    /// Load every entry, opening the encrypted ones.
    ///
    /// Plain values pass through unchanged. An encrypted entry that fails
    /// to open is skipped, but at least one must succeed. Duplicate names
    /// collapse with the last entry winning.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read, or
    /// `CipherError::DecryptionFailed` if no encrypted entry could be opened.
    pub fn load_all(&self, path: impl AsRef<Path>) -> Result<Secrets> {
        let entries = env::read_all(path)?;
        let cipher = &self.manager.cipher;
        let naming = self.manager.names;

        let mut opened = 0usize;
        let mut skipped = 0usize;
        let mut pairs = Vec::with_capacity(entries.len());

        for entry in entries {
            let exported = naming.apply(&entry.name).to_string();
            if exported.is_empty() {
                debug!(name = %entry.name, "skipping entry with empty exported name");
                continue;
            }

            let value = if entry.is_encrypted() {
                match cipher.open(&entry.value, &self.key) {
                    Ok(plaintext) => {
                        opened += 1;
                        Zeroizing::new(plaintext)
                    }
                    Err(_) => {
                        skipped += 1;
                        debug!(name = %entry.name, "skipping entry that failed to decrypt");
                        continue;
                    }
                }
            } else {
                Zeroizing::new(entry.value)
            };

            pairs.push((exported, value));
        }

        debug!(opened, skipped, "store loaded");

        if opened == 0 {
            return Err(CipherError::DecryptionFailed.into());
        }

        Ok(names::collapse(pairs))
    }
}
