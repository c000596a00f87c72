//! Configuration file management.
//!
//! Handles reading and validating `.keyhold.toml`. Every section is
//! optional; missing values fall back to the shipped defaults.
//!
//! ```toml
//! hint = "the usual one, with a twist"
//!
//! [policy]
//! min_length = 16
//! prefix = "lh-"
//! suffix = "u"
//! charset = "!@#$%^&*"
//! min_chars_present = 2
//! contains = "key"
//!
//! [temporary]
//! secret = "one-off-access"
//! max_uses = 2
//!
//! [cipher]
//! nonce = "random"
//!
//! [store]
//! strip_suffix = false
//! suffix_max_len = 5
//!
//! [state]
//! path = ".keyhold.state"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::cipher::{Aes256, NonceMode};
use crate::core::constants;
use crate::core::manager::SecretManager;
use crate::core::names::NamePolicy;
use crate::core::policy::ValidationPolicy;
use crate::core::usage::FileUsageStore;
use crate::core::validator::{KeyValidator, TemporaryCredential};
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.keyhold.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shown after the last failed key attempt
    pub hint: Option<String>,
    pub policy: PolicyConfig,
    pub temporary: TemporaryConfig,
    pub cipher: CipherConfig,
    pub store: StoreConfig,
    pub state: StateConfig,
}

/// `[policy]` section. Empty strings and zeros disable a rule.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    pub min_length: usize,
    pub prefix: String,
    pub suffix: String,
    pub charset: String,
    pub min_chars_present: usize,
    pub contains: String,
}

/// `[temporary]` section. An empty secret disables the credential.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemporaryConfig {
    pub secret: String,
    pub max_uses: u32,
}

/// `[cipher]` section
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CipherConfig {
    pub nonce: NonceMode,
}

/// `[store]` section
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Export `API_KEY_PROD` as `API_KEY`
    pub strip_suffix: bool,
    pub suffix_max_len: usize,
}

/// `[state]` section
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateConfig {
    pub path: PathBuf,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let policy = ValidationPolicy::default();
        Self {
            min_length: policy.min_length,
            prefix: policy.required_prefix.unwrap_or_default(),
            suffix: policy.required_suffix.unwrap_or_default(),
            charset: policy.required_charset,
            min_chars_present: policy.min_required_chars_present,
            contains: policy.required_substring.unwrap_or_default(),
        }
    }
}

impl Default for TemporaryConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            max_uses: constants::DEFAULT_TEMP_MAX_USES,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            strip_suffix: false,
            suffix_max_len: constants::DEFAULT_SUFFIX_MAX_LEN,
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::STATE_FILE),
        }
    }
}

impl PolicyConfig {
    /// Build the immutable policy.
    pub fn to_policy(&self) -> ValidationPolicy {
        let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());
        ValidationPolicy {
            min_length: self.min_length,
            required_prefix: optional(&self.prefix),
            required_suffix: optional(&self.suffix),
            required_charset: self.charset.clone(),
            min_required_chars_present: self.min_chars_present,
            required_substring: optional(&self.contains),
        }
    }
}

impl Config {
    /// Path of the per-project config in the current directory
    pub fn local_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Path of the per-user config, if the platform has a config dir
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(constants::CONFIG_DIR)
                .join(constants::GLOBAL_CONFIG_FILE)
        })
    }

    /// Locate and load the configuration.
    ///
    /// Lookup order: `explicit` path, `./.keyhold.toml`, the per-user
    /// config file, then built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if an explicit path cannot be read, or
    /// a parse/validation error for a malformed file.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidates = std::iter::once(Self::local_path()).chain(Self::global_path());
        for path in candidates {
            if path.is_file() {
                return Self::load(&path);
            }
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read,
    /// `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse_at(&contents, path)?;

        debug!(
            temporary = !config.temporary.secret.is_empty(),
            nonce = ?config.cipher.nonce,
            "config loaded"
        );
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::InvalidValue`.
    pub fn parse(contents: &str) -> Result<Self> {
        Self::parse_at(contents, Path::new(constants::CONFIG_FILE))
    }

    fn parse_at(contents: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration contents.
    ///
    /// Checks:
    /// - A configured temporary credential allows at least one use
    /// - The charset minimum can actually be met
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !self.temporary.secret.is_empty() && self.temporary.max_uses == 0 {
            return Err(ConfigError::InvalidValue {
                field: "temporary.max_uses",
                reason: "must be at least 1 when a temporary secret is set".to_string(),
            }
            .into());
        }

        let mut distinct: Vec<char> = self.policy.charset.chars().collect();
        distinct.sort_unstable();
        distinct.dedup();
        if !distinct.is_empty() && self.policy.min_chars_present > distinct.len() {
            return Err(ConfigError::InvalidValue {
                field: "policy.min_chars_present",
                reason: format!(
                    "{} exceeds the {} distinct characters in policy.charset",
                    self.policy.min_chars_present,
                    distinct.len()
                ),
            }
            .into());
        }

        Ok(())
    }

    /// Hint to show after repeated failures, if one is configured.
    pub fn hint(&self) -> Option<&str> {
        self.hint
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty() && *h != constants::NO_HINT)
    }

    pub fn temporary_credential(&self) -> TemporaryCredential {
        TemporaryCredential::new(self.temporary.secret.clone(), self.temporary.max_uses)
    }

    pub fn name_policy(&self) -> NamePolicy {
        if self.store.strip_suffix {
            NamePolicy::StripSuffix {
                max_len: self.store.suffix_max_len,
            }
        } else {
            NamePolicy::Verbatim
        }
    }

    /// Build the key validator described by this configuration.
    pub fn validator(&self) -> KeyValidator<FileUsageStore> {
        KeyValidator::new(
            self.policy.to_policy(),
            FileUsageStore::new(self.state.path.clone()),
        )
        .with_temporary(self.temporary_credential())
    }

    /// Build the secret manager described by this configuration.
    pub fn manager(&self) -> SecretManager<FileUsageStore> {
        SecretManager::with_cipher(self.validator(), Aes256::new(self.cipher.nonce))
            .with_name_policy(self.name_policy())
    }
}
