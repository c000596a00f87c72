//! Constants used throughout keyhold.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name looked up in the working directory.
pub const CONFIG_FILE: &str = ".keyhold.toml";

/// Configuration directory name under the platform config dir.
pub const CONFIG_DIR: &str = "keyhold";

/// Configuration file name inside [`CONFIG_DIR`].
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Default secrets file (.env).
pub const ENV_FILE: &str = ".env";

/// Default usage-state file for temporary credentials.
pub const STATE_FILE: &str = ".keyhold.state";

/// Tag that opens every encrypted value.
pub const ENCRYPTED_TAG: &str = "enc";

/// Algorithm identifier written into the envelope.
pub const ALGORITHM_ID: &str = "AES256";

/// Full prefix of an encrypted value (`enc:AES256:`).
pub const ENCRYPTED_PREFIX: &str = "enc:AES256:";

/// Number of key prompts before giving up.
pub const MAX_KEY_ATTEMPTS: usize = 3;

/// Default use limit for a temporary credential.
pub const DEFAULT_TEMP_MAX_USES: u32 = 2;

/// Default longest trailing segment treated as a strippable suffix.
pub const DEFAULT_SUFFIX_MAX_LEN: usize = 5;

/// Placeholder hint that is never shown.
pub const NO_HINT: &str = "No hint available.";
