//! Keyhold - policy-gated encrypted `.env` secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── prompt        # Key and value prompts
//! │   ├── store         # Encrypt and append a variable
//! │   ├── shell         # Spawn a shell with secrets loaded
//! │   ├── run           # Run a command with secrets loaded
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .keyhold.toml management
//!     ├── policy        # Key validation rules
//!     ├── validator     # Policy plus temporary credential
//!     ├── usage/        # Temporary credential usage counters
//!     │   ├── mod       # UsageStore trait
//!     │   ├── fs        # JSON state file implementation
//!     │   └── memory    # In-memory implementation
//!     ├── cipher/       # Encryption
//!     │   ├── mod       # Cipher trait
//!     │   ├── aes       # AES-256-GCM implementation
//!     │   └── envelope  # enc:AES256: value format
//!     ├── env           # Append-only .env store
//!     ├── names         # Name validation and export policy
//!     └── manager       # store / load_all
//! ```
//!
//! # Example
//!
//! ```no_run
//! use keyhold::core::manager::SecretManager;
//! use keyhold::core::policy::ValidationPolicy;
//! use keyhold::core::usage::FileUsageStore;
//! use keyhold::core::validator::KeyValidator;
//!
//! # fn main() -> keyhold::error::Result<()> {
//! let validator = KeyValidator::new(ValidationPolicy::default(), FileUsageStore::default());
//! let manager = SecretManager::new(validator);
//!
//! let session = manager.unlock("lh-my-key-1234#!u")?;
//! session.store("sk-123", "API_KEY", ".env")?;
//! let secrets = session.load_all(".env")?;
//! assert_eq!(secrets["API_KEY"].as_str(), "sk-123");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
