//! Persisted usage counters for temporary credentials.
//!
//! Provides the counter type and a storage abstraction with implementations
//! for different backends.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `UsageStore` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StateError;

mod fs;
mod memory;

pub use fs::FileUsageStore;
pub use memory::MemoryUsageStore;

/// Use counts keyed by credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageCounter {
    counts: BTreeMap<String, u32>,
}

impl UsageCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `credential` has been used (zero when never seen).
    pub fn count(&self, credential: &str) -> u32 {
        self.counts.get(credential).copied().unwrap_or(0)
    }

    /// Record one more use of `credential` and return the new count.
    pub fn increment(&mut self, credential: &str) -> u32 {
        let count = self.counts.entry(credential.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Whether no credential has been used yet.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Storage for usage counters.
///
/// Abstracts persistence so validation can run against the filesystem in
/// production and against memory in tests.
pub trait UsageStore {
    /// Load the current counters.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if persisted state exists but cannot be read
    /// or parsed. Absent state is an empty counter, not an error.
    fn load(&self) -> Result<UsageCounter, StateError>;

    /// Persist the counters.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the counters could not be durably written.
    fn save(&self, counter: &UsageCounter) -> Result<(), StateError>;
}

impl<S: UsageStore + ?Sized> UsageStore for &S {
    fn load(&self) -> Result<UsageCounter, StateError> {
        (**self).load()
    }

    fn save(&self, counter: &UsageCounter) -> Result<(), StateError> {
        (**self).save(counter)
    }
}
