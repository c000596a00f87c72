//! In-memory usage state.

use std::cell::RefCell;

use super::{UsageCounter, UsageStore};
use crate::error::StateError;

/// Usage counters that live only as long as the value.
///
/// Used by tests and by embedders that track usage elsewhere.
#[derive(Debug, Default)]
pub struct MemoryUsageStore {
    counter: RefCell<UsageCounter>,
}

impl MemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing counts.
    pub fn with_counter(counter: UsageCounter) -> Self {
        Self {
            counter: RefCell::new(counter),
        }
    }

    /// Snapshot of the current counts.
    pub fn snapshot(&self) -> UsageCounter {
        self.counter.borrow().clone()
    }
}

impl UsageStore for MemoryUsageStore {
    fn load(&self) -> Result<UsageCounter, StateError> {
        Ok(self.counter.borrow().clone())
    }

    fn save(&self, counter: &UsageCounter) -> Result<(), StateError> {
        *self.counter.borrow_mut() = counter.clone();
        Ok(())
    }
}
