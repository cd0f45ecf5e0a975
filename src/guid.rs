// SPDX-License-Identifier: MPL-2.0
//! Process-unique sequential identifiers.
//!
//! Identifiers tag components, elements and listener registrations so a
//! specific registration can be found and removed later. They increase
//! monotonically and are never reused.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid(u64);

impl Guid {
    /// Issues the next identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shorthand for [`Guid::new`].
#[must_use]
pub fn new_guid() -> Guid {
    Guid::new()
}
