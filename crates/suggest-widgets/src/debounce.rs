#![forbid(unsafe_code)]

//! Host-ticked debounce slot.
//!
//! A [`Debounce`] counts down from the configured delay and carries the query
//! to search once it elapses. The widget keeps at most one in an `Option`;
//! scheduling a new one replaces (cancels) the old one.
//!
//! ```rust
//! use suggest_widgets::debounce::Debounce;
//! use std::time::Duration;
//!
//! let mut timer = Debounce::new("ab", Duration::from_millis(500));
//! assert!(!timer.tick(Duration::from_millis(300)));
//! assert!(timer.tick(Duration::from_millis(200)));
//! assert_eq!(timer.query(), "ab");
//! ```

use core::time::Duration;

/// A pending delayed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounce {
    query: String,
    remaining: Duration,
}

impl Debounce {
    pub fn new(query: impl Into<String>, delay: Duration) -> Self {
        Self {
            query: query.into(),
            remaining: delay,
        }
    }

    /// The query that will be searched.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    #[must_use]
    pub fn is_due(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Subtract `delta`; returns `true` once the delay has fully elapsed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(delta);
        self.is_due()
    }
}
