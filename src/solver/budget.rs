//! Wall-clock budget for a solve.
//!
//! The process holds a fixed total budget measured from an external start
//! event. Each solver call receives whatever is left of it.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default total runtime budget (10 minutes).
pub const DEFAULT_TOTAL_BUDGET: Duration = Duration::from_secs(600);

/// Source of elapsed wall-clock time since an external start event.
pub trait Stopwatch {
    /// Time elapsed since the start event.
    fn elapsed(&self) -> Duration;
}

impl Stopwatch for Instant {
    fn elapsed(&self) -> Duration {
        Instant::elapsed(self)
    }
}

/// A fixed reading.
impl Stopwatch for Duration {
    fn elapsed(&self) -> Duration {
        *self
    }
}

/// Total runtime budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBudget {
    total: Duration,
}

impl TimeBudget {
    /// Creates a budget of `total`.
    pub fn new(total: Duration) -> Self {
        Self { total }
    }

    /// Total budget.
    #[inline]
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Time left after `elapsed`, floored at zero.
    #[inline]
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.total.saturating_sub(elapsed)
    }

    /// Whether nothing is left after `elapsed`.
    #[inline]
    pub fn is_exhausted(&self, elapsed: Duration) -> bool {
        self.remaining(elapsed).is_zero()
    }
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_BUDGET)
    }
}
