use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Longest review interval ever scheduled (about a century).
pub const MAX_INTERVAL_DAYS: f64 = 36_500.0;
/// Saved repetition counts above this are treated as corrupt.
pub const MAX_REPETITIONS: u32 = 100_000;

/// Per-problem SM-2 review statistics, keyed by [`crate::Problem::key`].
pub type StatsMap = BTreeMap<String, ReviewStats>;

/// Review statistics for one problem key.
///
/// Missing fields in saved state fall back to the values of a never-seen problem,
/// and the older `interval` / `nextReview` names are still accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewStats {
    pub repetitions: u32,
    #[serde(alias = "interval")]
    pub interval_days: f64,
    pub ease_factor: f64,
    #[serde(alias = "nextReview")]
    pub next_review_epoch_ms: i64,
}

impl Default for ReviewStats {
    fn default() -> Self {
        Self {
            repetitions: 0,
            interval_days: 0.0,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review_epoch_ms: 0,
        }
    }
}

impl ReviewStats {
    pub fn is_due(&self, now_epoch_ms: i64) -> bool {
        self.next_review_epoch_ms <= now_epoch_ms
    }

    /// Checks values read from saved state. Returns `None` for entries no
    /// scheduler could have produced; an ease factor below the floor is raised to it.
    pub fn validated(self) -> Option<Self> {
        let interval_ok = self.interval_days.is_finite()
            && (0.0..=MAX_INTERVAL_DAYS).contains(&self.interval_days);
        if !interval_ok || !self.ease_factor.is_finite() || self.repetitions > MAX_REPETITIONS {
            return None;
        }
        Some(Self {
            ease_factor: self.ease_factor.max(MIN_EASE_FACTOR),
            ..self
        })
    }
}
