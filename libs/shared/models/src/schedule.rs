use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cadence {
    pub interval_days: u32,
    pub count: usize,
}

impl Default for Cadence {
    fn default() -> Self {
        Self { interval_days: 28, count: 6 }
    }
}

/// Ordered infusion dates. Consecutive entries are `cadence.interval_days`
/// apart, except that `custom_date` (when set) may break the interval
/// relative to its predecessor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfusionSchedule {
    pub entries: Vec<NaiveDate>,
    pub cadence: Cadence,
    pub custom_date: Option<NaiveDate>,
}

impl InfusionSchedule {
    pub fn anchor(&self) -> Option<NaiveDate> {
        self.entries.first().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry on or after `today`.
    pub fn next_after(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.entries.iter().copied().find(|d| *d >= today)
    }
}
