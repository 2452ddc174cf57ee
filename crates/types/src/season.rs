//! Seasons and their week boundaries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar range of one competitive week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekBoundary {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekBoundary {
    /// Create a boundary. Returns `None` when `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (end >= start).then_some(Self { start, end })
    }

    /// Whether `date` falls within the week, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A named competitive period subdivided into weeks.
///
/// Seasons are written by an external tool; the dashboard only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Unique key.
    pub name: String,
    /// Week boundaries as stored. Not guaranteed to be sorted.
    pub weeks: Vec<WeekBoundary>,
    /// Flagged as the running season.
    #[serde(default)]
    pub current: bool,
}

impl Season {
    pub fn new(name: impl Into<String>, weeks: Vec<WeekBoundary>) -> Self {
        Self {
            name: name.into(),
            weeks,
            current: false,
        }
    }

    /// Mark this season as current.
    pub fn flagged_current(mut self) -> Self {
        self.current = true;
        self
    }
}
