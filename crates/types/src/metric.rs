//! Metric vocabulary for weekly chart series.
//!
//! A [`StatSnapshot`] is a stored per-member reading taken on a given day.
//! When a series is built, each snapshot is placed into a season week and
//! becomes a [`MetricSample`]; samples are then folded per week with the
//! [`Aggregation`] configured for the [`MetricKind`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::MemberId;

// =============================================================================
// MetricKind
// =============================================================================

/// A category of tracked statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    ManaSpent,
    Kills,
    Deads,
    Merits,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::ManaSpent,
        MetricKind::Kills,
        MetricKind::Deads,
        MetricKind::Merits,
    ];

    /// Wire name (`mana_spent`, `kills`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::ManaSpent => "mana_spent",
            MetricKind::Kills => "kills",
            MetricKind::Deads => "deads",
            MetricKind::Merits => "merits",
        }
    }

    /// Series name shown in charts.
    pub fn display_name(self) -> &'static str {
        match self {
            MetricKind::ManaSpent => "Mana Spent",
            MetricKind::Kills => "Kills",
            MetricKind::Deads => "Deaths",
            MetricKind::Merits => "Merits",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected metric kind string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric kind `{0}` (expected one of: mana_spent, kills, deads, merits)")]
pub struct UnknownMetricKind(pub String);

impl FromStr for MetricKind {
    type Err = UnknownMetricKind;

    /// Case-insensitive; `_`, `-` and spaces are ignored, so `MANA_SPENT`,
    /// `manaSpent` and `mana-spent` all parse. `deaths` is accepted for `deads`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "manaspent" | "mana" => Ok(MetricKind::ManaSpent),
            "kills" | "unitskilled" => Ok(MetricKind::Kills),
            "deads" | "deaths" | "unitsdead" => Ok(MetricKind::Deads),
            "merits" => Ok(MetricKind::Merits),
            _ => Err(UnknownMetricKind(s.to_string())),
        }
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// How the samples of one week are folded into a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    #[default]
    Sum,
    Max,
    /// Number of samples, regardless of their values.
    Count,
}

impl Aggregation {
    /// Fold values. An empty input yields `0` for every policy.
    pub fn apply(self, values: impl IntoIterator<Item = u64>) -> u64 {
        let values = values.into_iter();
        match self {
            Aggregation::Sum => values.fold(0u64, u64::saturating_add),
            Aggregation::Max => values.max().unwrap_or(0),
            Aggregation::Count => values.count() as u64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Max => "max",
            Aggregation::Count => "count",
        }
    }
}

/// Rejected aggregation string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown aggregation `{0}` (expected sum, max or count)")]
pub struct UnknownAggregation(pub String);

impl FromStr for Aggregation {
    type Err = UnknownAggregation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "max" => Ok(Aggregation::Max),
            "count" => Ok(Aggregation::Count),
            _ => Err(UnknownAggregation(s.to_string())),
        }
    }
}

// =============================================================================
// Snapshots and samples
// =============================================================================

/// One stored reading of a member's weekly statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSnapshot {
    pub member_id: MemberId,
    /// Season the reading was taken for, when the writer recorded it.
    pub season: Option<String>,
    pub recorded_on: NaiveDate,
    pub mana_spent: Option<u64>,
    pub units_killed: Option<u64>,
    pub units_dead: Option<u64>,
    pub merits: Option<u64>,
}

impl StatSnapshot {
    /// Snapshot with no metric values set.
    pub fn new(member_id: impl Into<MemberId>, recorded_on: NaiveDate) -> Self {
        Self {
            member_id: member_id.into(),
            season: None,
            recorded_on,
            mana_spent: None,
            units_killed: None,
            units_dead: None,
            merits: None,
        }
    }

    /// Set one metric value.
    pub fn with(mut self, kind: MetricKind, value: u64) -> Self {
        match kind {
            MetricKind::ManaSpent => self.mana_spent = Some(value),
            MetricKind::Kills => self.units_killed = Some(value),
            MetricKind::Deads => self.units_dead = Some(value),
            MetricKind::Merits => self.merits = Some(value),
        }
        self
    }

    pub fn in_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    /// Value recorded for `kind`, if any.
    pub fn value(&self, kind: MetricKind) -> Option<u64> {
        match kind {
            MetricKind::ManaSpent => self.mana_spent,
            MetricKind::Kills => self.units_killed,
            MetricKind::Deads => self.units_dead,
            MetricKind::Merits => self.merits,
        }
    }
}

/// A snapshot value aligned to a week of a season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSample {
    pub member_id: MemberId,
    /// 0-based index into the season's chronologically sorted weeks.
    pub week_index: usize,
    pub value: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_kind_parsing() {
        assert_eq!("MANA_SPENT".parse::<MetricKind>().unwrap(), MetricKind::ManaSpent);
        assert_eq!("manaSpent".parse::<MetricKind>().unwrap(), MetricKind::ManaSpent);
        assert_eq!("kills".parse::<MetricKind>().unwrap(), MetricKind::Kills);
        assert_eq!("DEADS".parse::<MetricKind>().unwrap(), MetricKind::Deads);
        assert_eq!("deaths".parse::<MetricKind>().unwrap(), MetricKind::Deads);
        assert_eq!("Merits".parse::<MetricKind>().unwrap(), MetricKind::Merits);
    }

    #[test]
    fn test_metric_kind_rejects_unknown() {
        let err = "gold".parse::<MetricKind>().unwrap_err();
        assert_eq!(err, UnknownMetricKind("gold".into()));
        assert!("".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_metric_kind_round_trips_wire_name() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.as_str().parse::<MetricKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_aggregation_apply() {
        let values = [100, 200, 50];
        assert_eq!(Aggregation::Sum.apply(values), 350);
        assert_eq!(Aggregation::Max.apply(values), 200);
        assert_eq!(Aggregation::Count.apply(values), 3);
    }

    #[test]
    fn test_aggregation_empty_is_zero() {
        for policy in [Aggregation::Sum, Aggregation::Max, Aggregation::Count] {
            assert_eq!(policy.apply(std::iter::empty()), 0);
        }
    }

    #[test]
    fn test_aggregation_sum_saturates() {
        assert_eq!(Aggregation::Sum.apply([u64::MAX, 1]), u64::MAX);
    }

    #[test]
    fn test_snapshot_value_lookup() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let snap = StatSnapshot::new("m1", date)
            .with(MetricKind::Kills, 7)
            .in_season("S1");
        assert_eq!(snap.value(MetricKind::Kills), Some(7));
        assert_eq!(snap.value(MetricKind::Merits), None);
        assert_eq!(snap.season.as_deref(), Some("S1"));
    }
}
