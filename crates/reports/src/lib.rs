//! Aggregation engine for the clan dashboard.
//!
//! Everything in this crate is synchronous and pure: callers fetch records
//! through the `storage` crate first, then hand the in-memory data here.
//!
//! # Modules
//!
//! - [`roster`] - Categorical counts and the public member projection
//! - [`season`] - Season lookup, week ordering and the current season
//! - [`series`] - Weekly metric series aligned with week labels
//!
//! # Example
//!
//! ```
//! use reports::{SeasonCatalog, SeriesConfig, build_series};
//! use types::{MetricKind, Season, StatSnapshot, WeekBoundary};
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let catalog = SeasonCatalog::new(vec![Season::new(
//!     "S1",
//!     vec![
//!         WeekBoundary::new(day(1), day(7)).unwrap(),
//!         WeekBoundary::new(day(8), day(14)).unwrap(),
//!     ],
//! )]);
//! let snapshots = vec![
//!     StatSnapshot::new("a", day(2)).with(MetricKind::ManaSpent, 100),
//!     StatSnapshot::new("b", day(3)).with(MetricKind::ManaSpent, 200),
//! ];
//!
//! let chart = build_series(
//!     MetricKind::ManaSpent,
//!     "S1",
//!     &catalog,
//!     &snapshots,
//!     &SeriesConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(chart.categories, vec!["Week 1 (2024-01-01)", "Week 2 (2024-01-08)"]);
//! assert_eq!(chart.series[0].data, vec![300, 0]);
//! ```

mod error;
pub mod roster;
pub mod season;
pub mod series;

pub use error::ReportError;
pub use roster::{CategoryField, RosterSummary, UNKNOWN_CATEGORY, project, project_roster, summarize};
pub use season::{SeasonCatalog, week_label};
pub use series::{
    MetricSeries, SeriesConfig, SeriesLine, build_member_series, build_series, collect_samples,
};
