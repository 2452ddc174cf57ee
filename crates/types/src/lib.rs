//! Core types for the clan dashboard.
//!
//! This crate provides the shared data types used across the workspace:
//! roster members, seasons and their week boundaries, schedule events and
//! the metric vocabulary used when building chart series.
//!
//! Nothing here talks to a store or a socket. Records arriving from the
//! document store are decoded into these types by the `storage` crate, with
//! every missing field already resolved to its default.

pub mod ids;
pub mod member;
pub mod metric;
pub mod schedule;
pub mod season;

pub use ids::{MemberId, TenantId};
pub use member::{Member, PublicMember};
pub use metric::{Aggregation, MetricKind, MetricSample, StatSnapshot, UnknownAggregation, UnknownMetricKind};
pub use schedule::{EventError, ScheduleEvent};
pub use season::{Season, WeekBoundary};
