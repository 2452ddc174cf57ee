//! Route handlers for the server.
//!
//! # Modules
//!
//! - [`health`]: Health and readiness endpoints
//! - [`user`]: Roster projection, the caller's record and category counts
//! - [`season`]: Schedule read/replace, season names and week labels
//! - [`metrics`]: Weekly metric charts

pub mod health;
pub mod metrics;
pub mod season;
pub mod user;
