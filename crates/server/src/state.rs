//! Shared server state.
//!
//! Everything here is built once at start and read-only afterwards. Requests
//! recompute their views from the store, so no mutable state is shared.
//!
//! # Design Principles
//!
//! - **Declarative**: State is data, handlers extract what they need
//! - **Modular**: State independent of route logic
//! - **SoC**: State holds handles, the store owns the records

use std::sync::Arc;
use std::time::Instant;

use reports::SeriesConfig;
use storage::ClanRepository;

use crate::auth::Authenticator;

/// Shared state for all route handlers.
///
/// Cloned into each handler via Axum's State extractor.
#[derive(Clone)]
pub struct ServerState {
    /// Typed access to the document store.
    pub repo: ClanRepository,

    /// Aggregation policy per metric kind.
    pub series_config: Arc<SeriesConfig>,

    /// Bearer token resolution for principal-only routes.
    pub authenticator: Arc<dyn Authenticator>,

    /// Reported by `/health`.
    pub app_name: Arc<str>,

    /// Server start time.
    pub start_time: Instant,
}

impl ServerState {
    pub fn new(
        repo: ClanRepository,
        series_config: SeriesConfig,
        authenticator: Arc<dyn Authenticator>,
        app_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            repo,
            series_config: Arc::new(series_config),
            authenticator,
            app_name: app_name.into(),
            start_time: Instant::now(),
        }
    }

    /// Get uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
