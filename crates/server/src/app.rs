//! Axum application builder.
//!
//! Configures routes, middleware, and state for the server.
//!
//! # Design Principles
//!
//! - **Declarative**: Routes declared via Axum's type-safe Router
//! - **Modular**: App builder separate from handlers
//! - **SoC**: Configuration here, logic in route modules
//!
//! # Routes
//!
//! - `GET /health`, `GET /health/ready` - Liveness and store readiness
//! - `GET /user/all` - Public roster keyed by member id (principal required)
//! - `GET /user/me` - The caller's own public record (principal required)
//! - `GET /user/overview` - Category counts
//! - `GET|POST /season/schedule` - Read or replace the schedule
//! - `GET /season/names` - Season names and the current season
//! - `GET /season/dates` - Week labels for a season
//! - `GET /season/metrics` - Weekly metric chart

use axum::Router;
use axum::routing::get;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::routes::{health, metrics, season, user};
use crate::state::ServerState;

/// Create the Axum application with all routes.
pub fn create_app(state: ServerState, config: &ServerConfig) -> Router {
    let router = Router::new()
        // Health endpoints
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        // Roster
        .route("/user/all", get(user::get_all))
        .route("/user/me", get(user::get_me))
        .route("/user/overview", get(user::get_overview))
        // Seasons and schedule
        .route(
            "/season/schedule",
            get(season::get_schedule).post(season::replace_schedule),
        )
        .route("/season/names", get(season::get_names))
        .route("/season/dates", get(season::get_dates))
        .route("/season/metrics", get(metrics::get_metrics))
        // Middleware
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TraceLayer::new_for_http());

    let router = if config.enable_cors {
        // Dashboard frontend is served from another origin
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .max_age(Duration::from_secs(3600));
        router.layer(cors)
    } else {
        router
    };

    router.with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Host to bind to.
    pub host: String,
    /// Attach a permissive CORS layer.
    pub enable_cors: bool,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".into(),
            enable_cors: true,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
