//! Server crate: Axum HTTP surface for the clan dashboard.
//!
//! Handlers are thin adapters: they fetch records through
//! [`storage::ClanRepository`], hand them to the synchronous `reports`
//! engine and serialize the result.
//!
//! # Design Principles
//!
//! - **Declarative**: Routes and handlers declared via Axum's type-safe routing
//! - **Modular**: Each feature (health, user, season, metrics) in its own module
//! - **SoC**: Storage owns persistence, `reports` owns aggregation, this crate owns HTTP
//!
//! # Modules
//!
//! - [`app`]: Axum application builder and router setup
//! - [`state`]: Shared server state (repository, series policy, authenticator)
//! - [`error`]: Unified error handling with HTTP status codes
//! - [`auth`]: Bearer-token principal extraction
//! - [`routes`]: HTTP route handlers

pub mod app;
pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use app::{ServerConfig, create_app};
pub use auth::{Authenticator, Principal, StaticTokenAuthenticator};
pub use error::{AppError, AppResult};
pub use state::ServerState;
