//! Health check endpoints.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness probe (always 200 if server is up)
//! - `GET /health/ready` - Readiness probe (ready once a store round-trip succeeds)

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tracing::warn;

use crate::state::ServerState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: &'static str,
    pub app: String,
    pub version: &'static str,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Document store backend in use.
    pub store: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether server is ready.
    pub ready: bool,
    /// Readiness reason.
    pub reason: String,
}

/// Liveness probe: `GET /health`
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        app: state.app_name.to_string(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime_secs(),
        store: state.repo.backend(),
    })
}

/// Readiness probe: `GET /health/ready`
///
/// Always 200; `ready` is false while the store cannot be reached.
pub async fn ready(State(state): State<ServerState>) -> Json<ReadyResponse> {
    let (ready, reason) = match state.repo.ping().await {
        Ok(()) => (true, "store reachable".to_string()),
        Err(err) => {
            warn!(error = %err, "Readiness check failed");
            (false, err.to_string())
        }
    };

    Json(ReadyResponse { ready, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            app: "clan".into(),
            version: "0.1.0",
            uptime_secs: 60,
            store: "memory",
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"uptime_secs\":60"));
    }

    #[test]
    fn test_ready_response_serialization() {
        let response = ReadyResponse {
            ready: false,
            reason: "store unavailable: refused".into(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"ready\":false"));
    }
}
