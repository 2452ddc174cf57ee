//! Season and schedule endpoints.
//!
//! # Endpoints
//!
//! - `GET /season/schedule` - Stored schedule, in order
//! - `POST /season/schedule` - Replace the whole schedule
//! - `GET /season/names` - All season names plus the current season
//! - `GET /season/dates?season_name=X&metric_type=Y` - Week labels

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use reports::SeasonCatalog;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use types::{MetricKind, ScheduleEvent};

use crate::error::{AppError, AppResult};
use crate::state::ServerState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Schedule payload, used for both reads and replacements.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub events: Vec<ScheduleEvent>,
}

/// Body of `POST /season/schedule`. Entries are validated by the repository.
#[derive(Debug, Deserialize)]
pub struct ReplaceScheduleRequest {
    pub events: Vec<Value>,
}

/// Response for `/season/names`.
#[derive(Debug, Serialize)]
pub struct SeasonNamesResponse {
    pub total_seasons: Vec<String>,
    /// `null` when no season exists.
    pub current_season: Option<String>,
}

/// Query parameters for `/season/dates`.
#[derive(Debug, Deserialize)]
pub struct DatesQuery {
    pub season_name: Option<String>,
    /// Validated when present; labels do not depend on it.
    pub metric_type: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /season/schedule`
pub async fn get_schedule(State(state): State<ServerState>) -> AppResult<Json<ScheduleResponse>> {
    let events = state.repo.events().await?;
    Ok(Json(ScheduleResponse { events }))
}

/// `POST /season/schedule`
///
/// All-or-nothing: an invalid entry rejects the request and leaves the stored
/// schedule as it was.
pub async fn replace_schedule(
    State(state): State<ServerState>,
    payload: Result<Json<ReplaceScheduleRequest>, JsonRejection>,
) -> AppResult<Json<ScheduleResponse>> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidArgument(rejection.body_text()))?;

    let events = state.repo.replace_events(request.events).await?;
    Ok(Json(ScheduleResponse { events }))
}

/// `GET /season/names`
pub async fn get_names(State(state): State<ServerState>) -> AppResult<Json<SeasonNamesResponse>> {
    let catalog = SeasonCatalog::new(state.repo.seasons().await?);

    Ok(Json(SeasonNamesResponse {
        total_seasons: catalog.names().into_iter().map(str::to_string).collect(),
        current_season: catalog.current_season().map(str::to_string),
    }))
}

/// `GET /season/dates`
pub async fn get_dates(
    State(state): State<ServerState>,
    query: Result<Query<DatesQuery>, QueryRejection>,
) -> AppResult<Json<Vec<String>>> {
    let Query(query) = query.map_err(|rejection| AppError::InvalidArgument(rejection.body_text()))?;
    if let Some(raw) = query.metric_type.as_deref() {
        raw.parse::<MetricKind>()?;
    }
    let season_name = query
        .season_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::InvalidArgument("missing query parameter `season_name`".into()))?;

    let catalog = SeasonCatalog::new(state.repo.seasons().await?);
    let labels = catalog.week_labels(&season_name)?;
    debug!(season = %season_name, weeks = labels.len(), "Resolved week labels");
    Ok(Json(labels))
}
