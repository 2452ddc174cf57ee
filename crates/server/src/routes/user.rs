//! Roster endpoints.
//!
//! # Endpoints
//!
//! - `GET /user/all` - Public roster keyed by member id (principal required)
//! - `GET /user/me` - The caller's public record (principal required)
//! - `GET /user/overview` - Member counts per nationality and troop type

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use reports::CategoryField;
use serde::Serialize;
use tracing::debug;
use types::{MemberId, PublicMember};

use crate::auth::Principal;
use crate::error::{AppError, AppResult};
use crate::state::ServerState;

// =============================================================================
// Response Types
// =============================================================================

/// Response for `/user/overview`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub total_users: usize,
    pub main_troops: BTreeMap<String, u64>,
    pub nationality: BTreeMap<String, u64>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /user/all`
pub async fn get_all(
    principal: Principal,
    State(state): State<ServerState>,
) -> AppResult<Json<BTreeMap<MemberId, PublicMember>>> {
    let roster = state.repo.members().await?;
    debug!(caller = %principal.id, members = roster.len(), "Projecting roster");
    Ok(Json(reports::project_roster(&roster)))
}

/// `GET /user/me`
pub async fn get_me(
    principal: Principal,
    State(state): State<ServerState>,
) -> AppResult<Json<PublicMember>> {
    let member = state
        .repo
        .member(&principal.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("member '{}' not found", principal.id)))?;
    Ok(Json(reports::project(&member)))
}

/// `GET /user/overview`
pub async fn get_overview(State(state): State<ServerState>) -> AppResult<Json<OverviewResponse>> {
    let members: Vec<_> = state
        .repo
        .members()
        .await?
        .into_iter()
        .map(|(_, member)| member)
        .collect();

    let summary = reports::summarize(&members);
    Ok(Json(OverviewResponse {
        total_users: summary.total_count,
        main_troops: summary.counts(CategoryField::MainTroops).clone(),
        nationality: summary.counts(CategoryField::Nationality).clone(),
    }))
}
