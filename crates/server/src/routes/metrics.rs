//! Weekly metric charts.
//!
//! `GET /season/metrics?season_name=S1&metric_type=mana_spent&breakdown=member`
//!
//! `season_name` defaults to the current season. `breakdown` is `total`
//! (one clan-wide line, the default) or `member` (one line per member).

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use reports::{MetricSeries, SeasonCatalog};
use serde::Deserialize;
use types::MetricKind;

use crate::error::{AppError, AppResult};
use crate::state::ServerState;

/// Line grouping of a chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakdown {
    #[default]
    Total,
    Member,
}

/// Query parameters for `/season/metrics`.
#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub season_name: Option<String>,
    pub metric_type: Option<String>,
    #[serde(default)]
    pub breakdown: Breakdown,
}

/// `GET /season/metrics`
pub async fn get_metrics(
    State(state): State<ServerState>,
    query: Result<Query<MetricsQuery>, QueryRejection>,
) -> AppResult<Json<MetricSeries>> {
    let Query(query) = query.map_err(|rejection| AppError::InvalidArgument(rejection.body_text()))?;
    let kind: MetricKind = query
        .metric_type
        .as_deref()
        .ok_or_else(|| AppError::InvalidArgument("missing query parameter `metric_type`".into()))?
        .parse()?;

    let catalog = SeasonCatalog::new(state.repo.seasons().await?);
    let season_name = match query.season_name.filter(|name| !name.is_empty()) {
        Some(name) => name,
        None => catalog.require_current()?.to_string(),
    };
    // Fail on an unknown season before reading snapshots
    catalog.get(&season_name)?;

    let snapshots = state.repo.snapshots().await?;
    let config = state.series_config.as_ref();

    let chart = match query.breakdown {
        Breakdown::Total => {
            reports::build_series(kind, &season_name, &catalog, &snapshots, config)?
        }
        Breakdown::Member => {
            let roster = state.repo.members().await?;
            reports::build_member_series(kind, &season_name, &catalog, &snapshots, &roster, config)?
        }
    };

    Ok(Json(chart))
}
