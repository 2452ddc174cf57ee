//! Weekly metric series.
//!
//! Builds chart-ready `{categories, series}` payloads for one metric kind
//! over one season. Every series carries exactly one value per resolved week,
//! aligned by index with `categories`; weeks without samples hold `0`.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use types::{Aggregation, Member, MemberId, MetricKind, MetricSample, StatSnapshot, WeekBoundary};

use crate::error::ReportError;
use crate::season::{SeasonCatalog, week_label};

// =============================================================================
// Configuration
// =============================================================================

/// Aggregation policy per metric kind. Every kind sums unless overridden.
#[derive(Debug, Clone, Default)]
pub struct SeriesConfig {
    policies: HashMap<MetricKind, Aggregation>,
}

impl SeriesConfig {
    /// Override the policy for one kind.
    pub fn with_policy(mut self, kind: MetricKind, aggregation: Aggregation) -> Self {
        self.policies.insert(kind, aggregation);
        self
    }

    pub fn aggregation(&self, kind: MetricKind) -> Aggregation {
        self.policies.get(&kind).copied().unwrap_or_default()
    }
}

// =============================================================================
// Output
// =============================================================================

/// One named line of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesLine {
    pub name: String,
    pub data: Vec<u64>,
}

/// Chart payload: week labels plus index-aligned lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricSeries {
    pub categories: Vec<String>,
    pub series: Vec<SeriesLine>,
}

impl MetricSeries {
    fn empty() -> Self {
        Self {
            categories: Vec::new(),
            series: Vec::new(),
        }
    }
}

// =============================================================================
// Sampling
// =============================================================================

/// Place snapshots into weeks and keep one sample per (member, week).
///
/// `weeks` must already be in chronological order. A snapshot lands in the
/// first week containing its date. Snapshots tagged with another season,
/// outside every week, or without a value for `kind` are ignored. When a
/// member has several snapshots in one week the latest date wins, and on
/// equal dates the one appearing later in `snapshots` wins.
///
/// Samples come back ordered by member id, then week index.
pub fn collect_samples(
    kind: MetricKind,
    season: &str,
    weeks: &[WeekBoundary],
    snapshots: &[StatSnapshot],
) -> Vec<MetricSample> {
    let mut latest: BTreeMap<(MemberId, usize), (NaiveDate, u64)> = BTreeMap::new();

    for snapshot in snapshots {
        if snapshot.season.as_deref().is_some_and(|s| s != season) {
            continue;
        }
        let Some(value) = snapshot.value(kind) else {
            continue;
        };
        let Some(week_index) = weeks.iter().position(|w| w.contains(snapshot.recorded_on)) else {
            continue;
        };

        let key = (snapshot.member_id.clone(), week_index);
        match latest.get(&key) {
            Some((seen, _)) if *seen > snapshot.recorded_on => {}
            _ => {
                latest.insert(key, (snapshot.recorded_on, value));
            }
        }
    }

    latest
        .into_iter()
        .map(|((member_id, week_index), (_, value))| MetricSample {
            member_id,
            week_index,
            value,
        })
        .collect()
}

fn fold_weeks<'a>(
    week_count: usize,
    samples: impl IntoIterator<Item = &'a MetricSample>,
    aggregation: Aggregation,
) -> Vec<u64> {
    let mut buckets: Vec<Vec<u64>> = vec![Vec::new(); week_count];
    for sample in samples {
        if let Some(bucket) = buckets.get_mut(sample.week_index) {
            bucket.push(sample.value);
        }
    }
    buckets
        .into_iter()
        .map(|values| aggregation.apply(values))
        .collect()
}

// =============================================================================
// Builders
// =============================================================================

/// Clan-wide series for `kind` over `season_name`.
///
/// A season with no weeks yields empty `categories` and `series`.
pub fn build_series(
    kind: MetricKind,
    season_name: &str,
    catalog: &SeasonCatalog,
    snapshots: &[StatSnapshot],
    config: &SeriesConfig,
) -> Result<MetricSeries, ReportError> {
    let weeks = catalog.resolve_weeks(season_name)?;
    if weeks.is_empty() {
        return Ok(MetricSeries::empty());
    }

    let samples = collect_samples(kind, season_name, &weeks, snapshots);
    let aggregation = config.aggregation(kind);
    debug!(
        metric = kind.as_str(),
        season = season_name,
        weeks = weeks.len(),
        samples = samples.len(),
        aggregation = aggregation.as_str(),
        "Built metric series"
    );

    Ok(MetricSeries {
        categories: labels(&weeks),
        series: vec![SeriesLine {
            name: kind.display_name().to_string(),
            data: fold_weeks(weeks.len(), &samples, aggregation),
        }],
    })
}

/// Per-member series for `kind` over `season_name`.
///
/// One line per roster member plus any member that only appears in the
/// snapshots. Lines are named by nickname (falling back to the member id)
/// and ordered by name.
pub fn build_member_series(
    kind: MetricKind,
    season_name: &str,
    catalog: &SeasonCatalog,
    snapshots: &[StatSnapshot],
    roster: &[(MemberId, Member)],
    config: &SeriesConfig,
) -> Result<MetricSeries, ReportError> {
    let weeks = catalog.resolve_weeks(season_name)?;
    if weeks.is_empty() {
        return Ok(MetricSeries::empty());
    }

    let samples = collect_samples(kind, season_name, &weeks, snapshots);
    let aggregation = config.aggregation(kind);

    let mut per_member: BTreeMap<MemberId, Vec<&MetricSample>> = roster
        .iter()
        .map(|(id, _)| (id.clone(), Vec::new()))
        .collect();
    for sample in &samples {
        per_member
            .entry(sample.member_id.clone())
            .or_default()
            .push(sample);
    }

    let names: HashMap<&MemberId, &str> = roster
        .iter()
        .filter_map(|(id, member)| member.display_name().map(|name| (id, name)))
        .collect();

    let mut series: Vec<(MemberId, SeriesLine)> = per_member
        .into_iter()
        .map(|(id, member_samples)| {
            let name = names
                .get(&id)
                .map(|n| n.to_string())
                .unwrap_or_else(|| id.to_string());
            let data = fold_weeks(weeks.len(), member_samples, aggregation);
            (id, SeriesLine { name, data })
        })
        .collect();
    series.sort_by(|(a_id, a), (b_id, b)| a.name.cmp(&b.name).then_with(|| a_id.cmp(b_id)));

    debug!(
        metric = kind.as_str(),
        season = season_name,
        members = series.len(),
        "Built member metric series"
    );

    Ok(MetricSeries {
        categories: labels(&weeks),
        series: series.into_iter().map(|(_, line)| line).collect(),
    })
}

fn labels(weeks: &[WeekBoundary]) -> Vec<String> {
    weeks
        .iter()
        .enumerate()
        .map(|(i, week)| week_label(i, week))
        .collect()
}
