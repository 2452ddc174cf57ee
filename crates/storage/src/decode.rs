//! Raw document decoding.
//!
//! The store holds whatever external writers put there. Decoding here never
//! fails on wrong types: a field that cannot be read becomes its default.
//! Only documents missing the fields that identify them (a snapshot without a
//! member or date) are dropped, with a warning.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::warn;
use types::{Member, MemberId, ScheduleEvent, Season, StatSnapshot, WeekBoundary};

// =============================================================================
// Field readers
// =============================================================================

fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Non-negative count from an integer, a non-negative float (truncated) or a
/// numeric string.
fn count(fields: &Map<String, Value>, key: &str) -> Option<u64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|f| f.is_finite())
}

fn flag(fields: &Map<String, Value>, key: &str) -> bool {
    matches!(fields.get(key), Some(Value::Bool(true)))
}

fn date(value: Option<&Value>) -> Option<NaiveDate> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            // Accept full timestamps by reading the date prefix
            let day = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

// =============================================================================
// Records
// =============================================================================

/// Decode a member document. Non-object documents decode to the default.
pub fn member(document: &Value) -> Member {
    let Some(fields) = document.as_object() else {
        return Member::default();
    };

    let labels = match fields.get("labels") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    Member {
        nationality: text(fields, "nationality"),
        main_troops: text(fields, "mainTroops"),
        nickname: text(fields, "nickname"),
        highest_power: number(fields, "highestPower"),
        units_killed: count(fields, "unitsKilled"),
        units_dead: count(fields, "unitsDead"),
        mana_spent: count(fields, "manaSpent"),
        is_infantry_group: flag(fields, "isInfantryGroup"),
        labels,
        email: text(fields, "email"),
    }
}

/// Decode a season document stored under `id`.
///
/// The name comes from the `name` field, falling back to the id. Week
/// entries with unreadable dates or `end < start` are skipped.
pub fn season(id: &str, document: &Value) -> Season {
    let empty = Map::new();
    let fields = document.as_object().unwrap_or(&empty);
    let name = text(fields, "name")
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| id.to_string());

    let weeks = match fields.get("weeks") {
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let week = date(entry.get("start"))
                    .zip(date(entry.get("end")))
                    .and_then(|(start, end)| WeekBoundary::new(start, end));
                if week.is_none() {
                    warn!(season = %name, index, "skipping unreadable week boundary");
                }
                week
            })
            .collect(),
        _ => Vec::new(),
    };

    Season {
        name,
        weeks,
        current: flag(fields, "current"),
    }
}

/// Decode a snapshot document. Returns `None` without a member id or date.
pub fn snapshot(id: &str, document: &Value) -> Option<StatSnapshot> {
    let fields = document.as_object()?;
    let member_id = text(fields, "memberId").filter(|m| !m.trim().is_empty());
    let recorded_on = date(fields.get("recordedOn"));

    let (Some(member_id), Some(recorded_on)) = (member_id, recorded_on) else {
        warn!(snapshot = id, "skipping snapshot without memberId or recordedOn");
        return None;
    };

    Some(StatSnapshot {
        member_id: MemberId(member_id),
        season: text(fields, "season"),
        recorded_on,
        mana_spent: count(fields, "manaSpent"),
        units_killed: count(fields, "unitsKilled"),
        units_dead: count(fields, "unitsDead"),
        merits: count(fields, "merits"),
    })
}

/// Decode a stored schedule document (`{ "events": [...] }`).
///
/// Stored schedules were validated on write; entries that no longer validate
/// are skipped rather than failing the whole read.
pub fn schedule(document: &Value) -> Vec<ScheduleEvent> {
    let Some(Value::Array(entries)) = document.get("events") else {
        return Vec::new();
    };

    entries
        .iter()
        .cloned()
        .enumerate()
        .filter_map(|(index, entry)| match ScheduleEvent::from_value(index, entry) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(error = %e, "skipping stored schedule event");
                None
            }
        })
        .collect()
}
