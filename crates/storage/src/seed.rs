//! Seed import.
//!
//! Loads a JSON seed file into whichever backend is configured. Used for
//! local development and demos.
//!
//! ```json
//! {
//!   "members":   { "m1": { "nickname": "Lune", "nationality": "FR" } },
//!   "seasons":   [ { "name": "S1", "current": true, "weeks": [ ... ] } ],
//!   "snapshots": [ { "memberId": "m1", "recordedOn": "2024-01-02", "manaSpent": 100 } ],
//!   "events":    [ { "title": "Siege", "time": "2024-01-06T20:00:00Z" } ]
//! }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use types::MemberId;

use crate::error::StoreResult;
use crate::repository::ClanRepository;

/// Contents of a seed file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    /// Member documents keyed by member id.
    pub members: IndexMap<String, Value>,
    /// Season documents; each is stored under its `name`.
    pub seasons: Vec<Value>,
    /// Snapshot documents; stored under their `id` field or their position.
    pub snapshots: Vec<Value>,
    /// The tenant's schedule. Validated like any replacement.
    pub events: Vec<Value>,
}

/// What an import wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub members: usize,
    pub seasons: usize,
    pub snapshots: usize,
    pub events: usize,
}

/// Write a seed into the repository's store.
///
/// Seasons without a name are skipped. An empty `events` section leaves any
/// existing schedule alone.
pub async fn import_seed(repo: &ClanRepository, seed: SeedData) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    for (id, doc) in seed.members {
        repo.put_member(&MemberId(id), doc).await?;
        report.members += 1;
    }

    for (index, doc) in seed.seasons.into_iter().enumerate() {
        let Some(name) = doc.get("name").and_then(Value::as_str).map(str::to_string) else {
            warn!(index, "seed season without a name skipped");
            continue;
        };
        repo.put_season(&name, doc).await?;
        report.seasons += 1;
    }

    for (index, doc) in seed.snapshots.into_iter().enumerate() {
        let id = doc
            .get("id")
            .and_then(Value::as_str)
            .map_or_else(|| format!("snapshot-{index}"), str::to_string);
        repo.put_snapshot(&id, doc).await?;
        report.snapshots += 1;
    }

    if !seed.events.is_empty() {
        report.events = repo.replace_events(seed.events).await?.len();
    }

    Ok(report)
}
