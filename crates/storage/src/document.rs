use async_trait::async_trait;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Collection names used by the dashboard.
pub mod collections {
    /// Roster entries, keyed by member id.
    pub const MEMBERS: &str = "members";
    /// Season definitions, keyed by season name.
    pub const SEASONS: &str = "seasons";
    /// Per-member weekly metric readings.
    pub const SNAPSHOTS: &str = "snapshots";
    /// One `{ "events": [...] }` document per tenant.
    pub const SCHEDULES: &str = "schedules";
}

/// Untyped document store.
///
/// Documents are JSON values keyed by id inside named collections.
///
/// # Contract
///
/// - `get_all` yields documents in insertion order. Re-putting an existing
///   id replaces the document and keeps its position.
/// - `put` replaces a single document atomically: readers observe either the
///   previous or the new document.
/// - Writes to one collection are serialized by the backend.
/// - An unknown collection reads as empty.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_all(&self, collection: &str) -> StoreResult<Vec<(String, Value)>>;

    async fn get_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    async fn put(&self, collection: &str, id: &str, document: Value) -> StoreResult<()>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

/// Reject names that could escape a backend's namespace.
pub(crate) fn check_collection(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_collection() {
        assert!(check_collection(collections::MEMBERS).is_ok());
        assert!(check_collection("team-2_b").is_ok());
        assert!(check_collection("").is_err());
        assert!(check_collection("../etc").is_err());
        assert!(check_collection("a/b").is_err());
    }
}
