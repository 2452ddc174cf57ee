//! Typed access to the dashboard's collections.
//!
//! [`ClanRepository`] is the only way the rest of the workspace reads or
//! writes the store. Every call runs under a deadline; a backend that does
//! not answer in time yields [`StoreError::Timeout`] instead of hanging the
//! request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tracing::{debug, info};
use types::{Member, MemberId, ScheduleEvent, Season, StatSnapshot, TenantId};

use crate::decode;
use crate::document::{DocumentStore, collections};
use crate::error::{StoreError, StoreResult};

/// Deadline applied to each store call unless configured otherwise.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Typed repository over a [`DocumentStore`], scoped to one tenant.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct ClanRepository {
    store: Arc<dyn DocumentStore>,
    tenant: TenantId,
    deadline: Duration,
}

impl ClanRepository {
    pub fn new(store: Arc<dyn DocumentStore>, tenant: TenantId) -> Self {
        Self {
            store,
            tenant,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Set the per-call deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    async fn within<T, F>(&self, operation: &'static str, call: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match tokio::time::timeout(self.deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                operation,
                timeout_ms: u64::try_from(self.deadline.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// All members in stored order.
    pub async fn members(&self) -> StoreResult<Vec<(MemberId, Member)>> {
        let docs = self
            .within("members", self.store.get_all(collections::MEMBERS))
            .await?;
        debug!(count = docs.len(), "roster loaded");
        Ok(docs
            .into_iter()
            .map(|(id, doc)| (MemberId(id), decode::member(&doc)))
            .collect())
    }

    pub async fn member(&self, id: &MemberId) -> StoreResult<Option<Member>> {
        let doc = self
            .within("member", self.store.get_by_id(collections::MEMBERS, id.as_str()))
            .await?;
        Ok(doc.as_ref().map(decode::member))
    }

    pub async fn put_member(&self, id: &MemberId, document: Value) -> StoreResult<()> {
        self.within(
            "put_member",
            self.store.put(collections::MEMBERS, id.as_str(), document),
        )
        .await
    }

    // ========================================================================
    // Seasons and snapshots
    // ========================================================================

    /// All seasons in stored order.
    pub async fn seasons(&self) -> StoreResult<Vec<Season>> {
        let docs = self
            .within("seasons", self.store.get_all(collections::SEASONS))
            .await?;
        Ok(docs
            .iter()
            .map(|(id, doc)| decode::season(id, doc))
            .collect())
    }

    pub async fn put_season(&self, name: &str, document: Value) -> StoreResult<()> {
        self.within("put_season", self.store.put(collections::SEASONS, name, document))
            .await
    }

    /// All readable snapshots in stored order.
    pub async fn snapshots(&self) -> StoreResult<Vec<StatSnapshot>> {
        let docs = self
            .within("snapshots", self.store.get_all(collections::SNAPSHOTS))
            .await?;
        let total = docs.len();
        let snapshots: Vec<StatSnapshot> = docs
            .iter()
            .filter_map(|(id, doc)| decode::snapshot(id, doc))
            .collect();
        debug!(total, usable = snapshots.len(), "snapshots loaded");
        Ok(snapshots)
    }

    pub async fn put_snapshot(&self, id: &str, document: Value) -> StoreResult<()> {
        self.within("put_snapshot", self.store.put(collections::SNAPSHOTS, id, document))
            .await
    }

    // ========================================================================
    // Schedule
    // ========================================================================

    /// The tenant's schedule. Empty if none has been stored yet.
    pub async fn events(&self) -> StoreResult<Vec<ScheduleEvent>> {
        let doc = self
            .within(
                "events",
                self.store
                    .get_by_id(collections::SCHEDULES, self.tenant.as_str()),
            )
            .await?;
        Ok(doc.as_ref().map(decode::schedule).unwrap_or_default())
    }

    /// Replace the tenant's schedule wholesale.
    ///
    /// The whole list is validated first; on any violation nothing is
    /// written. The new list is committed as one document.
    pub async fn replace_events(&self, events: Vec<Value>) -> StoreResult<Vec<ScheduleEvent>> {
        let events = ScheduleEvent::validate_all(events)?;
        let document = json!({ "events": serde_json::to_value(&events)? });

        self.within(
            "replace_events",
            self.store
                .put(collections::SCHEDULES, self.tenant.as_str(), document),
        )
        .await?;

        info!(tenant = %self.tenant, count = events.len(), "schedule replaced");
        Ok(events)
    }

    /// Cheap round-trip used by readiness checks.
    pub async fn ping(&self) -> StoreResult<()> {
        self.within(
            "ping",
            self.store
                .get_by_id(collections::SCHEDULES, self.tenant.as_str()),
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use async_trait::async_trait;
    use types::EventError;

    fn repo() -> ClanRepository {
        ClanRepository::new(Arc::new(MemoryStore::new()), TenantId::from("clan-a"))
    }

    /// Backend that never answers.
    struct StalledStore;

    #[async_trait]
    impl DocumentStore for StalledStore {
        async fn get_all(&self, _: &str) -> StoreResult<Vec<(String, Value)>> {
            std::future::pending().await
        }

        async fn get_by_id(&self, _: &str, _: &str) -> StoreResult<Option<Value>> {
            std::future::pending().await
        }

        async fn put(&self, _: &str, _: &str, _: Value) -> StoreResult<()> {
            std::future::pending().await
        }

        fn backend(&self) -> &'static str {
            "stalled"
        }
    }

    #[tokio::test]
    async fn test_members_are_decoded_with_defaults() {
        let repo = repo();
        repo.put_member(&MemberId::from("m1"), json!({"nationality": "FR"}))
            .await
            .unwrap();

        let members = repo.members().await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].0, MemberId::from("m1"));
        assert_eq!(members[0].1.nationality.as_deref(), Some("FR"));
        assert!(members[0].1.labels.is_empty());
    }

    #[tokio::test]
    async fn test_events_empty_before_first_write() {
        assert!(repo().events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_events_round_trip() {
        let repo = repo();
        let submitted = vec![
            json!({"title": "B", "time": "2"}),
            json!({"title": "A", "time": "1", "notes": "first"}),
        ];

        repo.replace_events(submitted).await.unwrap();
        let events = repo.events().await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "B");
        assert_eq!(events[1].title, "A");
        assert_eq!(events[1].metadata.get("notes"), Some(&json!("first")));
    }

    #[tokio::test]
    async fn test_invalid_replace_leaves_schedule_untouched() {
        let repo = repo();
        repo.replace_events(vec![json!({"title": "Keep", "time": "now"})])
            .await
            .unwrap();

        let err = repo
            .replace_events(vec![json!({"title": "New", "time": "later"}), json!({"time": "x"})])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidEvents(EventError::MissingField { index: 1, .. })
        ));

        let events = repo.events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Keep");
    }

    #[tokio::test]
    async fn test_schedules_are_per_tenant() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let a = ClanRepository::new(store.clone(), TenantId::from("a"));
        let b = ClanRepository::new(store, TenantId::from("b"));

        a.replace_events(vec![json!({"title": "A", "time": "1"})])
            .await
            .unwrap();
        assert!(b.events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stalled_backend_times_out() {
        let repo = ClanRepository::new(Arc::new(StalledStore), TenantId::default())
            .with_deadline(Duration::from_millis(20));

        let err = repo.members().await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Timeout {
                operation: "members",
                timeout_ms: 20
            }
        ));
        assert!(err.is_retryable());
    }
}
