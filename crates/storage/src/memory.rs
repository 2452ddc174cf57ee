//! In-memory backend.
//!
//! Used for tests, demos and single-process deployments seeded at start.

use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

use crate::document::{DocumentStore, check_collection};
use crate::error::StoreResult;

type Collection = IndexMap<String, Value>;

/// Collections held in insertion-ordered maps behind one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_all(&self, collection: &str) -> StoreResult<Vec<(String, Value)>> {
        check_collection(collection)?;
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        check_collection(collection)?;
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn put(&self, collection: &str, id: &str, document: Value) -> StoreResult<()> {
        check_collection(collection)?;
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryStore::new();
        store.put("members", "a", json!({"nickname": "Ana"})).await.unwrap();

        let doc = store.get_by_id("members", "a").await.unwrap();
        assert_eq!(doc, Some(json!({"nickname": "Ana"})));
        assert_eq!(store.get_by_id("members", "b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_all_keeps_insertion_order() {
        let store = MemoryStore::new();
        for id in ["c", "a", "b"] {
            store.put("seasons", id, json!({})).await.unwrap();
        }
        // Replacing keeps the original position
        store.put("seasons", "c", json!({"v": 2})).await.unwrap();

        let ids: Vec<String> = store
            .get_all("seasons")
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(store.len("seasons"), 3);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.get_all("nothing").await.unwrap().is_empty());
        assert!(store.is_empty("nothing"));
    }

    #[tokio::test]
    async fn test_rejects_bad_collection_name() {
        let store = MemoryStore::new();
        assert!(store.put("../x", "a", json!({})).await.is_err());
    }
}
