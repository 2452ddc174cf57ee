//! JSON file backend.
//!
//! One `<collection>.json` file per collection inside a data directory. Each
//! file holds a JSON object mapping id to document, in insertion order.
//!
//! Writes load the collection, apply the change, write a sibling temporary
//! file and rename it over the original, so a reader always sees a complete
//! file. An async mutex serializes writers.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::document::{DocumentStore, check_collection};
use crate::error::{StoreError, StoreResult};

type Collection = IndexMap<String, Value>;

/// File-per-collection store rooted at a directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    async fn load(&self, collection: &str) -> StoreResult<Collection> {
        let path = self.collection_path(collection);
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
                collection: collection.to_string(),
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Collection::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get_all(&self, collection: &str) -> StoreResult<Vec<(String, Value)>> {
        check_collection(collection)?;
        Ok(self.load(collection).await?.into_iter().collect())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        check_collection(collection)?;
        Ok(self.load(collection).await?.shift_remove(id))
    }

    async fn put(&self, collection: &str, id: &str, document: Value) -> StoreResult<()> {
        check_collection(collection)?;
        let _guard = self.write_lock.lock().await;

        let mut docs = self.load(collection).await?;
        docs.insert(id.to_string(), document);

        let bytes = serde_json::to_vec_pretty(&docs)?;
        let target = self.collection_path(collection);
        let staging = self.root.join(format!("{collection}.json.tmp"));
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &target).await?;

        tracing::debug!(collection, id, documents = docs.len(), "collection written");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(dir.path()).await.unwrap();
            store.put("members", "m1", json!({"nickname": "Bo"})).await.unwrap();
            store.put("members", "m0", json!({"nickname": "Al"})).await.unwrap();
        }

        let store = FileStore::open(dir.path()).await.unwrap();
        let all = store.get_all("members").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, "m1");
        assert_eq!(all[1].0, "m0");
        assert_eq!(
            store.get_by_id("members", "m0").await.unwrap(),
            Some(json!({"nickname": "Al"}))
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_collection() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        assert!(store.get_all("seasons").await.unwrap().is_empty());
        assert!(store.get_by_id("seasons", "S1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("seasons.json"), b"{not json").unwrap();

        let store = FileStore::open(dir.path()).await.unwrap();
        let err = store.get_all("seasons").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_no_staging_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        store.put("schedules", "default", json!({"events": []})).await.unwrap();

        assert!(dir.path().join("schedules.json").exists());
        assert!(!dir.path().join("schedules.json.tmp").exists());
    }
}
