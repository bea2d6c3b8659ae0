//! In-memory object store.
//!
//! Emulates the prefix/delimiter listing semantics of an S3 bucket over a
//! sorted map. Backs unit and integration tests, and local development
//! without object-store credentials.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use filegate_core::error::AppError;
use filegate_core::result::AppResult;
use filegate_core::traits::storage::{DeleteOutcome, ObjectEntry, ObjectStore, PresignedUpload};

#[derive(Debug, Clone)]
struct StoredObject {
    size: i64,
    last_modified: DateTime<Utc>,
}

/// Object store held entirely in process memory.
#[derive(Debug)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    /// Create an empty store.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Insert an object directly, bypassing the presign flow.
    pub fn insert_object(&self, key: impl Into<String>, size: i64) {
        self.objects.write().unwrap().insert(
            key.into(),
            StoredObject {
                size,
                last_modified: Utc::now(),
            },
        );
    }

    /// Whether a key currently exists.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().unwrap().contains_key(key)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().unwrap().is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn list_objects(
        &self,
        prefix: &str,
        delimiter: Option<&str>,
    ) -> AppResult<Vec<ObjectEntry>> {
        let objects = self.objects.read().unwrap();

        let mut entries = Vec::new();
        let mut common_prefixes = BTreeSet::new();

        for (key, object) in objects.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            let remainder = &key[prefix.len()..];

            if let Some(d) = delimiter {
                if let Some(pos) = remainder.find(d) {
                    common_prefixes.insert(format!("{prefix}{}{d}", &remainder[..pos]));
                    continue;
                }
            }

            entries.push(ObjectEntry::Object {
                key: key.clone(),
                size: Some(object.size),
                last_modified: Some(object.last_modified),
            });
        }

        entries.extend(
            common_prefixes
                .into_iter()
                .map(|prefix| ObjectEntry::CommonPrefix { prefix }),
        );
        Ok(entries)
    }

    async fn presign_upload(&self, key: &str, content_type: &str) -> AppResult<PresignedUpload> {
        let mut headers = std::collections::BTreeMap::new();
        headers.insert("content-type".to_string(), content_type.to_string());
        Ok(PresignedUpload {
            url: format!("memory://{}/{}", self.bucket, key),
            method: "PUT".to_string(),
            headers,
        })
    }

    async fn presign_download(&self, key: &str, expires_in: Duration) -> AppResult<String> {
        Ok(format!(
            "memory://{}/{}?expires_in={}",
            self.bucket,
            key,
            expires_in.as_secs()
        ))
    }

    async fn copy(&self, src_key: &str, dst_key: &str) -> AppResult<()> {
        let mut objects = self.objects.write().unwrap();
        let source = objects
            .get(src_key)
            .cloned()
            .ok_or_else(|| AppError::storage(format!("Source object '{src_key}' not found")))?;
        objects.insert(dst_key.to_string(), source);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.write().unwrap().remove(key);
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> AppResult<Vec<DeleteOutcome>> {
        let mut objects = self.objects.write().unwrap();
        Ok(keys
            .iter()
            .map(|key| {
                objects.remove(key);
                // Absent keys count as deleted, mirroring S3 semantics.
                DeleteOutcome {
                    key: key.clone(),
                    deleted: true,
                    error: None,
                }
            })
            .collect())
    }

    async fn put_folder_marker(&self, key: &str) -> AppResult<()> {
        self.insert_object(key, 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(keys: &[&str]) -> MemoryObjectStore {
        let store = MemoryObjectStore::new("test-bucket");
        for key in keys {
            store.insert_object(*key, 10);
        }
        store
    }

    #[tokio::test]
    async fn test_delimiter_listing_splits_objects_and_prefixes() {
        let store = store_with(&["a.txt", "docs/b.txt", "docs/sub/c.txt", "img/d.png"]);

        let entries = store.list_objects("", Some("/")).await.unwrap();

        let keys: Vec<_> = entries
            .iter()
            .filter_map(|e| match e {
                ObjectEntry::Object { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect();
        let prefixes: Vec<_> = entries
            .iter()
            .filter_map(|e| match e {
                ObjectEntry::CommonPrefix { prefix } => Some(prefix.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(keys, vec!["a.txt"]);
        assert_eq!(prefixes, vec!["docs/", "img/"]);
    }

    #[tokio::test]
    async fn test_delimiter_listing_under_prefix() {
        let store = store_with(&["docs/b.txt", "docs/sub/c.txt", "docs/sub/deep/d.txt"]);

        let entries = store.list_objects("docs/", Some("/")).await.unwrap();

        let keys: Vec<_> = entries
            .iter()
            .filter_map(|e| match e {
                ObjectEntry::Object { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect();
        let prefixes: Vec<_> = entries
            .iter()
            .filter_map(|e| match e {
                ObjectEntry::CommonPrefix { prefix } => Some(prefix.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(keys, vec!["docs/b.txt"]);
        // Both deeper levels collapse into the single first-level prefix.
        assert_eq!(prefixes, vec!["docs/sub/"]);
    }

    #[tokio::test]
    async fn test_leading_slash_key_groups_under_slash_prefix() {
        let store = store_with(&["/odd.txt", "normal.txt"]);

        let entries = store.list_objects("", Some("/")).await.unwrap();

        let prefixes: Vec<_> = entries
            .iter()
            .filter_map(|e| match e {
                ObjectEntry::CommonPrefix { prefix } => Some(prefix.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(prefixes, vec!["/"]);
    }

    #[tokio::test]
    async fn test_recursive_listing_without_delimiter() {
        let store = store_with(&["docs/b.txt", "docs/sub/c.txt"]);
        let entries = store.list_objects("docs/", None).await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_copy_and_delete() {
        let store = store_with(&["a.txt"]);
        store.copy("a.txt", "b.txt").await.unwrap();
        assert!(store.contains("b.txt"));

        assert!(store.copy("missing.txt", "c.txt").await.is_err());

        store.delete("a.txt").await.unwrap();
        assert!(!store.contains("a.txt"));
    }

    #[tokio::test]
    async fn test_delete_many_reports_every_key() {
        let store = store_with(&["a.txt", "b.txt"]);
        let outcomes = store
            .delete_many(&[
                "a.txt".to_string(),
                "b.txt".to_string(),
                "ghost.txt".to_string(),
            ])
            .await
            .unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.deleted));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_folder_marker_lists_as_prefix() {
        let store = MemoryObjectStore::new("test-bucket");
        store.put_folder_marker("reports/.keep").await.unwrap();

        let entries = store.list_objects("", Some("/")).await.unwrap();
        assert_eq!(
            entries,
            vec![ObjectEntry::CommonPrefix {
                prefix: "reports/".to_string()
            }]
        );
    }
}
