//! Object storage seam.
//!
//! The orchestrator talks to storage through the [`ObjectStore`] trait so
//! the core stays independent of any concrete backend. [`MemoryStore`] is
//! a [`DashMap`]-backed implementation used by tests and local runs.
//!
//! The trait uses `#[async_trait]` so implementations can be held behind
//! `Arc<dyn ObjectStore>`.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::trace;

use crate::error::{SortError, SortResult};

/// A fetched object body plus the metadata the sorter cares about.
#[derive(Debug, Clone)]
pub struct FetchedObject {
    /// The full object body.
    pub body: Bytes,
    /// Declared `Content-Encoding`, if any.
    pub content_encoding: Option<String>,
}

/// Minimal object-storage interface needed by the sorter.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's body and content encoding.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::NoSuchKey`] when the object does not exist and
    /// [`SortError::Storage`] for any other backend failure.
    async fn get_object(&self, bucket: &str, key: &str) -> SortResult<FetchedObject>;

    /// Write an object with the given content type and encoding.
    ///
    /// Writes are idempotent at the storage layer: re-running the same put
    /// overwrites rather than duplicates.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
        content_encoding: &str,
    ) -> SortResult<()>;

    /// Delete an object. A no-op when the object does not exist.
    async fn delete_object(&self, bucket: &str, key: &str) -> SortResult<()>;
}

/// Composite key identifying a stored object: `(bucket, key)`.
type StorageKey = (String, String);

/// One stored object.
#[derive(Debug, Clone)]
struct StoredObject {
    body: Bytes,
    content_type: Option<String>,
    content_encoding: Option<String>,
}

/// Thread-safe in-memory [`ObjectStore`] for tests and local runs.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use realmsort_core::{MemoryStore, ObjectStore};
///
/// # tokio_test::block_on(async {
/// let store = MemoryStore::new();
/// store
///     .put_object("logs", "a/b.txt", Bytes::from("hi\n"), "text/plain", "identity")
///     .await
///     .unwrap();
/// let fetched = store.get_object("logs", "a/b.txt").await.unwrap();
/// assert_eq!(fetched.body.as_ref(), b"hi\n");
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: DashMap<StorageKey, StoredObject>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object directly, with an optional content encoding.
    pub fn seed(&self, bucket: &str, key: &str, body: Bytes, content_encoding: Option<&str>) {
        self.objects.insert(
            (bucket.to_owned(), key.to_owned()),
            StoredObject {
                body,
                content_type: None,
                content_encoding: content_encoding.map(ToOwned::to_owned),
            },
        );
    }

    /// Whether an object exists.
    #[must_use]
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .contains_key(&(bucket.to_owned(), key.to_owned()))
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All keys currently stored in a bucket, in no particular order.
    #[must_use]
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .iter()
            .filter(|entry| entry.key().0 == bucket)
            .map(|entry| entry.key().1.clone())
            .collect()
    }

    /// The declared content type of a stored object, if any.
    #[must_use]
    pub fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        self.objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .and_then(|entry| entry.content_type.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, bucket: &str, key: &str) -> SortResult<FetchedObject> {
        let entry = self
            .objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .ok_or_else(|| SortError::NoSuchKey {
                key: key.to_owned(),
            })?;

        Ok(FetchedObject {
            body: entry.body.clone(),
            content_encoding: entry.content_encoding.clone(),
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
        content_encoding: &str,
    ) -> SortResult<()> {
        trace!(bucket, key, size = body.len(), "stored object");
        self.objects.insert(
            (bucket.to_owned(), key.to_owned()),
            StoredObject {
                body,
                content_type: Some(content_type.to_owned()),
                content_encoding: Some(content_encoding.to_owned()),
            },
        );
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> SortResult<()> {
        if self
            .objects
            .remove(&(bucket.to_owned(), key.to_owned()))
            .is_some()
        {
            trace!(bucket, key, "deleted object");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_should_put_and_get_object() {
        let store = MemoryStore::new();
        store
            .put_object("b", "k", Bytes::from("data"), "text/plain", "gzip")
            .await
            .unwrap_or_else(|e| panic!("put failed: {e}"));

        let fetched = store
            .get_object("b", "k")
            .await
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert_eq!(fetched.body.as_ref(), b"data");
        assert_eq!(fetched.content_encoding.as_deref(), Some("gzip"));
        assert_eq!(store.content_type("b", "k").as_deref(), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_should_return_no_such_key_for_missing_object() {
        let store = MemoryStore::new();
        let result = store.get_object("b", "ghost").await;
        assert!(matches!(result, Err(SortError::NoSuchKey { .. })));
    }

    #[tokio::test]
    async fn test_should_overwrite_on_repeated_put() {
        let store = MemoryStore::new();
        for body in ["one", "two"] {
            store
                .put_object("b", "k", Bytes::from(body), "text/plain", "gzip")
                .await
                .unwrap_or_else(|e| panic!("put failed: {e}"));
        }
        assert_eq!(store.len(), 1);
        let fetched = store
            .get_object("b", "k")
            .await
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert_eq!(fetched.body.as_ref(), b"two");
    }

    #[tokio::test]
    async fn test_should_delete_object_and_tolerate_missing() {
        let store = MemoryStore::new();
        store.seed("b", "k", Bytes::from("x"), None);

        store
            .delete_object("b", "k")
            .await
            .unwrap_or_else(|e| panic!("delete failed: {e}"));
        assert!(!store.contains("b", "k"));

        // Deleting again is a no-op.
        store
            .delete_object("b", "k")
            .await
            .unwrap_or_else(|e| panic!("delete failed: {e}"));
    }

    #[tokio::test]
    async fn test_should_list_keys_per_bucket() {
        let store = MemoryStore::new();
        store.seed("b1", "k1", Bytes::new(), None);
        store.seed("b1", "k2", Bytes::new(), None);
        store.seed("b2", "k3", Bytes::new(), None);

        let mut keys = store.keys("b1");
        keys.sort();
        assert_eq!(keys, vec!["k1", "k2"]);
    }
}
