//! File-backed collection repository
//!
//! Each collection lives in its own pretty-printed JSON array file under
//! the data directory. Appends rewrite the whole file through a temporary
//! sibling and an atomic rename, so readers only ever see complete files.
//! A per-collection mutex serializes read-modify-write cycles.

use fitness_tracker_shared::Collection;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Collection storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Collection file {path} is not a JSON array: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-collection write locks
#[derive(Default)]
struct CollectionLocks {
    weight_log: Mutex<()>,
    workouts: Mutex<()>,
    meals: Mutex<()>,
}

impl CollectionLocks {
    fn get(&self, collection: Collection) -> &Mutex<()> {
        match collection {
            Collection::WeightLog => &self.weight_log,
            Collection::Workouts => &self.workouts,
            Collection::Meals => &self.meals,
        }
    }
}

/// Repository over the collection files. Cloning is O(1).
#[derive(Clone)]
pub struct CollectionRepository {
    data_dir: Arc<PathBuf>,
    locks: Arc<CollectionLocks>,
}

impl CollectionRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Arc::new(data_dir.into()),
            locks: Arc::new(CollectionLocks::default()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing a collection
    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    /// Create the data directory if it does not exist yet
    pub async fn ensure_data_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(self.data_dir.as_path())
            .await
            .map_err(|source| StoreError::Io {
                path: self.data_dir.to_path_buf(),
                source,
            })
    }

    /// Whether the data directory exists and accepts new files
    pub async fn is_writable(&self) -> bool {
        let is_dir = fs::metadata(self.data_dir.as_path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return false;
        }

        let probe = self.data_dir.join(".write-check");
        match fs::write(&probe, b"").await {
            Ok(()) => {
                if let Err(e) = fs::remove_file(&probe).await {
                    debug!(error = %e, "Failed to remove write check file");
                }
                true
            }
            Err(e) => {
                debug!(error = %e, dir = %self.data_dir.display(), "Data directory is not writable");
                false
            }
        }
    }

    /// Load the full collection in insertion order.
    ///
    /// A collection that was never written is empty, not an error.
    pub async fn load(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        let path = self.path_for(collection);

        let contents = match fs::read(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(collection = %collection, "Collection not written yet");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        serde_json::from_slice(&contents).map_err(|source| StoreError::Corrupt { path, source })
    }

    /// Append an entry to the end of a collection and persist it.
    ///
    /// Returns the new collection length.
    pub async fn append(&self, collection: Collection, entry: Value) -> Result<usize, StoreError> {
        let _guard = self.locks.get(collection).lock().await;

        let mut entries = self.load(collection).await?;
        entries.push(entry);
        self.persist(collection, &entries).await?;

        debug!(collection = %collection, len = entries.len(), "Entry appended");
        Ok(entries.len())
    }

    /// Write the whole collection through a temporary file and rename it into place
    async fn persist(&self, collection: Collection, entries: &[Value]) -> Result<(), StoreError> {
        let path = self.path_for(collection);
        let temp = path.with_extension("json.tmp");
        let contents = serde_json::to_vec_pretty(entries)?;

        fs::write(&temp, contents)
            .await
            .map_err(|source| StoreError::Io { path: temp.clone(), source })?;
        fs::rename(&temp, &path)
            .await
            .map_err(|source| StoreError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn repo() -> (tempfile::TempDir, CollectionRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = CollectionRepository::new(dir.path().join("data"));
        (dir, repo)
    }

    #[tokio::test]
    async fn test_load_never_written_is_empty() {
        let (_dir, repo) = repo();
        repo.ensure_data_dir().await.unwrap();

        for collection in Collection::ALL {
            assert!(repo.load(collection).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_load_without_data_dir_is_empty() {
        let (_dir, repo) = repo();
        assert!(repo.load(Collection::Meals).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let (_dir, repo) = repo();
        repo.ensure_data_dir().await.unwrap();

        repo.append(Collection::WeightLog, json!({ "date": "2026-01-01", "weight": 80 }))
            .await
            .unwrap();
        let len = repo
            .append(Collection::WeightLog, json!({ "date": "2026-01-15", "weight": 78 }))
            .await
            .unwrap();

        assert_eq!(len, 2);
        let entries = repo.load(Collection::WeightLog).await.unwrap();
        assert_eq!(entries[0]["weight"], 80);
        assert_eq!(entries[1]["weight"], 78);
    }

    #[tokio::test]
    async fn test_collections_are_separate_files() {
        let (_dir, repo) = repo();
        repo.ensure_data_dir().await.unwrap();

        repo.append(Collection::Meals, json!({ "date": "2026-01-15", "calories": 500 }))
            .await
            .unwrap();

        assert_eq!(repo.load(Collection::Meals).await.unwrap().len(), 1);
        assert!(repo.load(Collection::Workouts).await.unwrap().is_empty());
        assert!(repo.path_for(Collection::Meals).ends_with("meals.json"));
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed_array() {
        let (_dir, repo) = repo();
        repo.ensure_data_dir().await.unwrap();
        repo.append(Collection::Workouts, json!({ "date": "2026-01-15", "type": "run" }))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(repo.path_for(Collection::Workouts)).unwrap();
        assert!(raw.starts_with("[\n"));
        assert!(raw.contains("\"type\": \"run\""));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let (_dir, repo) = repo();
        repo.ensure_data_dir().await.unwrap();
        std::fs::write(repo.path_for(Collection::Workouts), "{ not json").unwrap();

        let result = repo.load(Collection::Workouts).await;
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));

        // A failed load must not clobber the file on append
        let result = repo.append(Collection::Workouts, json!({ "date": "2026-01-15" })).await;
        assert!(result.is_err());
        let raw = std::fs::read_to_string(repo.path_for(Collection::Workouts)).unwrap();
        assert_eq!(raw, "{ not json");
    }

    #[tokio::test]
    async fn test_append_without_data_dir_fails() {
        let (_dir, repo) = repo();
        let result = repo.append(Collection::Meals, json!({ "date": "2026-01-15" })).await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let (_dir, repo) = repo();
        repo.ensure_data_dir().await.unwrap();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.append(Collection::Workouts, json!({ "date": "2026-01-15", "n": i }))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.load(Collection::Workouts).await.unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_is_writable() {
        let (_dir, repo) = repo();
        assert!(!repo.is_writable().await);
        repo.ensure_data_dir().await.unwrap();
        assert!(repo.is_writable().await);
        // The check leaves nothing behind
        assert_eq!(std::fs::read_dir(repo.data_dir()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_file_in_place_of_data_dir_is_not_writable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        std::fs::write(&blocker, "").unwrap();

        assert!(!CollectionRepository::new(blocker.clone()).is_writable().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_only_data_dir_is_not_writable() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, repo) = repo();
        repo.ensure_data_dir().await.unwrap();
        std::fs::set_permissions(repo.data_dir(), std::fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits do not bind a privileged user
        let writable = std::fs::write(repo.data_dir().join("x"), b"").is_ok();
        let _ = std::fs::remove_file(repo.data_dir().join("x"));
        assert_eq!(repo.is_writable().await, writable);

        std::fs::set_permissions(repo.data_dir(), std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// After N appends the collection has N entries in call order
        #[test]
        fn prop_append_is_order_preserving(values in prop::collection::vec(any::<i64>(), 0..25)) {
            let (_dir, repo) = repo();
            let entries = tokio_test::block_on(async {
                repo.ensure_data_dir().await.unwrap();
                for v in &values {
                    repo.append(Collection::Meals, json!({ "date": "2026-01-15", "calories": v }))
                        .await
                        .unwrap();
                }
                repo.load(Collection::Meals).await.unwrap()
            });

            let stored: Vec<i64> = entries.iter().map(|e| e["calories"].as_i64().unwrap()).collect();
            prop_assert_eq!(stored, values);
        }
    }
}
