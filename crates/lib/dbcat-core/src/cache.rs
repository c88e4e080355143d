//! On-disk snapshot cache for catalog metadata.
//!
//! One JSON file per object kind, always the complete universe for that
//! kind at the time it was written. There is no in-memory layer: every
//! load re-reads disk, so correctness survives process restarts and
//! externally-deleted files. Invalidation is always explicit.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dbcat_store::models::{ObjectKind, SchemaObject, Snapshot};
use tracing::warn;

/// Explicit cache object: constructed once and passed by reference into
/// every operation, never a hidden singleton.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn snapshot_path(&self, kind: ObjectKind) -> PathBuf {
        self.dir.join(kind.snapshot_file())
    }

    /// Loads the snapshot for `kind`, or `None` on a miss.
    ///
    /// A missing file is a plain miss. An unreadable, corrupt, or
    /// stale-versioned file is logged and treated as a miss; it is never
    /// surfaced to the caller.
    #[must_use]
    pub fn load(&self, kind: ObjectKind) -> Option<Vec<SchemaObject>> {
        let path = self.snapshot_path(kind);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(kind = %kind, path = %path.display(), error = %err, "unreadable snapshot, treating as cache miss");
                return None;
            }
        };
        let snapshot: Snapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(kind = %kind, path = %path.display(), error = %err, "corrupt snapshot, treating as cache miss");
                return None;
            }
        };
        if !snapshot.is_current() {
            warn!(kind = %kind, version = snapshot.version, "stale snapshot version, treating as cache miss");
            return None;
        }
        Some(snapshot.objects)
    }

    /// Persists the complete universe for `kind` as a whole-file
    /// replacement, creating the cache directory if absent.
    ///
    /// A persistence failure is logged but non-fatal; the caller still
    /// holds the freshly fetched value.
    pub fn store(&self, kind: ObjectKind, objects: &[SchemaObject]) {
        let path = self.snapshot_path(kind);
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            warn!(kind = %kind, dir = %self.dir.display(), error = %err, "failed to create cache directory");
            return;
        }
        let snapshot = Snapshot::new(objects.to_vec());
        let serialized = match serde_json::to_string_pretty(&snapshot) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(kind = %kind, error = %err, "failed to serialize snapshot");
                return;
            }
        };
        if let Err(err) = std::fs::write(&path, serialized) {
            warn!(kind = %kind, path = %path.display(), error = %err, "failed to persist snapshot");
        }
    }

    /// Deletes the snapshot file for `kind`, forcing the next load to
    /// miss. A missing file is a no-op.
    pub fn invalidate(&self, kind: ObjectKind) {
        let path = self.snapshot_path(kind);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                warn!(kind = %kind, path = %path.display(), error = %err, "failed to delete snapshot");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SchemaObject> {
        vec![
            SchemaObject::new("DEPARTMENTS", ObjectKind::Table),
            SchemaObject::new("EMPLOYEES", ObjectKind::Table),
        ]
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = SnapshotCache::new(dir.path());
        cache.store(ObjectKind::Table, &sample());
        let loaded = cache.load(ObjectKind::Table).expect("snapshot present");
        assert_eq!(loaded, sample());
    }

    #[test]
    fn corrupt_snapshot_is_a_miss() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = SnapshotCache::new(dir.path());
        std::fs::write(cache.snapshot_path(ObjectKind::Table), "{ not json").expect("write");
        assert!(cache.load(ObjectKind::Table).is_none());
    }

    #[test]
    fn stale_version_is_a_miss() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = SnapshotCache::new(dir.path());
        std::fs::write(
            cache.snapshot_path(ObjectKind::Table),
            r#"{"Version": 99, "Objects": []}"#,
        )
        .expect("write");
        assert!(cache.load(ObjectKind::Table).is_none());
    }

    #[test]
    fn invalidate_removes_the_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = SnapshotCache::new(dir.path());
        cache.store(ObjectKind::View, &sample());
        cache.invalidate(ObjectKind::View);
        assert!(!cache.snapshot_path(ObjectKind::View).exists());
        cache.invalidate(ObjectKind::View);
    }
}
