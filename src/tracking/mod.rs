mod types;

pub use types::{TrackingStore, VersionTrackingRecord, INITIAL_VERSION};

use crate::utils::now_iso;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

/// Tracking store filename inside the state directory
pub const TRACKING_FILE: &str = "version-tracking.json";

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to determine home directory")]
    HomeDirNotFound,

    #[error("An update is already in progress for source {0}")]
    UpdateInProgress(String),
}

/// Persistent per-source version records with an in-progress lock flag.
///
/// Lock acquisition is a single conditional update: the read-check-set-write
/// cycle runs inside one critical section, so two concurrent callers cannot
/// both observe "not in progress" and proceed. The daemon is the only writer
/// of its state file, which makes this the compare-and-swap the lock needs.
#[derive(Debug, Clone)]
pub struct VersionTracker {
    store_path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl VersionTracker {
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        Self {
            store_path: state_dir.join(TRACKING_FILE),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Build a tracker rooted at the configured state directory.
    pub fn from_env() -> Result<Self, TrackingError> {
        let state_dir = crate::utils::state_dir().ok_or(TrackingError::HomeDirNotFound)?;
        Ok(Self::new(&state_dir))
    }

    /// Acquire the per-source lock, upserting the record on first contact.
    ///
    /// Fails with `UpdateInProgress` when a pull or push already holds the
    /// lock for this `sourceId`. Other sources are unaffected.
    pub async fn try_acquire(&self, source_id: &str) -> Result<(), TrackingError> {
        let _guard = self.lock.lock().await;
        let mut store = self.read_store().await?;
        let now = now_iso();

        match store.records.get_mut(source_id) {
            Some(record) if record.is_update_in_progress => {
                return Err(TrackingError::UpdateInProgress(source_id.to_string()));
            }
            Some(record) => {
                record.is_update_in_progress = true;
                record.last_updated = now.clone();
            }
            None => {
                let mut record = VersionTrackingRecord::new(source_id, &now);
                record.is_update_in_progress = true;
                store.records.insert(source_id.to_string(), record);
            }
        }

        store.updated_at = now;
        self.write_store_unlocked(&store).await
    }

    /// Unconditionally clear the in-progress flag. Invoked on every exit
    /// path of a pull or push, success or failure.
    pub async fn release(&self, source_id: &str) -> Result<(), TrackingError> {
        let _guard = self.lock.lock().await;
        let mut store = self.read_store().await?;
        if let Some(record) = store.records.get_mut(source_id) {
            record.is_update_in_progress = false;
        }
        store.updated_at = now_iso();
        self.write_store_unlocked(&store).await
    }

    /// Record a successfully synchronized version. Success path only.
    pub async fn stamp(&self, source_id: &str, version: &str) -> Result<(), TrackingError> {
        let _guard = self.lock.lock().await;
        let mut store = self.read_store().await?;
        let now = now_iso();

        let record = store
            .records
            .entry(source_id.to_string())
            .or_insert_with(|| VersionTrackingRecord::new(source_id, &now));
        record.current_version = version.to_string();
        record.last_updated = now.clone();

        store.updated_at = now;
        self.write_store_unlocked(&store).await
    }

    /// Read the record for a source, if one exists yet.
    pub async fn status(&self, source_id: &str) -> Result<Option<VersionTrackingRecord>, TrackingError> {
        let store = self.read_store().await?;
        Ok(store.records.get(source_id).cloned())
    }

    /// Whether any source currently holds the in-progress flag. Used by the
    /// sources listing, not for lock decisions.
    pub async fn any_in_progress(&self) -> Result<bool, TrackingError> {
        let store = self.read_store().await?;
        Ok(store.records.values().any(|r| r.is_update_in_progress))
    }

    async fn read_store(&self) -> Result<TrackingStore, TrackingError> {
        if !self.store_path.exists() {
            return Ok(TrackingStore::default());
        }
        let content = fs::read_to_string(&self.store_path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the store to disk. Caller must hold the tracker mutex.
    async fn write_store_unlocked(&self, store: &TrackingStore) -> Result<(), TrackingError> {
        if let Some(parent) = self.store_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write atomically using a per-call unique temp file + rename, so a
        // crash mid-write never leaves a truncated store behind.
        let unique_id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let temp_name = format!("version-tracking.{unique_id}.json.tmp");
        let temp_path = self
            .store_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(temp_name);
        let content = serde_json::to_string_pretty(store)?;
        fs::write(&temp_path, &content).await?;
        fs::rename(&temp_path, &self.store_path).await?;
        Ok(())
    }
}
