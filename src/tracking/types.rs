use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Version given to a source the first time it is tracked
pub const INITIAL_VERSION: &str = "0.0.1";

/// Persistent per-source record: last synchronized version plus the
/// in-progress lock flag guarding concurrent pulls/pushes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionTrackingRecord {
    pub source_id: String,
    pub current_version: String,
    pub last_updated: String,
    pub is_update_in_progress: bool,
}

impl VersionTrackingRecord {
    #[must_use]
    pub fn new(source_id: &str, now: &str) -> Self {
        Self {
            source_id: source_id.to_string(),
            current_version: INITIAL_VERSION.to_string(),
            last_updated: now.to_string(),
            is_update_in_progress: false,
        }
    }
}

/// On-disk store: map of `sourceId` to its tracking record. Records are
/// created on first acquire and never deleted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackingStore {
    pub updated_at: String,
    pub records: HashMap<String, VersionTrackingRecord>,
}
