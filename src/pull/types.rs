use crate::source::SourceType;
use serde::Serialize;
use std::path::PathBuf;

/// What a pull did with one remote file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileAction {
    /// File did not exist locally and was created
    New,
    /// Local content differed and was overwritten
    Changed,
    /// Local content was identical; nothing written
    Unchanged,
}

/// Per-file result of a pull
#[derive(Debug, Clone)]
pub struct SyncedFile {
    pub path: PathBuf,
    pub action: FileAction,
}

/// Result of a completed pull for one source
#[derive(Debug, Clone)]
pub struct PullSummary {
    pub source_id: String,
    pub source_name: String,
    pub source_type: SourceType,
    /// Version stamped into the tracking record
    pub new_version: String,
    pub files: Vec<SyncedFile>,
}

impl PullSummary {
    #[must_use]
    pub fn count(&self, action: FileAction) -> usize {
        self.files.iter().filter(|f| f.action == action).count()
    }
}
