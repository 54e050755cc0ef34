use serde::Serialize;

/// What a push did with one tracked file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadStatus {
    /// Newly discovered file, uploaded with a minor increment
    New,
    /// Previously tracked file whose content changed, uploaded with a patch
    /// increment
    Updated,
    /// Local and remote content matched; nothing uploaded
    Unchanged,
    /// The upload (or the local read backing it) failed
    Failed,
}

/// Per-file outcome of a push. Transient; only the operation summary uses it.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub status: UploadStatus,
    /// Manifest-relative file path
    pub file: String,
    /// Uploaded content size in bytes
    pub size: usize,
}

/// Result of a completed push for one source
#[derive(Debug, Clone)]
pub struct PushSummary {
    pub source_id: String,
    pub source_name: String,
    pub outcomes: Vec<UploadOutcome>,
}

impl PushSummary {
    #[must_use]
    pub fn count(&self, status: UploadStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}
