use serde::{Deserialize, Serialize};

/// Envelope every remote endpoint wraps its payload in
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// A source as described by `GET /sources`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    pub source_id: String,
    pub source_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// One entry of a file-version listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersionItem {
    pub file_path: String,
}

/// Pagination metadata reported alongside a listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of files across all pages
    pub total: usize,
    pub page: u32,
    pub total_pages: u32,
}

/// One page of `GET /file-versions`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersionPage {
    /// Source name reported by the remote service
    pub source: String,
    #[serde(default)]
    pub total_files: u32,
    #[serde(default)]
    pub total_changes: u32,
    pub files: Vec<FileVersionItem>,
    pub pagination: Pagination,
}

/// File content returned by the batched contents endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFileContent {
    pub file_path: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Advisory classification sent with an upload: whether the file is newly
/// discovered or a change to a previously tracked file. Interpreted only by
/// the remote service's own versioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncrementType {
    Minor,
    Patch,
}

impl IncrementType {
    /// Minor designates a newly discovered file, patch a content change.
    #[must_use]
    pub fn for_file(is_new: bool) -> Self {
        if is_new {
            Self::Minor
        } else {
            Self::Patch
        }
    }
}

/// Payload of `POST /file-versions`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    pub file_path: String,
    pub content: String,
    pub source_id: String,
    pub increment_type: IncrementType,
}
