mod http;
#[cfg(test)]
pub(crate) mod mock;
mod types;

pub use http::HttpRemoteClient;
pub use types::{
    ApiEnvelope, FileUpload, FileVersionItem, FileVersionPage, IncrementType, Pagination,
    RemoteFileContent, SourceDescriptor,
};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Remote request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Remote resource not found: {0}")]
    NotFound(String),

    #[error("Invalid remote client configuration: {0}")]
    InvalidConfig(String),
}

/// Client contract of the remote version-control service.
///
/// The trait is the seam between the sync engines and the wire: production
/// uses `HttpRemoteClient`, tests substitute an in-memory remote.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// `GET /sources`
    async fn list_sources(&self) -> Result<Vec<SourceDescriptor>, RemoteError>;

    /// `GET /file-versions?sourceId&page&limit`: one listing page. Callers
    /// loop until `page >= pagination.totalPages`, accumulating file paths.
    async fn list_file_versions(
        &self,
        source_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<FileVersionPage, RemoteError>;

    /// `POST /file-versions/contents`: contents for a batch of paths.
    async fn fetch_contents(
        &self,
        source_id: &str,
        file_paths: &[String],
    ) -> Result<Vec<RemoteFileContent>, RemoteError>;

    /// `POST /file-versions/version`: one file's current remote content.
    /// `NotFound` means the file is not tracked remotely yet.
    async fn fetch_single_content(
        &self,
        source_id: &str,
        relative_path: &str,
    ) -> Result<String, RemoteError>;

    /// `POST /file-versions`: push one file update.
    async fn push_file(&self, upload: &FileUpload) -> Result<(), RemoteError>;
}
