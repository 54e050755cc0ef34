mod engine;
mod types;

pub use engine::PushEngine;
pub use types::{PushSummary, UploadOutcome, UploadStatus};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PushError {
    #[error("Another update is already in progress for source {0}")]
    Conflict(String),

    #[error("Source {0} not found on remote")]
    SourceNotFound(String),

    #[error("Source error: {0}")]
    SourceError(#[from] crate::source::SourceError),

    #[error("Remote error: {0}")]
    RemoteError(#[from] crate::remote::RemoteError),

    #[error("Tracking error: {0}")]
    TrackingError(#[from] crate::tracking::TrackingError),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] crate::manifest::ManifestError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to upload {failed} of {total} files")]
    PartialFailure {
        failed: usize,
        total: usize,
        outcomes: Vec<UploadOutcome>,
    },
}
