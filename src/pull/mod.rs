mod engine;
mod types;

pub use engine::{PullEngine, CONTENT_BATCH_SIZE, PAGE_LIMIT};
pub use types::{FileAction, PullSummary, SyncedFile};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PullError {
    #[error("Another update is already in progress for source {0}")]
    Conflict(String),

    #[error("Source {0} not found on remote")]
    SourceNotFound(String),

    #[error("Remote error: {0}")]
    RemoteError(#[from] crate::remote::RemoteError),

    #[error("Tracking error: {0}")]
    TrackingError(#[from] crate::tracking::TrackingError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
