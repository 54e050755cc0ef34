mod paths;
mod service;
mod types;

pub use paths::PathMapper;
pub use service::list_sources;
pub use types::{SourceListing, SourceStatus, SourceType};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("No manifest found for source {0}")]
    ManifestNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Remote error: {0}")]
    RemoteError(#[from] crate::remote::RemoteError),

    #[error("Tracking error: {0}")]
    TrackingError(#[from] crate::tracking::TrackingError),
}
