mod io;
mod types;

pub use io::{load_config, write_config, CONFIG_FILE, REMOTE_URL_ENV, SYNC_TOKEN_ENV, UPLOAD_TOKEN_ENV};
pub use types::{RemoteConfig, RestartConfig, SourceEntry, SyncConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to determine home directory")]
    HomeDirNotFound,

    #[error("Remote base URL is not configured (set VERSION_CONTROL_API or remote.baseUrl in config.json)")]
    MissingRemoteUrl,
}
