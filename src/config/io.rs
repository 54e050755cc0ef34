use super::types::SyncConfig;
use super::ConfigError;
use std::path::Path;
use tokio::fs;

/// Config filename inside the state directory
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the remote base URL
pub const REMOTE_URL_ENV: &str = "VERSION_CONTROL_API";

/// Environment variable overriding the sync (read) token
pub const SYNC_TOKEN_ENV: &str = "SYNC_SOURCE_SERVICE_TOKEN";

/// Environment variable overriding the upload token
pub const UPLOAD_TOKEN_ENV: &str = "UPLOAD_SOURCE_SERVICE_TOKEN";

/// Read the configuration file from the state directory.
///
/// A missing file yields the default configuration; environment overrides
/// for the remote URL and tokens are applied on top either way.
pub async fn load_config(state_dir: &Path) -> Result<SyncConfig, ConfigError> {
    let config_path = state_dir.join(CONFIG_FILE);
    let mut config = if config_path.exists() {
        let content = fs::read_to_string(&config_path).await?;
        serde_json::from_str(&content)?
    } else {
        SyncConfig::default()
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Write the configuration file to the state directory.
pub async fn write_config(state_dir: &Path, config: &SyncConfig) -> Result<(), ConfigError> {
    fs::create_dir_all(state_dir).await?;
    let config_path = state_dir.join(CONFIG_FILE);
    let content = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, content).await?;
    Ok(())
}

fn apply_env_overrides(config: &mut SyncConfig) {
    if let Ok(url) = std::env::var(REMOTE_URL_ENV) {
        config.remote.base_url = url;
    }
    if let Ok(token) = std::env::var(SYNC_TOKEN_ENV) {
        config.remote.sync_token = token;
    }
    if let Ok(token) = std::env::var(UPLOAD_TOKEN_ENV) {
        config.remote.upload_token = token;
    }
}
