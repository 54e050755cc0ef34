use crate::source::SourceType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Daemon configuration stored in `config.json` under the state directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    /// Remote version-control service settings
    pub remote: RemoteConfig,

    /// Root of the application this daemon runs inside (defaults to the
    /// process working directory)
    pub app_root: Option<PathBuf>,

    /// Root directory holding plugin sources (defaults to `<appRoot>/plugins`)
    pub plugins_root: Option<PathBuf>,

    /// Statically declared source descriptors. Source names not listed here
    /// are treated as generic plugins.
    pub sources: Vec<SourceEntry>,

    /// Service restart behavior after a successful pull
    pub restart: RestartConfig,
}

/// Connection settings for the remote version-control API
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteConfig {
    /// Base URL of the service, e.g. `https://vc.example.com/api`
    pub base_url: String,

    /// Bearer token for read/sync endpoints
    pub sync_token: String,

    /// Bearer token for upload endpoints
    pub upload_token: String,
}

/// One entry of the static source registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEntry {
    /// Source name as reported by the remote service
    pub name: String,

    /// How the source maps onto the local directory layout
    #[serde(rename = "type")]
    pub source_type: SourceType,
}

/// Commands used by the restart dispatcher. Empty commands disable the
/// corresponding step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RestartConfig {
    /// Restart command for the self application
    pub self_restart_command: String,

    /// Directory name of the sibling application, next to the app root
    pub sibling_name: String,

    /// Build command run in the sibling directory before restarting it
    pub sibling_build_command: String,

    /// Restart command for the sibling application
    pub sibling_restart_command: String,

    /// Seconds to wait before each restart so in-flight writes settle
    pub settle_secs: u64,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            self_restart_command: "pm2 restart api".to_string(),
            sibling_name: "admin".to_string(),
            sibling_build_command: "npm run build".to_string(),
            sibling_restart_command: "pm2 restart admin".to_string(),
            settle_secs: 2,
        }
    }
}

impl RestartConfig {
    /// A configuration with every restart step disabled
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            self_restart_command: String::new(),
            sibling_name: String::new(),
            sibling_build_command: String::new(),
            sibling_restart_command: String::new(),
            settle_secs: 0,
        }
    }
}
