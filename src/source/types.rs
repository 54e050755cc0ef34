use serde::{Deserialize, Serialize};

/// How a source maps onto the local directory layout and which services are
/// restarted after a pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SourceType {
    /// The application this daemon is part of; files live under the app root
    SelfApplication,

    /// A sibling application checked out next to the app root
    SiblingApplication,

    /// A generic plugin under the plugins root
    #[default]
    Plugin,
}

/// A source as reported by the remote service, enriched with local state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub source_id: String,
    pub source_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Whether a manifest for this source is reachable locally
    pub installed: bool,
}

/// Result of listing sources: remote descriptors plus the global
/// update-in-progress flag shown to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceListing {
    pub sources: Vec<SourceStatus>,
    pub is_update_in_progress: bool,
}
