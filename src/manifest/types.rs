use serde::{Deserialize, Serialize};

/// Default version stamped into a freshly created manifest
pub const DEFAULT_MANIFEST_VERSION: &str = "1.0.0";

/// The per-source manifest: which files under the source root are tracked
/// for synchronization. Stored as `manifest.json` in the source root.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub files: Vec<ManifestEntry>,
}

/// One tracked file, relative to the manifest's directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub file_path: String,
}

impl Manifest {
    /// An empty manifest for a source that tracks nothing yet
    #[must_use]
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            version: DEFAULT_MANIFEST_VERSION.to_string(),
            files: Vec::new(),
        }
    }

    /// Whether a manifest-relative path is already tracked
    #[must_use]
    pub fn tracks(&self, relative_path: &str) -> bool {
        self.files.iter().any(|f| f.file_path == relative_path)
    }
}
