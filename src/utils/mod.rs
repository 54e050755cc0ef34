mod hash;

pub use hash::{compute_file_hash, compute_hash};

use std::path::{Path, PathBuf};

/// The name of the per-source manifest file
pub const MANIFEST_FILE: &str = "manifest.json";

/// Environment variable overriding the state directory
pub const STATE_DIR_ENV: &str = "SOURCESYNCD_HOME";

/// The name of the state folder under the home directory
pub const STATE_DIR_NAME: &str = ".sourcesyncd";

/// Get the path to the state directory (`~/.sourcesyncd`).
///
/// If `SOURCESYNCD_HOME` is set, that directory is used instead. This allows
/// tests and CI to use an isolated state directory without touching the
/// user's real data.
#[must_use]
pub fn state_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var(STATE_DIR_ENV) {
        return Some(PathBuf::from(home));
    }
    dirs::home_dir().map(|home| home.join(STATE_DIR_NAME))
}

/// Get the path to the manifest file inside a source root
#[must_use]
pub fn manifest_path_in(source_root: &Path) -> PathBuf {
    source_root.join(MANIFEST_FILE)
}

/// Get current timestamp in ISO 8601 format
#[must_use]
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_path_in() {
        let root = Path::new("/srv/plugins/audit-log");
        assert_eq!(
            manifest_path_in(root),
            Path::new("/srv/plugins/audit-log/manifest.json")
        );
    }

    #[test]
    fn test_now_iso_parses_back() {
        let now = now_iso();
        assert!(chrono::DateTime::parse_from_rfc3339(&now).is_ok());
    }
}
