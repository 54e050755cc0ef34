//! Common test utilities

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Lay out an app root with a plugins directory and one plugin tree
/// containing the given files, returning the plugin root.
#[allow(dead_code)] // Test utility for integration tests
pub fn init_plugin_tree(app_root: &Path, plugin_name: &str, files: &[(&str, &str)]) -> PathBuf {
    let plugin_root = app_root.join("plugins").join(plugin_name);
    std::fs::create_dir_all(&plugin_root).expect("Failed to create plugin root");
    for (relative, content) in files {
        let path = plugin_root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }
    plugin_root
}
