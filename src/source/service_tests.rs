use super::list_sources;
use crate::remote::mock::MockRemote;
use crate::source::PathMapper;
use crate::tracking::VersionTracker;
use std::collections::HashMap;
use tempfile::TempDir;

const SOURCE_ID: &str = "src-audit";
const SOURCE_NAME: &str = "audit-log";

fn rig() -> (TempDir, MockRemote, PathMapper, VersionTracker) {
    let temp_dir = tempfile::tempdir().expect("Should create temp dir");
    let app_root = temp_dir.path().join("app");
    let plugin_root = app_root.join("plugins").join(SOURCE_NAME);
    std::fs::create_dir_all(&plugin_root).expect("Should create plugin root");
    std::fs::write(plugin_root.join("manifest.json"), "{}").expect("Should write manifest");

    let remote = MockRemote::new(SOURCE_ID, SOURCE_NAME);
    let paths = PathMapper::new(app_root.clone(), app_root.join("plugins"), HashMap::new());
    let tracker = VersionTracker::new(temp_dir.path());
    (temp_dir, remote, paths, tracker)
}

#[tokio::test]
async fn test_installed_flag_tracks_local_manifest_presence() {
    let (_temp_dir, remote, paths, tracker) = rig();
    // A second remote source with no local manifest anywhere
    remote.add_source("src-ghost", "ghost", Some("2.0.0"));

    let listing = list_sources(&remote, &paths, &tracker)
        .await
        .expect("Listing should succeed");

    assert_eq!(listing.sources.len(), 2);
    let installed = listing
        .sources
        .iter()
        .find(|s| s.source_name == SOURCE_NAME)
        .expect("Known source should be listed");
    assert!(installed.installed);

    let ghost = listing
        .sources
        .iter()
        .find(|s| s.source_name == "ghost")
        .expect("Remote-only source should be listed");
    assert!(!ghost.installed);
    assert_eq!(ghost.version.as_deref(), Some("2.0.0"));
}

#[tokio::test]
async fn test_in_progress_flag_follows_the_tracker() {
    let (_temp_dir, remote, paths, tracker) = rig();

    let listing = list_sources(&remote, &paths, &tracker)
        .await
        .expect("Listing should succeed");
    assert!(!listing.is_update_in_progress);

    tracker
        .try_acquire(SOURCE_ID)
        .await
        .expect("Lock should acquire");
    let listing = list_sources(&remote, &paths, &tracker)
        .await
        .expect("Listing should succeed");
    assert!(listing.is_update_in_progress);

    tracker.release(SOURCE_ID).await.expect("Should release");
    let listing = list_sources(&remote, &paths, &tracker)
        .await
        .expect("Listing should succeed");
    assert!(!listing.is_update_in_progress);
}
