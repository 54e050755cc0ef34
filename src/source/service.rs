use super::{PathMapper, SourceError, SourceListing, SourceStatus};
use crate::remote::RemoteSource;
use crate::tracking::VersionTracker;

/// List the sources known to the remote service, flagging which of them are
/// installed locally (manifest reachable) and whether any update is running.
pub async fn list_sources(
    remote: &dyn RemoteSource,
    paths: &PathMapper,
    tracker: &VersionTracker,
) -> Result<SourceListing, SourceError> {
    let descriptors = remote.list_sources().await?;

    let mut sources = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let installed = paths.resolve_manifest_path(&descriptor.source_name).is_ok();
        sources.push(SourceStatus {
            source_id: descriptor.source_id,
            source_name: descriptor.source_name,
            version: descriptor.version,
            installed,
        });
    }

    let is_update_in_progress = tracker.any_in_progress().await?;
    Ok(SourceListing {
        sources,
        is_update_in_progress,
    })
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;
