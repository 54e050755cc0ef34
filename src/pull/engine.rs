use super::types::{FileAction, PullSummary, SyncedFile};
use super::PullError;
use crate::remote::{RemoteFileContent, RemoteSource};
use crate::restart::RestartDispatcher;
use crate::source::{PathMapper, SourceType};
use crate::tracking::{TrackingError, VersionTracker};
use crate::utils::{compute_hash, now_iso};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

/// Page size used when listing remote file versions
pub const PAGE_LIMIT: u32 = 99;

/// Number of file paths fetched per contents request. Chunking bounds the
/// request size only; it does not change the result set.
pub const CONTENT_BATCH_SIZE: usize = 10;

/// Orchestrates a full pull: lock, enumerate remote files, fetch contents in
/// batches, write changed files, stamp the new version, release the lock,
/// then trigger a service restart.
pub struct PullEngine {
    remote: Arc<dyn RemoteSource>,
    paths: PathMapper,
    tracker: VersionTracker,
    restarter: RestartDispatcher,
}

impl PullEngine {
    #[must_use]
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        paths: PathMapper,
        tracker: VersionTracker,
        restarter: RestartDispatcher,
    ) -> Self {
        Self {
            remote,
            paths,
            tracker,
            restarter,
        }
    }

    /// Update the local tree of a source from the remote service.
    ///
    /// A `Conflict` abort happens before any remote call or local write. On
    /// any later failure the rollback hook runs, the lock is released, and
    /// the error propagates; the lock never leaks.
    pub async fn update_source(&self, source_id: &str) -> Result<PullSummary, PullError> {
        self.tracker
            .try_acquire(source_id)
            .await
            .map_err(|err| match err {
                TrackingError::UpdateInProgress(id) => PullError::Conflict(id),
                other => PullError::TrackingError(other),
            })?;

        match self.sync_locked(source_id).await {
            Ok(summary) => {
                self.tracker.release(source_id).await?;
                info!(
                    "Source {source_id} updated to {}: {} new, {} changed, {} unchanged",
                    summary.new_version,
                    summary.count(FileAction::New),
                    summary.count(FileAction::Changed),
                    summary.count(FileAction::Unchanged),
                );
                // The pull already succeeded; the restart outcome is only logged.
                self.restarter.notify(summary.source_type);
                Ok(summary)
            }
            Err(err) => {
                rollback_changes(source_id);
                if let Err(release_err) = self.tracker.release(source_id).await {
                    warn!("Failed to release update lock for {source_id}: {release_err}");
                }
                Err(err)
            }
        }
    }

    async fn sync_locked(&self, source_id: &str) -> Result<PullSummary, PullError> {
        let (source_name, all_paths) = self.list_all_files(source_id).await?;
        let contents = self.fetch_all_contents(source_id, &all_paths).await?;

        let (manifest_path, source_type) = self.paths.manifest_location(&source_name);
        let mut files = Vec::with_capacity(contents.len());
        for file_content in &contents {
            files.push(
                self.sync_file(file_content, source_type, &manifest_path)
                    .await?,
            );
        }

        let new_version = now_iso();
        self.tracker.stamp(source_id, &new_version).await?;

        Ok(PullSummary {
            source_id: source_id.to_string(),
            source_name,
            source_type,
            new_version,
            files,
        })
    }

    /// Enumerate every remote file path across listing pages.
    async fn list_all_files(&self, source_id: &str) -> Result<(String, Vec<String>), PullError> {
        let mut page = 1u32;
        let mut source_name = String::new();
        let mut all_paths = Vec::new();

        loop {
            let listing = self
                .remote
                .list_file_versions(source_id, page, PAGE_LIMIT)
                .await?;
            if page == 1 {
                source_name = listing.source.clone();
                if source_name.is_empty() {
                    return Err(PullError::SourceNotFound(source_id.to_string()));
                }
            }
            let total = listing.pagination.total;
            let total_pages = listing.pagination.total_pages;
            all_paths.extend(listing.files.into_iter().map(|f| f.file_path));

            if page >= total_pages {
                if all_paths.len() != total {
                    warn!(
                        "File listing for {source_id} accumulated {} paths but pagination reported {total}",
                        all_paths.len()
                    );
                }
                break;
            }
            page = page.saturating_add(1);
        }

        Ok((source_name, all_paths))
    }

    /// Fetch all contents, batched, into one in-memory set.
    async fn fetch_all_contents(
        &self,
        source_id: &str,
        paths: &[String],
    ) -> Result<Vec<RemoteFileContent>, PullError> {
        let mut contents = Vec::with_capacity(paths.len());
        for batch in paths.chunks(CONTENT_BATCH_SIZE) {
            contents.extend(self.remote.fetch_contents(source_id, batch).await?);
        }
        Ok(contents)
    }

    /// Write one remote file to its mapped location, skipping the write when
    /// the local content is already identical.
    async fn sync_file(
        &self,
        file_content: &RemoteFileContent,
        source_type: SourceType,
        manifest_path: &Path,
    ) -> Result<SyncedFile, PullError> {
        let absolute = self
            .paths
            .to_absolute(&file_content.file_path, source_type, manifest_path);
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent).await?;
        }

        let action = match fs::read_to_string(&absolute).await {
            Ok(existing) if compute_hash(&existing) == compute_hash(&file_content.content) => {
                FileAction::Unchanged
            }
            Ok(_) => FileAction::Changed,
            Err(_) => FileAction::New,
        };

        if action == FileAction::Unchanged {
            debug!("{} unchanged, skipping write", absolute.display());
        } else {
            fs::write(&absolute, &file_content.content).await?;
            debug!("{} written ({:?})", absolute.display(), action);
        }

        Ok(SyncedFile {
            path: absolute,
            action,
        })
    }
}

/// Best-effort rollback hook invoked when a pull fails after the lock was
/// taken. Restoring from backup is not implemented; the hook only logs, as
/// the failed files are re-synced by the next successful pull.
fn rollback_changes(source_id: &str) {
    warn!("Sync failed for {source_id}, rolling back changes");
}
