use super::types::{PushSummary, UploadOutcome, UploadStatus};
use super::PushError;
use crate::manifest::{
    append_and_persist, detect_new_files, list_local_files, read_manifest, relative_to_root,
};
use crate::remote::{FileUpload, IncrementType, RemoteError, RemoteSource};
use crate::source::PathMapper;
use crate::tracking::{TrackingError, VersionTracker};
use crate::utils::MANIFEST_FILE;
use futures::future::join_all;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// One file scheduled for upload
struct UploadCandidate {
    /// Manifest-relative path, forward slashes
    relative: String,
    absolute: PathBuf,
    is_new: bool,
}

/// Orchestrates a full push: lock, diff the local tree against the manifest,
/// grow the manifest for new files, upload every changed file concurrently,
/// then release the lock.
pub struct PushEngine {
    remote: Arc<dyn RemoteSource>,
    paths: PathMapper,
    tracker: VersionTracker,
}

impl PushEngine {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteSource>, paths: PathMapper, tracker: VersionTracker) -> Self {
        Self {
            remote,
            paths,
            tracker,
        }
    }

    /// Upload a source's local changes to the remote service.
    ///
    /// Uploads run concurrently and a failed file never aborts its siblings;
    /// after all attempts settle, any failure surfaces as `PartialFailure`
    /// carrying the per-file outcomes. The lock is released exactly once on
    /// every path after acquisition.
    pub async fn upload_source(&self, source_id: &str) -> Result<PushSummary, PushError> {
        self.tracker
            .try_acquire(source_id)
            .await
            .map_err(|err| match err {
                TrackingError::UpdateInProgress(id) => PushError::Conflict(id),
                other => PushError::TrackingError(other),
            })?;

        let result = self.push_locked(source_id).await;
        match result {
            Ok(summary) => {
                self.tracker.release(source_id).await?;
                info!(
                    "Source {source_id} pushed: {} new, {} updated, {} unchanged",
                    summary.count(UploadStatus::New),
                    summary.count(UploadStatus::Updated),
                    summary.count(UploadStatus::Unchanged),
                );
                Ok(summary)
            }
            Err(err) => {
                if let Err(release_err) = self.tracker.release(source_id).await {
                    warn!("Failed to release update lock for {source_id}: {release_err}");
                }
                Err(err)
            }
        }
    }

    async fn push_locked(&self, source_id: &str) -> Result<PushSummary, PushError> {
        // The listing endpoint doubles as the source-name lookup.
        let listing = self.remote.list_file_versions(source_id, 1, 1).await?;
        let source_name = listing.source;
        if source_name.is_empty() {
            return Err(PushError::SourceNotFound(source_id.to_string()));
        }

        let (manifest_path, _) = self.paths.resolve_manifest_path(&source_name)?;
        let source_root = manifest_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        let manifest = read_manifest(&manifest_path).await;
        let local_files = list_local_files(&source_root)?;
        let new_relatives = detect_new_files(&local_files, &manifest, &manifest_path);

        let mut candidates: Vec<UploadCandidate> = manifest
            .files
            .iter()
            .map(|entry| UploadCandidate {
                relative: entry.file_path.clone(),
                absolute: source_root.join(&entry.file_path),
                is_new: false,
            })
            .collect();
        for relative in &new_relatives {
            candidates.push(UploadCandidate {
                relative: relative.clone(),
                absolute: source_root.join(relative),
                is_new: true,
            });
        }

        if candidates.is_empty() {
            info!("No files to push for source {source_name}");
            return Ok(PushSummary {
                source_id: source_id.to_string(),
                source_name,
                outcomes: Vec::new(),
            });
        }

        // The manifest must track new files before their first upload, so a
        // later pull on another machine sees them as part of the source.
        if !new_relatives.is_empty() {
            append_and_persist(&manifest_path, &new_relatives, &source_name).await?;
        }

        // The manifest travels in the upload set like any other tracked
        // file: skipped when the remote copy matches, patch-level when it
        // differs, and a failed upload becomes one recorded outcome instead
        // of aborting its siblings.
        let manifest_relative = relative_to_root(&manifest_path, &source_root)
            .unwrap_or_else(|| MANIFEST_FILE.to_string());
        candidates.push(UploadCandidate {
            relative: manifest_relative,
            absolute: manifest_path.clone(),
            is_new: false,
        });

        let remote_contents = self.fetch_remote_counterparts(source_id, &candidates).await;

        let outcomes = Arc::new(Mutex::new(Vec::with_capacity(candidates.len())));
        let uploads = candidates.iter().map(|candidate| {
            let remote_content = remote_contents.get(&candidate.relative).cloned();
            self.upload_one(source_id, candidate, remote_content, Arc::clone(&outcomes))
        });
        join_all(uploads).await;

        let outcomes = outcomes.lock().await.clone();
        let failed = outcomes
            .iter()
            .filter(|o| o.status == UploadStatus::Failed)
            .count();
        if failed > 0 {
            return Err(PushError::PartialFailure {
                failed,
                total: outcomes.len(),
                outcomes,
            });
        }

        Ok(PushSummary {
            source_id: source_id.to_string(),
            source_name,
            outcomes,
        })
    }

    /// Fetch the remote content of every candidate, best effort. A missing
    /// remote counterpart just means the file uploads unconditionally.
    async fn fetch_remote_counterparts(
        &self,
        source_id: &str,
        candidates: &[UploadCandidate],
    ) -> HashMap<String, String> {
        let mut remote_contents = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            match self
                .remote
                .fetch_single_content(source_id, &candidate.relative)
                .await
            {
                Ok(content) => {
                    remote_contents.insert(candidate.relative.clone(), content);
                }
                Err(RemoteError::NotFound(_)) => {
                    debug!("{} has no remote counterpart yet", candidate.relative);
                }
                Err(err) => {
                    warn!(
                        "Failed to fetch remote content for {}: {err}",
                        candidate.relative
                    );
                }
            }
        }
        remote_contents
    }

    /// Upload one candidate and record its outcome. Never fails: errors
    /// become a `Failed` outcome so sibling uploads keep going.
    async fn upload_one(
        &self,
        source_id: &str,
        candidate: &UploadCandidate,
        remote_content: Option<String>,
        outcomes: Arc<Mutex<Vec<UploadOutcome>>>,
    ) {
        let (status, size) = match self
            .try_upload(source_id, candidate, remote_content.as_deref())
            .await
        {
            Ok(result) => result,
            Err(err) => {
                warn!("Failed to upload {}: {err}", candidate.relative);
                (UploadStatus::Failed, 0)
            }
        };
        outcomes.lock().await.push(UploadOutcome {
            status,
            file: candidate.relative.clone(),
            size,
        });
    }

    async fn try_upload(
        &self,
        source_id: &str,
        candidate: &UploadCandidate,
        remote_content: Option<&str>,
    ) -> Result<(UploadStatus, usize), PushError> {
        let content = fs::read_to_string(&candidate.absolute).await?;
        let size = content.len();

        if !candidate.is_new && remote_content == Some(content.as_str()) {
            debug!("{} unchanged, skipping upload", candidate.relative);
            return Ok((UploadStatus::Unchanged, size));
        }

        self.remote
            .push_file(&FileUpload {
                file_path: candidate.relative.clone(),
                content,
                source_id: source_id.to_string(),
                increment_type: IncrementType::for_file(candidate.is_new),
            })
            .await?;

        let status = if candidate.is_new {
            UploadStatus::New
        } else {
            UploadStatus::Updated
        };
        Ok((status, size))
    }
}
