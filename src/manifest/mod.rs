mod types;

pub use types::{Manifest, ManifestEntry, DEFAULT_MANIFEST_VERSION};

use crate::utils::MANIFEST_FILE;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse manifest: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Read the manifest at the given path.
///
/// A missing or unparsable manifest means "nothing tracked yet" and yields an
/// empty manifest rather than an error; the caller fills in the source name.
pub async fn read_manifest(manifest_path: &Path) -> Manifest {
    match fs::read_to_string(manifest_path).await {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
            debug!(
                "Manifest at {} is not valid JSON ({err}), starting empty",
                manifest_path.display()
            );
            Manifest::empty()
        }),
        Err(_) => Manifest::empty(),
    }
}

/// Write the manifest to disk as pretty-printed JSON.
pub async fn write_manifest(manifest_path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
    if let Some(parent) = manifest_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(manifest)?;
    fs::write(manifest_path, content).await?;
    Ok(())
}

/// A local file is "new" iff its manifest-relative path is not tracked yet.
/// Returns the manifest-relative paths of the new files.
#[must_use]
pub fn detect_new_files(
    local_paths: &[PathBuf],
    manifest: &Manifest,
    manifest_path: &Path,
) -> Vec<String> {
    let root = manifest_path.parent().unwrap_or(Path::new("."));
    local_paths
        .iter()
        .filter_map(|path| relative_to_root(path, root))
        .filter(|relative| !manifest.tracks(relative))
        .collect()
}

/// Append the given manifest-relative paths and persist. Growth is
/// monotonic: entries are never removed here, even for files deleted
/// locally.
pub async fn append_and_persist(
    manifest_path: &Path,
    new_relative_paths: &[String],
    source_name: &str,
) -> Result<Manifest, ManifestError> {
    let mut manifest = read_manifest(manifest_path).await;
    manifest.name = source_name.to_string();
    for relative in new_relative_paths {
        if !manifest.tracks(relative) {
            manifest.files.push(ManifestEntry {
                file_path: relative.clone(),
            });
        }
    }
    write_manifest(manifest_path, &manifest).await?;
    Ok(manifest)
}

/// Recursively list the files under a source root, skipping dot-prefixed
/// entries and the manifest file itself.
pub fn list_local_files(source_root: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(source_root)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && entry.file_name() != MANIFEST_FILE {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Compute the manifest-relative path for an absolute file path, using
/// forward slashes. Files outside the root are ignored.
#[must_use]
pub fn relative_to_root(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()
        .map(|relative| relative.to_string_lossy().replace('\\', "/"))
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}
