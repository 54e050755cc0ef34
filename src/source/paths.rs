use super::{SourceError, SourceType};
use crate::config::SyncConfig;
use crate::utils::manifest_path_in;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Resolves logical source names to manifest locations and maps
/// manifest-relative file paths to absolute filesystem paths.
///
/// The mapping is a pure function of the statically configured source
/// registry; no directory scanning or dynamic discovery is involved.
#[derive(Debug, Clone)]
pub struct PathMapper {
    app_root: PathBuf,
    plugins_root: PathBuf,
    registry: HashMap<String, SourceType>,
}

impl PathMapper {
    /// Build a mapper from the daemon configuration. Falls back to the
    /// process working directory when no app root is configured.
    pub fn from_config(config: &SyncConfig) -> Result<Self, SourceError> {
        let app_root = match &config.app_root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        let plugins_root = config
            .plugins_root
            .clone()
            .unwrap_or_else(|| app_root.join("plugins"));
        let registry = config
            .sources
            .iter()
            .map(|entry| (entry.name.clone(), entry.source_type))
            .collect();
        Ok(Self {
            app_root,
            plugins_root,
            registry,
        })
    }

    #[must_use]
    pub fn new(app_root: PathBuf, plugins_root: PathBuf, registry: HashMap<String, SourceType>) -> Self {
        Self {
            app_root,
            plugins_root,
            registry,
        }
    }

    /// Look up the declared type for a source name. Names not present in the
    /// registry are treated as generic plugins.
    #[must_use]
    pub fn source_type(&self, source_name: &str) -> SourceType {
        self.registry
            .get(source_name)
            .copied()
            .unwrap_or(SourceType::Plugin)
    }

    /// Where the manifest for a source lives, whether or not it exists yet.
    /// A first pull uses this to create the tree from scratch.
    #[must_use]
    pub fn manifest_location(&self, source_name: &str) -> (PathBuf, SourceType) {
        let source_type = self.source_type(source_name);
        let root = match source_type {
            SourceType::SelfApplication => self.app_root.clone(),
            SourceType::SiblingApplication => self.sibling_root(source_name),
            SourceType::Plugin => self.plugins_root.join(source_name),
        };
        (manifest_path_in(&root), source_type)
    }

    /// Resolve the manifest path for a source, requiring it to exist.
    pub fn resolve_manifest_path(
        &self,
        source_name: &str,
    ) -> Result<(PathBuf, SourceType), SourceError> {
        let (manifest_path, source_type) = self.manifest_location(source_name);
        if manifest_path.exists() {
            return Ok((manifest_path, source_type));
        }
        // Unregistered names default to plugin; fall back to the app root
        // manifest so a self source without a registry entry still resolves.
        if source_type == SourceType::Plugin {
            let root_manifest = manifest_path_in(&self.app_root);
            if root_manifest.exists() {
                return Ok((root_manifest, SourceType::SelfApplication));
            }
        }
        Err(SourceError::ManifestNotFound(source_name.to_string()))
    }

    /// Map a manifest-relative file path to its absolute location.
    #[must_use]
    pub fn to_absolute(
        &self,
        relative_path: &str,
        source_type: SourceType,
        manifest_path: &Path,
    ) -> PathBuf {
        match source_type {
            SourceType::SelfApplication => self.app_root.join(relative_path),
            SourceType::SiblingApplication | SourceType::Plugin => manifest_path
                .parent()
                .unwrap_or(Path::new("."))
                .join(relative_path),
        }
    }

    fn sibling_root(&self, source_name: &str) -> PathBuf {
        self.app_root
            .parent()
            .unwrap_or(Path::new("."))
            .join(source_name)
    }

    #[must_use]
    pub fn app_root(&self) -> &Path {
        &self.app_root
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod paths_tests;
