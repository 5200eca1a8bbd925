use std::path::{Path, PathBuf};

use crate::manifest::ProjectManifest;

/// One buildable unit of the graph, rooted at the directory holding its
/// `Project.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    path: PathBuf,
    manifest: ProjectManifest,
    dependencies: Vec<PathBuf>,
}

impl Project {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            manifest: ProjectManifest::default(),
            dependencies: Vec::new(),
        }
    }

    pub fn from_manifest(
        path: PathBuf,
        manifest: ProjectManifest,
        dependencies: Vec<PathBuf>,
    ) -> Option<Self> {
        let name = match manifest.project().name.as_deref() {
            Some(name) => name.to_string(),
            None => Self::infer_name(&path)?,
        };

        Some(Self {
            name,
            path,
            manifest,
            dependencies,
        })
    }

    /// Falls back to the directory name when the manifest does not name the project.
    pub fn infer_name(path: &Path) -> Option<String> {
        path.file_name()
            .and_then(|f| f.to_str())
            .map(|f| f.to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest(&self) -> &ProjectManifest {
        &self.manifest
    }

    /// Canonical directories of the projects this one depends on.
    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }
}
