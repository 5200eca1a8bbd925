use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to format manifest: {0}")]
    Format(#[from] toml::ser::Error),
    #[error("Failed to write manifest {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Contents of a `Project.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectManifest {
    #[serde(default)]
    pub project: ProjectMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectMetadata {
    /// Defaults to the name of the directory holding the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Directories of other projects, relative to this manifest.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<PathBuf>,
    /// Overrides the organization name from the generation options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
}

impl ProjectManifest {
    pub fn project(&self) -> &ProjectMetadata {
        &self.project
    }
}

/// Contents of a `Workspace.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceManifest {
    pub workspace: WorkspaceMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceMetadata {
    pub name: String,
    /// Project directories, relative to this manifest.
    #[serde(default)]
    pub projects: Vec<PathBuf>,
}

impl WorkspaceManifest {
    pub fn workspace(&self) -> &WorkspaceMetadata {
        &self.workspace
    }
}

/// Reads and parses a TOML manifest, returning `None` when the file is absent.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ManifestError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest = toml::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some(manifest))
}

pub fn save<T: Serialize>(manifest: &T, path: &Path) -> Result<(), ManifestError> {
    let content = toml::to_string_pretty(manifest)?;
    std::fs::write(path, content).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}
