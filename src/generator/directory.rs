use std::path::{Path, PathBuf};

use crate::{
    constants::DERIVED_PROJECTS_DIR, generator::GenerationDirectory, graph::Project,
    utils::{get_project_dirs, path::sha256_hex},
};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// Computes and creates the directories generated files are written to.
pub trait ProjectDirectoryHelping {
    /// Directory the workspace of the graph `name` loaded from `entry_path` goes in.
    fn setup_root_directory(
        &self,
        name: &str,
        entry_path: &Path,
        directory: GenerationDirectory,
    ) -> Result<PathBuf, DirectoryError>;

    /// Directory the given project is generated in.
    fn setup_project_directory(
        &self,
        project: &Project,
        directory: GenerationDirectory,
    ) -> Result<PathBuf, DirectoryError>;
}

#[derive(Debug, Clone)]
pub struct ProjectDirectoryHelper {
    derived_root: PathBuf,
}

impl ProjectDirectoryHelper {
    pub fn new(derived_root: impl Into<PathBuf>) -> Self {
        Self {
            derived_root: derived_root.into(),
        }
    }

    /// Default location of derived projects, inside the user's cache directory.
    pub fn default_derived_root() -> eyre::Result<PathBuf> {
        Ok(get_project_dirs()?.cache_dir().join(DERIVED_PROJECTS_DIR))
    }

    /// `<derived_root>/<name>-<hash>`, where the hash keeps same-named
    /// projects from different locations apart.
    fn derived_path(&self, name: &str, source: &Path) -> PathBuf {
        let digest = sha256_hex(source.to_string_lossy().as_bytes());
        self.derived_root.join(format!("{name}-{}", &digest[..16]))
    }

    fn ensure_directory(path: PathBuf) -> Result<PathBuf, DirectoryError> {
        if path.exists() && !path.is_dir() {
            return Err(DirectoryError::NotADirectory(path));
        }

        std::fs::create_dir_all(&path).map_err(|source| DirectoryError::Create {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Using directory {}", path.display());

        Ok(path)
    }
}

impl ProjectDirectoryHelping for ProjectDirectoryHelper {
    fn setup_root_directory(
        &self,
        name: &str,
        entry_path: &Path,
        directory: GenerationDirectory,
    ) -> Result<PathBuf, DirectoryError> {
        let path = match directory {
            GenerationDirectory::Manifest => entry_path.to_path_buf(),
            GenerationDirectory::Derived => self.derived_path(name, entry_path),
        };
        Self::ensure_directory(path)
    }

    fn setup_project_directory(
        &self,
        project: &Project,
        directory: GenerationDirectory,
    ) -> Result<PathBuf, DirectoryError> {
        let path = match directory {
            GenerationDirectory::Manifest => project.path().to_path_buf(),
            GenerationDirectory::Derived => self.derived_path(project.name(), project.path()),
        };
        Self::ensure_directory(path)
    }
}
