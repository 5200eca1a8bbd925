use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::{
    constants::{PROJECT_MANIFEST, WORKSPACE_MANIFEST},
    graph::{DependencyGraph, DependencyGraphError, Graph, Project},
    manifest::{self, ManifestError, ProjectManifest, WorkspaceManifest},
};

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("No {} or {} found in {}", PROJECT_MANIFEST, WORKSPACE_MANIFEST, .0.display())]
    ManifestNotFound(PathBuf),
    #[error("Failed to resolve {}: {source}", .path.display())]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot infer a project name from {}", .0.display())]
    UnnamedProject(PathBuf),
    #[error("Invalid name '{name}' in {}: names cannot be empty or contain path separators", .path.display())]
    InvalidName { name: String, path: PathBuf },
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Dependency(#[from] DependencyGraphError),
}

/// Builds a [`Graph`] from the manifests found on disk.
#[derive(Debug, Default)]
pub struct GraphLoader;

impl GraphLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads the graph rooted at `path`, preferring a workspace manifest over a
    /// project manifest.
    pub fn load(&self, path: &Path) -> Result<Graph, GraphError> {
        let entry_path = canonicalize(path)?;

        let workspace: Option<WorkspaceManifest> =
            manifest::load(&entry_path.join(WORKSPACE_MANIFEST))?;

        let (name, seeds) = if let Some(workspace) = workspace {
            let seeds = workspace
                .workspace()
                .projects
                .iter()
                .map(|p| resolve(&entry_path, p))
                .collect();
            (workspace.workspace().name.clone(), seeds)
        } else {
            let project: Option<ProjectManifest> =
                manifest::load(&entry_path.join(PROJECT_MANIFEST))?;
            let Some(project) = project else {
                return Err(GraphError::ManifestNotFound(entry_path));
            };
            let name = match project.project().name.clone() {
                Some(name) => name,
                None => Project::infer_name(&entry_path)
                    .ok_or_else(|| GraphError::UnnamedProject(entry_path.clone()))?,
            };
            (name, vec![entry_path.clone()])
        };

        check_name(&name, &entry_path)?;
        tracing::info!("Loading graph '{name}' from {}", entry_path.display());
        let projects = self.load_projects(seeds)?;
        Ok(Graph::new(name, entry_path, projects))
    }

    /// Follows dependencies transitively, loading each project once, and returns
    /// them in build order.
    fn load_projects(&self, seeds: Vec<PathBuf>) -> Result<Vec<Project>, GraphError> {
        let mut loaded: BTreeMap<PathBuf, Project> = BTreeMap::new();
        let mut dependency_graph = DependencyGraph::new();
        let listed: BTreeSet<PathBuf> = seeds.iter().cloned().collect();
        let mut queue: VecDeque<PathBuf> = seeds.into();

        while let Some(path) = queue.pop_front() {
            if loaded.contains_key(&path) {
                continue;
            }

            let manifest: Option<ProjectManifest> =
                manifest::load(&path.join(PROJECT_MANIFEST))?;
            let Some(manifest) = manifest else {
                if listed.contains(&path) {
                    return Err(GraphError::ManifestNotFound(path));
                }
                // Left out of the dependency graph so validation reports it.
                tracing::debug!("No project manifest in {}", path.display());
                continue;
            };

            let dependencies: Vec<PathBuf> = manifest
                .project()
                .depends_on
                .iter()
                .map(|dep| resolve(&path, dep))
                .collect();

            tracing::debug!(
                "Loaded project at {} with {} dependencies",
                path.display(),
                dependencies.len()
            );

            dependency_graph.add_project(path.clone(), dependencies.clone());
            queue.extend(dependencies.iter().cloned());

            let project = Project::from_manifest(path.clone(), manifest, dependencies)
                .ok_or_else(|| GraphError::UnnamedProject(path.clone()))?;
            check_name(project.name(), &path)?;
            loaded.insert(path, project);
        }

        let order = dependency_graph.resolve_build_order()?;
        Ok(order
            .into_iter()
            .filter_map(|path| loaded.remove(&path))
            .collect())
    }
}

/// Names become file names of generated bundles, so they must be a single
/// path component.
fn check_name(name: &str, path: &Path) -> Result<(), GraphError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\']);
    if invalid {
        return Err(GraphError::InvalidName {
            name: name.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn canonicalize(path: &Path) -> Result<PathBuf, GraphError> {
    path.canonicalize().map_err(|source| GraphError::Canonicalize {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves a manifest-relative path. Paths that do not exist are kept as
/// joined so that they surface as missing dependencies.
fn resolve(base: &Path, relative: &Path) -> PathBuf {
    let joined = base.join(relative);
    joined.canonicalize().unwrap_or(joined)
}
