mod dependency;
mod loader;
mod project;

use std::path::{Path, PathBuf};

pub use dependency::{DependencyGraph, DependencyGraphError};
pub use loader::GraphLoader;
pub use project::Project;

/// A resolved set of projects, ordered dependencies first.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    entry_path: PathBuf,
    projects: Vec<Project>,
}

impl Graph {
    pub fn new(name: impl Into<String>, entry_path: impl Into<PathBuf>, projects: Vec<Project>) -> Self {
        Self {
            name: name.into(),
            entry_path: entry_path.into(),
            projects,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the graph was loaded from.
    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, path: &Path) -> Option<&Project> {
        self.projects.iter().find(|p| p.path() == path)
    }

    pub fn dependencies_of<'a>(&'a self, project: &'a Project) -> impl Iterator<Item = &'a Project> {
        project
            .dependencies()
            .iter()
            .filter_map(|path| self.project(path))
    }
}
