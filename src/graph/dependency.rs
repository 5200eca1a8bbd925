use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::PathBuf;

use itertools::Itertools;

/// Dependency edges between projects, keyed by project directory.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Map from project to the projects it depends on
    dependencies: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
    /// Every project mentioned, including bare dependencies
    projects: BTreeSet<PathBuf>,
    /// Projects that were added with their own manifest
    explicit_projects: BTreeSet<PathBuf>,
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display()).join(", ")
}

fn display_edges(edges: &[(PathBuf, PathBuf)]) -> String {
    edges
        .iter()
        .map(|(project, dep)| format!("{} -> {}", project.display(), dep.display()))
        .join(", ")
}

#[derive(Debug, thiserror::Error)]
pub enum DependencyGraphError {
    #[error("Circular dependency detected among projects: {}", display_paths(.0))]
    CircularDependency(Vec<PathBuf>),
    #[error("Missing dependencies: {}", display_edges(.0))]
    MissingDependencies(Vec<(PathBuf, PathBuf)>),
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project(&mut self, project: PathBuf, depends_on: Vec<PathBuf>) {
        self.projects.insert(project.clone());
        self.explicit_projects.insert(project.clone());

        for dep in &depends_on {
            self.projects.insert(dep.clone());
        }

        self.dependencies
            .insert(project, depends_on.into_iter().collect());
    }

    /// Projects in build order: every project comes after the projects it depends on.
    pub fn resolve_build_order(&self) -> Result<Vec<PathBuf>, DependencyGraphError> {
        self.validate_dependencies()?;
        self.topological_sort()
    }

    /// Kahn's algorithm; ties are broken by path order.
    fn topological_sort(&self) -> Result<Vec<PathBuf>, DependencyGraphError> {
        let mut in_degree: BTreeMap<&PathBuf, usize> =
            self.projects.iter().map(|p| (p, 0)).collect();

        for (project, deps) in &self.dependencies {
            if let Some(degree) = in_degree.get_mut(project) {
                *degree = deps.len();
            }
        }

        let mut queue: VecDeque<&PathBuf> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(project, _)| *project)
            .collect();

        let mut result = Vec::new();
        let mut processed = BTreeSet::new();

        while let Some(project) = queue.pop_front() {
            result.push(project.clone());
            processed.insert(project.clone());

            for (dependent, deps) in &self.dependencies {
                if deps.contains(project)
                    && let Some(degree) = in_degree.get_mut(dependent)
                {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        if result.len() != self.projects.len() {
            let remaining = self.projects.difference(&processed).cloned().collect();
            return Err(DependencyGraphError::CircularDependency(remaining));
        }

        Ok(result)
    }

    pub fn validate_dependencies(&self) -> Result<(), DependencyGraphError> {
        let missing: Vec<_> = self
            .dependencies
            .iter()
            .flat_map(|(project, deps)| deps.iter().map(move |dep| (project, dep)))
            .filter(|(_, dep)| !self.explicit_projects.contains(*dep))
            .map(|(project, dep)| (project.clone(), dep.clone()))
            .collect();

        if !missing.is_empty() {
            return Err(DependencyGraphError::MissingDependencies(missing));
        }

        Ok(())
    }
}
