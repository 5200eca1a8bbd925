use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    constants::WORKSPACE_EXTENSION,
    generator::{
        DirectoryError, GenerationDirectory, GenerationOptions, ProjectDirectoryHelper,
        ProjectDirectoryHelping, ProjectGenerating, ProjectGenerator,
    },
    graph::Graph,
    support::{Printer, Printing, ResourceLocator, System, SystemError, Systeming},
    utils::path::{relative_to, to_slash},
    xcode::{FileRef, Location, Workspace, WorkspaceData, WorkspaceDataError, WorkspaceElement},
};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Failed to set up generation directory")]
    DirectorySetup(#[from] DirectoryError),
    #[error("Failed to generate project '{project}'")]
    ProjectGeneration {
        project: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("Cannot reference {} relative to {}", .path.display(), .base.display())]
    RelativePath { path: PathBuf, base: PathBuf },
    #[error("Failed to write workspace {}", .path.display())]
    DescriptorWrite {
        path: PathBuf,
        #[source]
        source: WorkspaceDataError,
    },
}

pub trait WorkspaceGenerating {
    /// Generates every project of `graph` and a workspace referencing them,
    /// returning the path of the workspace.
    ///
    /// References are stored relative to `root_path`. Pass
    /// `GenerationDirectory::default()` to generate next to the manifests.
    fn generate(
        &self,
        root_path: &Path,
        graph: &Graph,
        options: &GenerationOptions,
        directory: GenerationDirectory,
    ) -> Result<PathBuf, GenerateError>;
}

pub struct WorkspaceGenerator {
    project_generator: Arc<dyn ProjectGenerating>,
    system: Arc<dyn Systeming>,
    printer: Arc<dyn Printing>,
    directory_helper: Arc<dyn ProjectDirectoryHelping>,
}

impl WorkspaceGenerator {
    pub fn new(
        system: Arc<dyn Systeming>,
        printer: Arc<dyn Printing>,
        directory_helper: Arc<dyn ProjectDirectoryHelping>,
        project_generator: Arc<dyn ProjectGenerating>,
    ) -> Self {
        Self {
            project_generator,
            system,
            printer,
            directory_helper,
        }
    }

    /// Wires the production collaborators, deriving projects under `derived_root`
    /// when asked to.
    pub fn with_defaults(derived_root: PathBuf) -> Self {
        let resource_locator = Arc::new(ResourceLocator::new());
        Self::new(
            Arc::new(System::new()),
            Arc::new(Printer::new()),
            Arc::new(ProjectDirectoryHelper::new(derived_root)),
            Arc::new(ProjectGenerator::new(resource_locator)),
        )
    }

    /// Opens a generated workspace in Xcode.
    pub fn open(&self, workspace_path: &Path) -> Result<(), SystemError> {
        let path = workspace_path.to_string_lossy();
        self.system.run(&["open", path.as_ref()])
    }
}

impl WorkspaceGenerating for WorkspaceGenerator {
    fn generate(
        &self,
        root_path: &Path,
        graph: &Graph,
        options: &GenerationOptions,
        directory: GenerationDirectory,
    ) -> Result<PathBuf, GenerateError> {
        let workspace_root =
            self.directory_helper
                .setup_root_directory(graph.name(), graph.entry_path(), directory)?;

        let workspace_name = format!("{}.{WORKSPACE_EXTENSION}", graph.name());
        self.printer
            .print_section(&format!("Generating workspace {workspace_name}"));
        let workspace_path = workspace_root.join(&workspace_name);
        let mut data = WorkspaceData::default();

        for project in graph.projects() {
            tracing::debug!("Generating project '{}'", project.name());
            let source_root = self
                .directory_helper
                .setup_project_directory(project, directory)?;

            let generated = self
                .project_generator
                .generate(project, options, graph, &source_root)
                .map_err(|e| GenerateError::ProjectGeneration {
                    project: project.name().to_string(),
                    source: e.into(),
                })?;
            tracing::debug!(
                "Generated '{}' at {}",
                generated.name,
                generated.path.display()
            );

            let relative_path = relative_to(&generated.path, root_path).ok_or_else(|| {
                GenerateError::RelativePath {
                    path: generated.path.clone(),
                    base: root_path.to_path_buf(),
                }
            })?;

            data.children.push(WorkspaceElement::File(FileRef {
                location: Location::Group(to_slash(&relative_path)),
            }));
        }

        if workspace_path.exists() {
            tracing::debug!("Replacing workspace {}", workspace_path.display());
        }

        Workspace::new(data)
            .write(&workspace_path, true)
            .map_err(|source| GenerateError::DescriptorWrite {
                path: workspace_path.clone(),
                source,
            })?;
        tracing::info!("Wrote workspace {}", workspace_path.display());

        Ok(workspace_path)
    }
}
