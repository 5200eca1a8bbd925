mod directory;
mod options;
mod project;
mod workspace;

pub use directory::{DirectoryError, ProjectDirectoryHelper, ProjectDirectoryHelping};
pub use options::{GenerationDirectory, GenerationOptions};
pub use project::{ProjectGenerating, ProjectGenerator};
pub use workspace::{WorkspaceGenerating, WorkspaceGenerator};

#[cfg(test)]
pub use project::GeneratedProject;
