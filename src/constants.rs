pub const ORGANIZATION_NAME: &str = "xcgen";
pub const PROJECT_NAME: &str = "xcgen";

pub const PROJECT_MANIFEST: &str = "Project.toml";
pub const WORKSPACE_MANIFEST: &str = "Workspace.toml";

pub const WORKSPACE_EXTENSION: &str = "xcworkspace";
pub const PROJECT_EXTENSION: &str = "xcodeproj";

/// Name of the directory under the cache dir holding derived projects.
pub const DERIVED_PROJECTS_DIR: &str = "DerivedProjects";

pub const ENV_PREFIX: &str = "XCGEN";
