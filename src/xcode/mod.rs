pub mod pbxproj;
pub mod workspace;

pub use workspace::{FileRef, Location, Workspace, WorkspaceData, WorkspaceDataError, WorkspaceElement};
