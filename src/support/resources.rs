use std::path::PathBuf;

/// Looks up paths of resources the generated files refer to.
pub trait ResourceLocating {
    /// Absolute path of the running CLI binary.
    fn cli_path(&self) -> std::io::Result<PathBuf>;
}

#[derive(Debug, Default, Clone)]
pub struct ResourceLocator;

impl ResourceLocator {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceLocating for ResourceLocator {
    fn cli_path(&self) -> std::io::Result<PathBuf> {
        let path = std::env::current_exe()?;
        // Resolve symlinks so the path stays valid across package manager upgrades.
        path.canonicalize()
    }
}
