use serde::{Deserialize, Serialize};

/// Where generated projects and the workspace are placed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GenerationDirectory {
    /// Next to the manifests.
    #[default]
    Manifest,
    /// In the derived projects directory, keeping the source tree clean.
    Derived,
}

impl std::fmt::Display for GenerationDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manifest => write!(f, "manifest"),
            Self::Derived => write!(f, "derived"),
        }
    }
}

impl std::str::FromStr for GenerationDirectory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manifest" => Ok(Self::Manifest),
            "derived" => Ok(Self::Derived),
            _ => Err(format!(
                "Unknown generation directory '{s}'. Expected 'manifest' or 'derived'"
            )),
        }
    }
}

/// Options forwarded untouched to every project generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub organization_name: Option<String>,
    /// `objectVersion` written to `project.pbxproj`.
    pub object_version: u32,
    /// Adds a `Regenerate` target that re-runs the generator from Xcode.
    pub regenerate_target: bool,
    /// Mode the `Regenerate` target passes back to `generate`.
    pub regenerate_directory: GenerationDirectory,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            organization_name: None,
            object_version: 55,
            regenerate_target: true,
            regenerate_directory: GenerationDirectory::default(),
        }
    }
}
