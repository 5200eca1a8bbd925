use std::path::{Path, PathBuf};

use eyre::{Context, bail, eyre};

use crate::{
    commands::directory_or_current,
    constants::{PROJECT_MANIFEST, WORKSPACE_MANIFEST},
    graph::Project,
    manifest::{self, ProjectManifest, ProjectMetadata, WorkspaceManifest, WorkspaceMetadata},
    utils::ui::UserInterface,
};

pub fn init(path: Option<PathBuf>, name: Option<String>, workspace: bool) -> eyre::Result<()> {
    let dir = directory_or_current(path)?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| eyre!(e))
        .wrap_err_with(|| format!("Failed to create {}", dir.display()))?;

    let name = match name {
        Some(name) => name,
        None => prompt_name(&dir)?,
    };

    let manifest_path =
        write_manifest(&dir, name, workspace).wrap_err("Failed to write manifest")?;

    UserInterface::new().success_item(&format!("Created {}", manifest_path.display()))?;
    Ok(())
}

/// Asks for a name when attached to a terminal, falling back to the directory name.
fn prompt_name(dir: &Path) -> eyre::Result<String> {
    let canonical = dir
        .canonicalize()
        .map_err(|e| eyre!(e))
        .wrap_err_with(|| format!("Failed to resolve {}", dir.display()))?;
    let default = Project::infer_name(&canonical)
        .ok_or_else(|| eyre!("Cannot infer a name from {}", canonical.display()))?;

    if !console::Term::stdout().is_term() {
        return Ok(default);
    }

    dialoguer::Input::<String>::new()
        .with_prompt("Name")
        .default(default)
        .interact_text()
        .map_err(|e| eyre!(e))
        .wrap_err("Failed to read name")
}

fn write_manifest(dir: &Path, name: String, workspace: bool) -> eyre::Result<PathBuf> {
    let manifest_path = dir.join(if workspace {
        WORKSPACE_MANIFEST
    } else {
        PROJECT_MANIFEST
    });
    if manifest_path.exists() {
        bail!("Manifest file already exists at {}", manifest_path.display());
    }

    let result = if workspace {
        let manifest = WorkspaceManifest {
            workspace: WorkspaceMetadata {
                name,
                projects: Vec::new(),
            },
        };
        manifest::save(&manifest, &manifest_path)
    } else {
        let manifest = ProjectManifest {
            project: ProjectMetadata {
                name: Some(name),
                ..Default::default()
            },
        };
        manifest::save(&manifest, &manifest_path)
    };
    result.map_err(|e| eyre!(e))?;

    Ok(manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphLoader;

    #[test]
    fn test_project_manifest_loads_as_graph() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_manifest(dir.path(), "App".to_string(), false).unwrap();
        assert_eq!(path, dir.path().join(PROJECT_MANIFEST));

        let graph = GraphLoader::new().load(dir.path()).unwrap();
        assert_eq!(graph.name(), "App");
        assert_eq!(graph.projects().len(), 1);
    }

    #[test]
    fn test_workspace_manifest_starts_empty() {
        let dir = tempfile::tempdir().unwrap();

        write_manifest(dir.path(), "Suite".to_string(), true).unwrap();

        let graph = GraphLoader::new().load(dir.path()).unwrap();
        assert_eq!(graph.name(), "Suite");
        assert!(graph.projects().is_empty());
    }

    #[test]
    fn test_existing_manifest_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECT_MANIFEST);
        std::fs::write(&path, "[project]\nname = \"Mine\"\n").unwrap();

        let err = write_manifest(dir.path(), "App".to_string(), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[project]\nname = \"Mine\"\n"
        );
    }
}
