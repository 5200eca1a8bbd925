use std::path::{Path, PathBuf};
use std::sync::Arc;

use eyre::{Context, eyre};

use crate::{
    constants::PROJECT_EXTENSION,
    generator::{GenerationDirectory, GenerationOptions},
    graph::{Graph, Project},
    support::ResourceLocating,
    xcode::pbxproj::{Object, ObjectId, ProjectFile, Value},
};

pub const PBXPROJ_FILE: &str = "project.pbxproj";

/// Output of generating a single project.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedProject {
    pub name: String,
    /// Path of the `.xcodeproj` bundle.
    pub path: PathBuf,
}

pub trait ProjectGenerating {
    fn generate(
        &self,
        project: &Project,
        options: &GenerationOptions,
        graph: &Graph,
        source_root: &Path,
    ) -> eyre::Result<GeneratedProject>;
}

/// Writes an `.xcodeproj` bundle with a `project.pbxproj` for each project.
pub struct ProjectGenerator {
    resource_locator: Arc<dyn ResourceLocating>,
}

impl ProjectGenerator {
    pub fn new(resource_locator: Arc<dyn ResourceLocating>) -> Self {
        Self { resource_locator }
    }

    fn build_file(
        &self,
        project: &Project,
        options: &GenerationOptions,
        graph: &Graph,
    ) -> eyre::Result<ProjectFile> {
        let name = project.name();
        let id = |role: &str| ObjectId::derive(&format!("{name}:{role}"));

        let main_group = Object::new(id("mainGroup"), "PBXGroup", "")
            .field("children", Value::List(Vec::new()))
            .field("sourceTree", Value::string("<group>"));

        let (project_configurations, project_configuration_list) = configuration_list(
            &id,
            "project",
            &format!("Build configuration list for PBXProject \"{name}\""),
        );

        let mut attributes = Vec::new();
        let organization_name = project
            .manifest()
            .project()
            .organization_name
            .as_ref()
            .or(options.organization_name.as_ref());
        if let Some(organization_name) = organization_name {
            attributes.push((
                "ORGANIZATIONNAME".to_string(),
                Value::string(organization_name.clone()),
            ));
        }

        let mut file = ProjectFile::new(options.object_version, id("project"));
        let mut targets = Vec::new();

        if options.regenerate_target {
            let script = regenerate_script(
                &self.cli_path()?,
                graph.entry_path(),
                options.regenerate_directory,
            );
            let phase = Object::new(id("regenerate.phase"), "PBXShellScriptBuildPhase", "Regenerate")
                .field("buildActionMask", Value::string("2147483647"))
                .field("files", Value::List(Vec::new()))
                .field("inputPaths", Value::List(Vec::new()))
                .field("name", Value::string("Regenerate"))
                .field("outputPaths", Value::List(Vec::new()))
                .field("runOnlyForDeploymentPostprocessing", Value::string("0"))
                .field("shellPath", Value::string("/bin/sh"))
                .field("shellScript", Value::string(script));

            let (target_configurations, target_configuration_list) = configuration_list(
                &id,
                "regenerate",
                "Build configuration list for PBXAggregateTarget \"Regenerate\"",
            );

            let target = Object::new(id("regenerate"), "PBXAggregateTarget", "Regenerate")
                .field(
                    "buildConfigurationList",
                    Value::reference(&target_configuration_list),
                )
                .field("buildPhases", Value::List(vec![Value::reference(&phase)]))
                .field("dependencies", Value::List(Vec::new()))
                .field("name", Value::string("Regenerate"))
                .field("productName", Value::string("Regenerate"));

            targets.push(Value::reference(&target));
            file.add(phase);
            file.add(target);
            file.add(target_configuration_list);
            for configuration in target_configurations {
                file.add(configuration);
            }
        }

        let root = Object::new(id("project"), "PBXProject", "Project object")
            .field("attributes", Value::Dict(attributes))
            .field(
                "buildConfigurationList",
                Value::reference(&project_configuration_list),
            )
            .field("compatibilityVersion", Value::string("Xcode 13.0"))
            .field("developmentRegion", Value::string("en"))
            .field("hasScannedForEncodings", Value::string("0"))
            .field("knownRegions", Value::List(vec![Value::string("en"), Value::string("Base")]))
            .field("mainGroup", Value::reference(&main_group))
            .field("projectDirPath", Value::string(""))
            .field("projectRoot", Value::string(""))
            .field("targets", Value::List(targets));

        file.add(root);
        file.add(main_group);
        file.add(project_configuration_list);
        for configuration in project_configurations {
            file.add(configuration);
        }

        Ok(file)
    }

    fn cli_path(&self) -> eyre::Result<PathBuf> {
        self.resource_locator
            .cli_path()
            .map_err(|e| eyre!(e))
            .wrap_err("Failed to locate the xcgen binary")
    }
}

/// Debug and Release configurations plus the list referencing them.
fn configuration_list(
    id: &dyn Fn(&str) -> ObjectId,
    owner: &str,
    comment: &str,
) -> (Vec<Object>, Object) {
    let configurations: Vec<Object> = ["Debug", "Release"]
        .into_iter()
        .map(|name| {
            Object::new(id(&format!("{owner}.{name}")), "XCBuildConfiguration", name)
                .field("buildSettings", Value::Dict(Vec::new()))
                .field("name", Value::string(name))
        })
        .collect();

    let list = Object::new(id(&format!("{owner}.configurations")), "XCConfigurationList", comment)
        .field(
            "buildConfigurations",
            Value::List(configurations.iter().map(Value::reference).collect()),
        )
        .field("defaultConfigurationIsVisible", Value::string("0"))
        .field("defaultConfigurationName", Value::string("Release"));

    (configurations, list)
}

fn regenerate_script(cli_path: &Path, entry_path: &Path, directory: GenerationDirectory) -> String {
    format!(
        "\"{}\" generate --path \"{}\" --directory {directory}\n",
        cli_path.display(),
        entry_path.display()
    )
}

impl ProjectGenerating for ProjectGenerator {
    fn generate(
        &self,
        project: &Project,
        options: &GenerationOptions,
        graph: &Graph,
        source_root: &Path,
    ) -> eyre::Result<GeneratedProject> {
        let name = project.name();
        let path = source_root.join(format!("{name}.{PROJECT_EXTENSION}"));
        tracing::debug!("Generating project '{name}' at {}", path.display());

        let contents = self.build_file(project, options, graph)?.render();

        if path.exists() {
            std::fs::remove_dir_all(&path)
                .map_err(|e| eyre!(e))
                .wrap_err_with(|| format!("Failed to remove {}", path.display()))?;
        }

        std::fs::create_dir_all(&path)
            .map_err(|e| eyre!(e))
            .wrap_err_with(|| format!("Failed to create {}", path.display()))?;

        let pbxproj_path = path.join(PBXPROJ_FILE);
        std::fs::write(&pbxproj_path, contents)
            .map_err(|e| eyre!(e))
            .wrap_err_with(|| format!("Failed to write {}", pbxproj_path.display()))?;

        Ok(GeneratedProject {
            name: name.to_string(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mocks::MockResourceLocator, xcode::pbxproj::quote};

    fn generator() -> ProjectGenerator {
        ProjectGenerator::new(Arc::new(MockResourceLocator::new("/usr/local/bin/xcgen")))
    }

    fn project_in(dir: &Path, name: &str) -> (Project, Graph) {
        let project = Project::new(name, dir.join(name));
        let graph = Graph::new("Suite", dir, vec![project.clone()]);
        (project, graph)
    }

    #[test]
    fn test_writes_pbxproj_in_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let (project, graph) = project_in(dir.path(), "App");
        let source_root = dir.path().join("App");

        let generated = generator()
            .generate(&project, &GenerationOptions::default(), &graph, &source_root)
            .unwrap();

        assert_eq!(generated.name, "App");
        assert_eq!(generated.path, source_root.join("App.xcodeproj"));
        let contents = std::fs::read_to_string(generated.path.join(PBXPROJ_FILE)).unwrap();
        assert!(contents.contains("objectVersion = 55;"));
        assert!(contents.contains("isa = PBXAggregateTarget;"));
        assert!(contents.contains("/usr/local/bin/xcgen"));
        assert!(contents.contains("generate --path"));
        assert!(contents.contains("--directory manifest"));
    }

    #[test]
    fn test_regenerate_script_keeps_generation_mode() {
        let dir = tempfile::tempdir().unwrap();
        let (project, graph) = project_in(dir.path(), "App");
        let options = GenerationOptions {
            regenerate_directory: GenerationDirectory::Derived,
            ..Default::default()
        };

        let rendered = generator()
            .build_file(&project, &options, &graph)
            .unwrap()
            .render();
        let expected = quote(&format!(
            "\"/usr/local/bin/xcgen\" generate --path \"{}\" --directory derived\n",
            dir.path().display()
        ));
        assert!(rendered.contains(&format!("shellScript = {expected};")));
    }

    #[test]
    fn test_regeneration_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let (project, graph) = project_in(dir.path(), "App");
        let source_root = dir.path().join("App");
        let options = GenerationOptions::default();

        let first = generator()
            .generate(&project, &options, &graph, &source_root)
            .unwrap();
        let before = std::fs::read(first.path.join(PBXPROJ_FILE)).unwrap();
        std::fs::write(first.path.join("stale.txt"), "").unwrap();

        let second = generator()
            .generate(&project, &options, &graph, &source_root)
            .unwrap();
        let after = std::fs::read(second.path.join(PBXPROJ_FILE)).unwrap();

        assert_eq!(before, after);
        assert!(!second.path.join("stale.txt").exists());
    }

    #[test]
    fn test_options_shape_the_project() {
        let dir = tempfile::tempdir().unwrap();
        let (project, graph) = project_in(dir.path(), "App");
        let options = GenerationOptions {
            organization_name: Some("Acme Inc".to_string()),
            object_version: 56,
            regenerate_target: false,
            ..Default::default()
        };

        let file = generator().build_file(&project, &options, &graph).unwrap();
        let rendered = file.render();

        assert!(rendered.contains("objectVersion = 56;"));
        assert!(rendered.contains("ORGANIZATIONNAME = \"Acme Inc\";"));
        assert!(!file.objects().iter().any(|o| o.isa == "PBXAggregateTarget"));
        assert_eq!(
            file.objects()
                .iter()
                .filter(|o| o.isa == "XCBuildConfiguration")
                .count(),
            2
        );
    }

    #[test]
    fn test_manifest_organization_wins_over_options() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("App");
        let manifest = crate::manifest::ProjectManifest {
            project: crate::manifest::ProjectMetadata {
                organization_name: Some("Team".to_string()),
                ..Default::default()
            },
        };
        let project = Project::from_manifest(manifest_path, manifest, Vec::new()).unwrap();
        let graph = Graph::new("App", dir.path(), vec![project.clone()]);
        let options = GenerationOptions {
            organization_name: Some("Acme".to_string()),
            ..Default::default()
        };

        let rendered = generator()
            .build_file(&project, &options, &graph)
            .unwrap()
            .render();
        assert!(rendered.contains("ORGANIZATIONNAME = Team;"));
    }
}
