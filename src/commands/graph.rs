use std::path::PathBuf;

use eyre::{Context, eyre};
use serde::Serialize;

use crate::{
    cli::GraphFormat,
    commands::directory_or_current,
    graph::{Graph, GraphLoader},
    utils::ui::UserInterface,
};

#[derive(Debug, Serialize)]
struct GraphReport {
    name: String,
    entry_path: PathBuf,
    projects: Vec<ProjectReport>,
}

#[derive(Debug, Serialize)]
struct ProjectReport {
    name: String,
    path: PathBuf,
    dependencies: Vec<String>,
}

impl From<&Graph> for GraphReport {
    fn from(graph: &Graph) -> Self {
        Self {
            name: graph.name().to_string(),
            entry_path: graph.entry_path().to_path_buf(),
            projects: graph
                .projects()
                .iter()
                .map(|project| ProjectReport {
                    name: project.name().to_string(),
                    path: project.path().to_path_buf(),
                    dependencies: graph
                        .dependencies_of(project)
                        .map(|dep| dep.name().to_string())
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Prints the projects that `generate` would process, in order.
pub fn graph(path: Option<PathBuf>, format: GraphFormat) -> eyre::Result<()> {
    let path = directory_or_current(path)?;
    let graph = GraphLoader::new()
        .load(&path)
        .map_err(|e| eyre!(e))
        .wrap_err_with(|| format!("Failed to load manifests from {}", path.display()))?;
    let report = GraphReport::from(&graph);

    match format {
        GraphFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| eyre!(e))
                .wrap_err("Failed to format graph as JSON")?;
            println!("{json}");
        }
        GraphFormat::Text => print_report(&report, &UserInterface::new())?,
    }

    Ok(())
}

fn print_report(report: &GraphReport, ui: &UserInterface) -> std::io::Result<()> {
    if report.projects.is_empty() {
        return ui.warning_item(
            &format!("No projects found in '{}'", report.name),
            Some("List project directories under [workspace] projects"),
        );
    }

    ui.section(&format!("Projects in {}:", report.name))?;
    for project in &report.projects {
        ui.info_item(&format!(
            "{} {}",
            project.name,
            ui.theme.path(&project.path.display().to_string())
        ))?;
        ui.indented(|ui| {
            for dep in &project.dependencies {
                ui.writeln(&format!("{} {dep}", ui.theme.arrow_symbol()))?;
            }
            Ok(())
        })?;
    }
    ui.new_line()
}
