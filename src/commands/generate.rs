use std::path::{Path, PathBuf};

use eyre::{Context, eyre};

use crate::{
    commands::directory_or_current,
    config::Config,
    generator::{
        GenerationDirectory, GenerationOptions, ProjectDirectoryHelper, ProjectDirectoryHelping,
        WorkspaceGenerating, WorkspaceGenerator,
    },
    constants::WORKSPACE_EXTENSION,
    graph::{Graph, GraphLoader},
    support::{CommandCheck, CommandChecking, Printer, Printing},
    xcode::Workspace,
};

/// Loads the manifest at `path` and generates its workspace.
pub fn generate(
    path: Option<PathBuf>,
    directory: Option<GenerationDirectory>,
    open: bool,
) -> eyre::Result<()> {
    let config = Config::load()
        .map_err(|e| eyre!(e))
        .wrap_err("Failed to load application config")?;

    let path = directory_or_current(path)?;
    let graph = GraphLoader::new()
        .load(&path)
        .map_err(|e| eyre!(e))
        .wrap_err_with(|| format!("Failed to load manifests from {}", path.display()))?;

    let directory = directory.unwrap_or(config.directory());
    let derived_root = config.derived_root()?;
    tracing::info!(
        "Generating '{}' ({} projects) in {directory} mode",
        graph.name(),
        graph.projects().len()
    );

    // References resolve against the workspace location, so they are made
    // relative to the directory the workspace ends up in.
    let root_path = ProjectDirectoryHelper::new(&derived_root)
        .setup_root_directory(graph.name(), graph.entry_path(), directory)
        .map_err(|e| eyre!(e))
        .wrap_err("Failed to set up workspace directory")?;

    let options = GenerationOptions {
        regenerate_directory: directory,
        ..config.generation_options()
    };
    let request = GenerateRequest {
        root_path,
        options,
        directory,
        open,
    };

    run(
        &WorkspaceGenerator::with_defaults(derived_root),
        &CommandCheck::new(),
        &Printer::new(),
        &graph,
        &request,
    )?;

    Ok(())
}

struct GenerateRequest {
    root_path: PathBuf,
    options: GenerationOptions,
    directory: GenerationDirectory,
    open: bool,
}

fn run(
    generator: &WorkspaceGenerator,
    command_check: &dyn CommandChecking,
    printer: &dyn Printing,
    graph: &Graph,
    request: &GenerateRequest,
) -> eyre::Result<PathBuf> {
    // Checked before anything is generated.
    if request.open {
        command_check
            .check("open")
            .map_err(|e| eyre!(e))
            .wrap_err("Cannot open the workspace")?;
    }

    let previous = read_existing(
        &request
            .root_path
            .join(format!("{}.{WORKSPACE_EXTENSION}", graph.name())),
    );

    let workspace_path = generator
        .generate(
            &request.root_path,
            graph,
            &request.options,
            request.directory,
        )
        .map_err(|e| eyre!(e))
        .wrap_err_with(|| format!("Failed to generate workspace for '{}'", graph.name()))?;

    let display_path = display_relative(&workspace_path, graph.entry_path());
    if previous.is_some() && previous == read_existing(&workspace_path) {
        printer.print_success(&format!("{display_path} is up to date"));
    } else {
        printer.print_success(&format!("Generated {display_path}"));
    }
    if graph.projects().is_empty() {
        printer.print_warning("The workspace does not reference any projects");
    }

    if request.open {
        generator
            .open(&workspace_path)
            .map_err(|e| eyre!(e))
            .wrap_err_with(|| format!("Failed to open {}", workspace_path.display()))?;
    }

    Ok(workspace_path)
}

fn read_existing(path: &Path) -> Option<Workspace> {
    if !path.exists() {
        return None;
    }
    match Workspace::read(path) {
        Ok(workspace) => Some(workspace),
        Err(e) => {
            tracing::debug!("Ignoring unreadable workspace {}: {e}", path.display());
            None
        }
    }
}

fn display_relative(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(relative) => relative.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}
