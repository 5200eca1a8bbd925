//! Test doubles for the generator's collaborators.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use eyre::eyre;

use crate::{
    generator::{
        DirectoryError, GeneratedProject, GenerationDirectory, GenerationOptions,
        ProjectDirectoryHelping, ProjectGenerating,
    },
    graph::{Graph, Project},
    support::{CommandChecking, Printing, ResourceLocating, SystemError, Systeming},
};

#[derive(Debug, Default)]
pub struct MockPrinter {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl MockPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, kind: &'static str, message: &str) {
        self.lines.lock().unwrap().push((kind, message.to_string()));
    }

    pub fn sections(&self) -> Vec<String> {
        self.of_kind("section")
    }

    pub fn of_kind(&self, kind: &str) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Printing for MockPrinter {
    fn print_section(&self, message: &str) {
        self.record("section", message);
    }

    fn print_success(&self, message: &str) {
        self.record("success", message);
    }

    fn print_warning(&self, message: &str) {
        self.record("warning", message);
    }
}

#[derive(Debug, Default)]
pub struct MockSystem {
    commands: Mutex<Vec<Vec<String>>>,
}

impl MockSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands.lock().unwrap().clone()
    }

    fn record(&self, args: &[&str]) {
        self.commands
            .lock()
            .unwrap()
            .push(args.iter().map(|a| a.to_string()).collect());
    }
}

impl Systeming for MockSystem {
    fn run(&self, args: &[&str]) -> Result<(), SystemError> {
        self.record(args);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockCommandCheck {
    /// Called for every check; `None` accepts every command.
    pub check_stub: Option<Box<dyn Fn(&str) -> Result<(), SystemError>>>,
}

impl CommandChecking for MockCommandCheck {
    fn check(&self, command: &str) -> Result<(), SystemError> {
        match &self.check_stub {
            Some(stub) => stub(command),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
pub struct MockResourceLocator {
    cli_path: PathBuf,
}

impl MockResourceLocator {
    pub fn new(cli_path: impl Into<PathBuf>) -> Self {
        Self {
            cli_path: cli_path.into(),
        }
    }
}

impl ResourceLocating for MockResourceLocator {
    fn cli_path(&self) -> std::io::Result<PathBuf> {
        Ok(self.cli_path.clone())
    }
}

/// Generates into the source directories like manifest mode does, whatever
/// mode is asked for, and records the requested modes.
#[derive(Debug)]
pub struct MockProjectDirectoryHelper {
    root: PathBuf,
    modes: Mutex<Vec<GenerationDirectory>>,
    project_directories: Mutex<usize>,
    fail_root: Mutex<bool>,
    fail_on: Mutex<Option<String>>,
}

impl MockProjectDirectoryHelper {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            modes: Mutex::new(Vec::new()),
            project_directories: Mutex::new(0),
            fail_root: Mutex::new(false),
            fail_on: Mutex::new(None),
        }
    }

    pub fn fail_root(&self) {
        *self.fail_root.lock().unwrap() = true;
    }

    /// Fails project directory setup for the project with this name.
    pub fn fail_on(&self, name: &str) {
        *self.fail_on.lock().unwrap() = Some(name.to_string());
    }

    pub fn modes(&self) -> Vec<GenerationDirectory> {
        self.modes.lock().unwrap().clone()
    }

    pub fn project_directories(&self) -> usize {
        *self.project_directories.lock().unwrap()
    }
}

impl ProjectDirectoryHelping for MockProjectDirectoryHelper {
    fn setup_root_directory(
        &self,
        _name: &str,
        _entry_path: &Path,
        directory: GenerationDirectory,
    ) -> Result<PathBuf, DirectoryError> {
        self.modes.lock().unwrap().push(directory);
        if *self.fail_root.lock().unwrap() {
            return Err(DirectoryError::NotADirectory(self.root.clone()));
        }
        Ok(self.root.clone())
    }

    fn setup_project_directory(
        &self,
        project: &Project,
        directory: GenerationDirectory,
    ) -> Result<PathBuf, DirectoryError> {
        self.modes.lock().unwrap().push(directory);
        *self.project_directories.lock().unwrap() += 1;
        if self.fail_on.lock().unwrap().as_deref() == Some(project.name()) {
            return Err(DirectoryError::NotADirectory(project.path().to_path_buf()));
        }
        std::fs::create_dir_all(project.path()).map_err(|source| DirectoryError::Create {
            path: project.path().to_path_buf(),
            source,
        })?;
        Ok(project.path().to_path_buf())
    }
}

/// Creates an empty `<name>.xcodeproj` directory in the source root.
#[derive(Debug, Default)]
pub struct MockProjectGenerator {
    generated: Mutex<Vec<String>>,
    options: Mutex<Vec<GenerationOptions>>,
    fail_on: Mutex<Option<String>>,
}

impl MockProjectGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, name: &str) {
        *self.fail_on.lock().unwrap() = Some(name.to_string());
    }

    /// Names of the projects generation was attempted for, in order.
    pub fn generated(&self) -> Vec<String> {
        self.generated.lock().unwrap().clone()
    }

    pub fn options(&self) -> Vec<GenerationOptions> {
        self.options.lock().unwrap().clone()
    }
}

impl ProjectGenerating for MockProjectGenerator {
    fn generate(
        &self,
        project: &Project,
        options: &GenerationOptions,
        _graph: &Graph,
        source_root: &Path,
    ) -> eyre::Result<GeneratedProject> {
        self.generated
            .lock()
            .unwrap()
            .push(project.name().to_string());
        self.options.lock().unwrap().push(options.clone());

        if self.fail_on.lock().unwrap().as_deref() == Some(project.name()) {
            return Err(eyre!("stubbed failure for {}", project.name()));
        }

        let path = source_root.join(format!("{}.xcodeproj", project.name()));
        std::fs::create_dir_all(&path)?;
        Ok(GeneratedProject {
            name: project.name().to_string(),
            path,
        })
    }
}
