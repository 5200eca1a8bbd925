use std::process::{Command, Stdio};

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("No command given")]
    EmptyCommand,
    #[error("Command '{0}' was not found in PATH")]
    CommandNotFound(String),
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{command}' exited with {}", exit_label(.code))]
    Failed { command: String, code: Option<i32> },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Runs external processes.
pub trait Systeming {
    /// Runs the command with inherited stdio, waiting for it to finish.
    fn run(&self, args: &[&str]) -> Result<(), SystemError>;
}

#[derive(Debug, Default, Clone)]
pub struct System;

impl System {
    pub fn new() -> Self {
        Self
    }

    fn command(args: &[&str]) -> Result<Command, SystemError> {
        let (program, rest) = args.split_first().ok_or(SystemError::EmptyCommand)?;
        let mut command = Command::new(program);
        command.args(rest);
        Ok(command)
    }
}

impl Systeming for System {
    fn run(&self, args: &[&str]) -> Result<(), SystemError> {
        let joined = args.join(" ");
        tracing::debug!("Running: {joined}");

        let status = Self::command(args)?
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| SystemError::Spawn {
                command: joined.clone(),
                source,
            })?;

        if !status.success() {
            return Err(SystemError::Failed {
                command: joined,
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Verifies that a command is available before relying on it.
pub trait CommandChecking {
    fn check(&self, command: &str) -> Result<(), SystemError>;
}

#[derive(Debug, Default, Clone)]
pub struct CommandCheck;

impl CommandCheck {
    pub fn new() -> Self {
        Self
    }
}

impl CommandChecking for CommandCheck {
    fn check(&self, command: &str) -> Result<(), SystemError> {
        which::which(command)
            .map(|path| tracing::debug!("Found '{command}' at {}", path.display()))
            .map_err(|_| SystemError::CommandNotFound(command.to_string()))
    }
}
