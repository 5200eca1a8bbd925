use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::generator::GenerationDirectory;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity for debugging purposes.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the Xcode workspace and projects for a manifest.
    Generate {
        /// Directory containing a Workspace.toml or Project.toml. Defaults to the current directory.
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Where to write generated files. Defaults to the configured directory.
        #[arg(short, long, value_enum)]
        directory: Option<GenerationDirectory>,

        /// Open the workspace in Xcode once generated.
        #[arg(long)]
        open: bool,
    },

    /// Create a manifest in a directory.
    Init {
        /// The directory to initialize. Defaults to the current directory.
        path: Option<PathBuf>,

        /// The name of the project or workspace. Defaults to the directory name.
        #[arg(short, long)]
        name: Option<String>,

        /// Write a Workspace.toml instead of a Project.toml.
        #[arg(short, long)]
        workspace: bool,
    },

    /// Print the projects of a manifest in generation order.
    Graph {
        /// Directory containing a Workspace.toml or Project.toml. Defaults to the current directory.
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = GraphFormat::Text)]
        format: GraphFormat,
    },

    /// Manage the configuration of the xcgen CLI.
    Config {
        /// The property key to set or get (e.g., "directory").
        key: String,

        /// The value to set for the property. If omitted, prints the current value.
        value: Option<String>,

        /// Whether to unset the property instead of setting it.
        #[arg(short, long)]
        unset: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Human readable list.
    Text,
    /// JSON document.
    Json,
}
