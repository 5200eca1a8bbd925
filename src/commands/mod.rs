mod config;
mod generate;
mod graph;
mod init;

use std::path::PathBuf;

use eyre::{Context, eyre};

pub use config::config;
pub use generate::generate;
pub use graph::graph;
pub use init::init;

/// Uses the given directory, or the current one.
fn directory_or_current(dir: Option<PathBuf>) -> eyre::Result<PathBuf> {
    match dir {
        Some(d) => Ok(d),
        None => std::env::current_dir()
            .map_err(|e| eyre!(e))
            .wrap_err("Failed to get current directory"),
    }
}
