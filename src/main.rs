mod cli;
mod commands;
mod config;
mod constants;
mod generator;
mod graph;
mod manifest;
#[cfg(test)]
mod mocks;
mod support;
mod utils;
mod xcode;

use clap::Parser;

use crate::cli::Cli;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        cli::Commands::Generate {
            path,
            directory,
            open,
        } => {
            commands::generate(path, directory, open)?;
        }
        cli::Commands::Init {
            path,
            name,
            workspace,
        } => {
            commands::init(path, name, workspace)?;
        }
        cli::Commands::Graph { path, format } => {
            commands::graph(path, format)?;
        }
        cli::Commands::Config { key, value, unset } => {
            commands::config(key, value, unset)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over `-v` flags when set.
fn setup_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    let formatter = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .init();
}
