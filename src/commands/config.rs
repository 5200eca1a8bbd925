use std::path::PathBuf;

use crate::{config::Config, generator::GenerationDirectory, utils::theme::Theme};
use eyre::{WrapErr, eyre};

pub enum ConfigAction {
    Show,
    Set(String),
    Unset,
}

const SUPPORTED_KEYS: &str = "directory, organization-name, derived-root, regenerate-target";

pub fn config(key: String, value: Option<String>, unset: bool) -> eyre::Result<()> {
    let action = if unset {
        ConfigAction::Unset
    } else if let Some(value) = value {
        ConfigAction::Set(value)
    } else {
        ConfigAction::Show
    };

    let theme = Theme::default();
    let mut current_config = Config::load()
        .map_err(|e| eyre!(e))
        .wrap_err("Failed to load application config")?;

    if let ConfigAction::Show = action {
        match show(&current_config, &key)? {
            Some(value) => println!("{key}: {}", theme.section(&value)),
            None => println!("{key} is not set."),
        }
        return Ok(());
    }

    let updated = apply(&mut current_config, &key, action)?;
    current_config
        .save()
        .map_err(|e| eyre!(e))
        .wrap_err("Failed to save modified configuration")?;

    match updated {
        Some(value) => println!("Set {key} to {}", theme.section(&value)),
        None => println!("Unset {key}."),
    }

    Ok(())
}

fn show(config: &Config, key: &str) -> eyre::Result<Option<String>> {
    let generation = &config.generation;
    let value = match key {
        "directory" => generation.directory.map(|d| d.to_string()),
        "organization-name" => generation.organization_name.clone(),
        "derived-root" => generation
            .derived_root
            .as_ref()
            .map(|p| p.display().to_string()),
        "regenerate-target" => generation.regenerate_target.map(|b| b.to_string()),
        _ => return Err(unknown_key(key)),
    };
    Ok(value)
}

/// Applies a set or unset to the config, returning the new value.
fn apply(config: &mut Config, key: &str, action: ConfigAction) -> eyre::Result<Option<String>> {
    let value = match action {
        ConfigAction::Set(value) => Some(value),
        ConfigAction::Unset | ConfigAction::Show => None,
    };
    let generation = &mut config.generation;

    match key {
        "directory" => {
            generation.directory = value
                .as_deref()
                .map(str::parse::<GenerationDirectory>)
                .transpose()
                .map_err(|e| eyre!(e))?;
        }
        "organization-name" => generation.organization_name = value.clone(),
        "derived-root" => generation.derived_root = value.as_ref().map(PathBuf::from),
        "regenerate-target" => {
            generation.regenerate_target = value
                .as_deref()
                .map(str::parse::<bool>)
                .transpose()
                .map_err(|e| eyre!(e))
                .wrap_err("Expected 'true' or 'false'")?;
        }
        _ => return Err(unknown_key(key)),
    }

    Ok(value)
}

fn unknown_key(key: &str) -> eyre::Report {
    eyre!("Unknown configuration key: '{key}'. Supported keys: {SUPPORTED_KEYS}")
}
