use std::path::{Path, PathBuf};

use eyre::{Context, eyre};
use serde::{Deserialize, Serialize};

use crate::{
    constants::ENV_PREFIX,
    generator::{GenerationDirectory, GenerationOptions, ProjectDirectoryHelper},
    utils::get_project_dirs,
};

/// Global configuration for the application.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Defaults for `xcgen generate`, overridden by command line flags.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<GenerationDirectory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regenerate_target: Option<bool>,
}

impl Config {
    pub fn config_path() -> eyre::Result<PathBuf> {
        let project_dirs = get_project_dirs()?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> eyre::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Reads the config file if present, then applies `XCGEN_*` environment
    /// overrides (e.g. `XCGEN_GENERATION__DIRECTORY=derived`).
    pub fn load_from(path: &Path) -> eyre::Result<Self> {
        config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| eyre!(e))
            .wrap_err_with(|| format!("Failed to read config file at {}", path.display()))?
            .try_deserialize()
            .map_err(|e| eyre!(e))
            .wrap_err("Failed to parse config file")
    }

    pub fn save(&self) -> eyre::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> eyre::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| eyre!(e))
                .wrap_err_with(|| {
                    format!("Failed to create config directory {}", parent.display())
                })?;
        }

        let config_str = toml::to_string_pretty(self)
            .map_err(|e| eyre!(e))
            .wrap_err("Failed to format config as string")?;

        std::fs::write(path, config_str)
            .map_err(|e| eyre!(e))
            .wrap_err_with(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }
}

impl Config {
    pub fn generation_options(&self) -> GenerationOptions {
        let defaults = GenerationOptions::default();
        GenerationOptions {
            organization_name: self.generation.organization_name.clone(),
            regenerate_target: self
                .generation
                .regenerate_target
                .unwrap_or(defaults.regenerate_target),
            ..defaults
        }
    }

    pub fn directory(&self) -> GenerationDirectory {
        self.generation.directory.unwrap_or_default()
    }

    pub fn derived_root(&self) -> eyre::Result<PathBuf> {
        match &self.generation.derived_root {
            Some(path) => Ok(path.clone()),
            None => ProjectDirectoryHelper::default_derived_root(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.directory(), GenerationDirectory::Manifest);
        assert_eq!(config.generation_options(), GenerationOptions::default());
    }

    #[test]
    fn test_file_values_feed_generation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[generation]\ndirectory = \"derived\"\norganization_name = \"Acme\"\nderived_root = \"/tmp/derived\"\nregenerate_target = false\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.directory(), GenerationDirectory::Derived);
        assert_eq!(config.derived_root().unwrap(), PathBuf::from("/tmp/derived"));

        let options = config.generation_options();
        assert_eq!(options.organization_name.as_deref(), Some("Acme"));
        assert!(!options.regenerate_target);
        assert_eq!(options.object_version, GenerationOptions::default().object_version);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        let config = Config {
            generation: GenerationConfig {
                directory: Some(GenerationDirectory::Derived),
                organization_name: Some("Acme Inc".to_string()),
                ..Default::default()
            },
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
