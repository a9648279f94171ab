//! Configuration file support for autolink-resolver.
//!
//! Provides YAML-based configuration through `autolink-resolver.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::dto::OutputFormat;
use crate::autolinking::domain::Platform;
use crate::autolinking::policies::DependencyPolicy;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "autolink-resolver.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub platforms: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub include: Option<Vec<String>>,
    pub search_paths: Option<Vec<PathBuf>>,
    pub max_depth: Option<usize>,
    pub fail_on_duplicates: Option<bool>,
    pub dependency_policy: Option<DependencyPolicy>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Parsed output format; validated on load
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.format
            .as_deref()
            .map(|format| format.parse::<OutputFormat>().map_err(anyhow::Error::msg))
            .transpose()
    }

    /// Parsed platforms; validated on load
    pub fn parsed_platforms(&self) -> Result<Option<Vec<Platform>>> {
        self.platforms
            .as_ref()
            .map(|platforms| {
                platforms
                    .iter()
                    .map(|platform| platform.parse::<Platform>().map_err(anyhow::Error::msg))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_depth == Some(0) {
        bail!(
            "Invalid config: max_depth must be greater than 0.\n\n\
             💡 Hint: Remove the field to use the default depth limit."
        );
    }

    config
        .output_format()
        .context("Invalid config: format")?;
    config
        .parsed_platforms()
        .context("Invalid config: platforms")?;

    if let Some(ref search_paths) = config.search_paths {
        for (i, path) in search_paths.iter().enumerate() {
            if path.as_os_str().is_empty() {
                bail!(
                    "Invalid config: search_paths[{}] must not be empty.\n\n\
                     💡 Hint: Paths are resolved against the project directory (e.g., \"../packages\").",
                    i
                );
            }
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
