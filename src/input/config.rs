//! Configuration handling
//!
//! Configuration is read from `~/.config/munkres/config.toml` (global) and
//! `.munkres.toml` (project, found by walking up from the current directory).
//! Project values override global ones key by key.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;

/// File name of the project-level configuration
pub const PROJECT_CONFIG_FILE: &str = ".munkres.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Trace recording settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TraceConfig {
    /// Record every intermediate step
    pub record_steps: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self { record_steps: true }
    }
}

/// Names used when a problem carries no labels, and for padding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LabelConfig {
    /// Prefix for unlabeled agents, followed by the 1-based row number
    pub agent_prefix: String,

    /// Prefix for unlabeled tasks, followed by the 1-based column number
    pub task_prefix: String,

    /// Name of padding rows and columns
    pub dummy: String,

    /// Shown for agents left without a real task
    pub idle: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            agent_prefix: "Agent ".to_string(),
            task_prefix: "Task ".to_string(),
            dummy: "Dummy".to_string(),
            idle: "(idle)".to_string(),
        }
    }
}

/// Number formatting in text output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places for non-integral costs
    pub precision: usize,

    /// Prefix for the total cost (e.g. "$")
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            currency: String::new(),
        }
    }
}

/// Effective configuration after layering
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output format when `--format` is not given
    pub default_format: OutputFormat,

    pub trace: TraceConfig,

    pub labels: LabelConfig,

    pub display: DisplayConfig,
}

impl Config {
    /// Loads global and project configuration from their default locations
    pub fn load() -> Result<Self> {
        let project = Self::find_project_config();
        Self::load_layers(Self::global_config_path().as_deref(), project.as_deref())
    }

    /// Loads global configuration plus an explicit override file
    pub fn load_with(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Self::load_layers(Self::global_config_path().as_deref(), Some(path))
    }

    /// Merges the given files (later wins); missing files are skipped
    pub fn load_layers(global: Option<&Path>, project: Option<&Path>) -> Result<Self> {
        let mut merged = toml::Table::new();

        for path in [global, project].into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            let layer = Self::read_table(path)?;
            merge_tables(&mut merged, layer);
        }

        let config = Config::deserialize(toml::Value::Table(merged))
            .map_err(|e| ConfigError::Invalid(e.to_string()))
            .context("Failed to apply configuration")?;

        Ok(config)
    }

    /// Parses a single TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let table = content
            .parse::<toml::Table>()
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(table)
    }

    /// Returns the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "munkres", "munkres")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Finds `.munkres.toml` in the current directory or any parent
    pub fn find_project_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

/// Recursively overlays `layer` onto `base`
fn merge_tables(base: &mut toml::Table, layer: toml::Table) {
    for (key, value) in layer {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
