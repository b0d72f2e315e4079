//! # Input Layer
//!
//! Everything the command-line front end reads before calling the solver.
//! The solver itself never touches the filesystem.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Problem | JSON, YAML or TOML | any path, or `-` for JSON on stdin |
//! | Config | TOML | `~/.config/munkres/config.toml`, `.munkres.toml` |
//!
//! ## Key Types
//!
//! - [`Problem`] - Validated cost matrix with optional labels
//! - [`Labels`] - Row/column names including dummy padding
//! - [`Config`] - Layered global + project configuration

mod config;
mod problem;

pub use config::{Config, ConfigError, DisplayConfig, LabelConfig, TraceConfig, PROJECT_CONFIG_FILE};
pub use problem::{Labels, Problem, ProblemError, ProblemFormat};
