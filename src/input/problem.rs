//! Problem files: a cost matrix plus optional agent and task labels
//!
//! Accepted shapes (JSON and YAML):
//!
//! ```json
//! { "costs": [[19, 24], [17, 27]], "agents": ["A", "B"], "tasks": ["T1", "T2"] }
//! [[19, 24], [17, 27]]
//! ```
//!
//! TOML files must use the table form (`costs = [[19, 24], [17, 27]]`).

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::config::LabelConfig;
use crate::domain::{CostMatrix, MatrixError};

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("Failed to read problem from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported problem format '{0}' (expected .json, .yaml, .yml or .toml)")]
    UnsupportedFormat(String),

    #[error("Failed to parse problem: {0}")]
    Parse(String),

    #[error("Invalid cost matrix: {0}")]
    Matrix(#[from] MatrixError),

    #[error("Expected {expected} {kind} labels, got {found}")]
    LabelCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Serialization format of a problem file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemFormat {
    Json,
    Yaml,
    Toml,
}

impl ProblemFormat {
    /// Picks the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ProblemError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(ProblemError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProblemFile {
    costs: Vec<Vec<f64>>,
    #[serde(default)]
    agents: Option<Vec<String>>,
    #[serde(default)]
    tasks: Option<Vec<String>>,
}

impl ProblemFile {
    fn bare(costs: Vec<Vec<f64>>) -> Self {
        Self {
            costs,
            agents: None,
            tasks: None,
        }
    }
}

/// A validated assignment problem
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub costs: CostMatrix,
    pub agents: Option<Vec<String>>,
    pub tasks: Option<Vec<String>>,
}

impl Problem {
    /// Validates the matrix and that label lists match its dimensions
    pub fn new(
        costs: Vec<Vec<f64>>,
        agents: Option<Vec<String>>,
        tasks: Option<Vec<String>>,
    ) -> Result<Self, ProblemError> {
        let costs = CostMatrix::new(costs)?;

        check_labels("agent", costs.row_count(), agents.as_deref())?;
        check_labels("task", costs.col_count(), tasks.as_deref())?;

        Ok(Self {
            costs,
            agents,
            tasks,
        })
    }

    /// The 5 agent × 4 task example used by `munkres demo`
    pub fn demo() -> Result<Self, ProblemError> {
        Self::new(
            vec![
                vec![19.0, 24.0, 29.0, 25.0],
                vec![17.0, 27.0, 30.0, 29.0],
                vec![19.0, 28.0, 31.0, 28.0],
                vec![20.0, 12.0, 28.0, 29.0],
                vec![20.0, 25.0, 31.0, 26.0],
            ],
            Some(["A", "B", "C", "D", "E"].map(String::from).to_vec()),
            Some(["Task 1", "Task 2", "Task 3", "Task 4"].map(String::from).to_vec()),
        )
    }

    /// Parses problem text in the given format
    pub fn parse(content: &str, format: ProblemFormat) -> Result<Self, ProblemError> {
        let file: ProblemFile = match format {
            // A bare matrix is tried second so table errors are the ones reported
            ProblemFormat::Json => serde_json::from_str::<ProblemFile>(content)
                .or_else(|err| {
                    serde_json::from_str(content)
                        .map(ProblemFile::bare)
                        .map_err(|_| err)
                })
                .map_err(|e| ProblemError::Parse(e.to_string()))?,
            ProblemFormat::Yaml => serde_yaml::from_str::<ProblemFile>(content)
                .or_else(|err| {
                    serde_yaml::from_str(content)
                        .map(ProblemFile::bare)
                        .map_err(|_| err)
                })
                .map_err(|e| ProblemError::Parse(e.to_string()))?,
            ProblemFormat::Toml => {
                toml::from_str(content).map_err(|e| ProblemError::Parse(e.to_string()))?
            }
        };

        Self::new(file.costs, file.agents, file.tasks)
    }

    /// Loads a problem file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self, ProblemError> {
        let format = ProblemFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ProblemError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, format)
    }

    /// Reads a JSON problem from any reader (used for stdin)
    pub fn from_reader(mut reader: impl Read) -> Result<Self, ProblemError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|source| ProblemError::Io {
                path: PathBuf::from("-"),
                source,
            })?;

        Self::parse(&content, ProblemFormat::Json)
    }

    /// Display names for every row and column of the padded matrix
    pub fn labels(&self, config: &LabelConfig) -> Labels {
        let size = self.costs.padded_size();
        Labels {
            agents: names(self.agents.as_deref(), self.costs.row_count(), size, &config.agent_prefix, &config.dummy),
            tasks: names(self.tasks.as_deref(), self.costs.col_count(), size, &config.task_prefix, &config.dummy),
            idle: config.idle.clone(),
        }
    }
}

fn check_labels(kind: &'static str, expected: usize, labels: Option<&[String]>) -> Result<(), ProblemError> {
    match labels {
        Some(labels) if labels.len() != expected => Err(ProblemError::LabelCount {
            kind,
            expected,
            found: labels.len(),
        }),
        _ => Ok(()),
    }
}

fn names(given: Option<&[String]>, real: usize, size: usize, prefix: &str, dummy: &str) -> Vec<String> {
    (0..size)
        .map(|i| match given {
            _ if i >= real => dummy.to_string(),
            Some(labels) => labels[i].clone(),
            None => format!("{}{}", prefix, i + 1),
        })
        .collect()
}

/// Row and column names covering dummy padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    agents: Vec<String>,
    tasks: Vec<String>,
    idle: String,
}

impl Labels {
    pub fn agent(&self, index: usize) -> &str {
        &self.agents[index]
    }

    pub fn task(&self, index: usize) -> &str {
        &self.tasks[index]
    }

    /// Text shown in place of a task for an agent matched to a dummy column
    pub fn idle(&self) -> &str {
        &self.idle
    }
}
