//! Replayable trace of the solver's intermediate states
//!
//! Each [`Step`] owns deep copies of everything it shows. Nothing in a step
//! points back into live solver state, so later mutations of the working
//! matrix or marks can never alter a step that was already recorded.

use serde::Serialize;

use super::marks::{CoverState, PrimeMap, StarMap};
use super::matrix::WorkingMatrix;

/// Phase transition a step was captured at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Pad,
    RowReduction,
    ColumnReduction,
    InitialStar,
    CoverColumns,
    Prime,
    UpdateCovers,
    Adjust,
    Augment,
    Final,
}

impl StepKind {
    pub fn title(&self) -> &'static str {
        match self {
            StepKind::Pad => "Pad to square",
            StepKind::RowReduction => "Row reduction",
            StepKind::ColumnReduction => "Column reduction",
            StepKind::InitialStar => "Initial starring",
            StepKind::CoverColumns => "Cover starred columns",
            StepKind::Prime => "Prime zero",
            StepKind::UpdateCovers => "Update covers",
            StepKind::Adjust => "Adjust matrix",
            StepKind::Augment => "Augment stars",
            StepKind::Final => "Final assignments",
        }
    }

    /// True for the transitions that happen inside the zero search loop
    pub fn is_search(&self) -> bool {
        matches!(
            self,
            StepKind::Prime | StepKind::UpdateCovers | StepKind::Adjust | StepKind::Augment
        )
    }
}

/// Immutable snapshot of the algorithm at one phase transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    kind: StepKind,
    title: String,
    description: String,
    matrix: Vec<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    covered_rows: Option<Vec<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    covered_cols: Option<Vec<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    starred: Option<Vec<Vec<bool>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primed: Option<Vec<Vec<bool>>>,
}

impl Step {
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    pub fn covered_rows(&self) -> Option<&[bool]> {
        self.covered_rows.as_deref()
    }

    pub fn covered_cols(&self) -> Option<&[bool]> {
        self.covered_cols.as_deref()
    }

    pub fn starred(&self) -> Option<&[Vec<bool>]> {
        self.starred.as_deref()
    }

    pub fn primed(&self) -> Option<&[Vec<bool>]> {
        self.primed.as_deref()
    }

    /// Starred cells of this snapshot in row-major order
    pub fn starred_pairs(&self) -> Vec<(usize, usize)> {
        let Some(grid) = &self.starred else {
            return vec![];
        };
        grid.iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, &starred)| starred)
                    .map(move |(col, _)| (row, col))
            })
            .collect()
    }
}

/// Which parts of the live state a capture copies besides the matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct Capture {
    pub covered_rows: bool,
    pub covered_cols: bool,
    pub starred: bool,
    pub primed: bool,
}

impl Capture {
    pub const MATRIX: Capture = Capture {
        covered_rows: false,
        covered_cols: false,
        starred: false,
        primed: false,
    };

    pub const STARS: Capture = Capture {
        starred: true,
        ..Capture::MATRIX
    };

    pub const STARS_AND_COLUMNS: Capture = Capture {
        starred: true,
        covered_cols: true,
        ..Capture::MATRIX
    };

    pub const COVERS: Capture = Capture {
        covered_rows: true,
        covered_cols: true,
        ..Capture::MATRIX
    };

    pub const PRIMES_AND_COVERS: Capture = Capture {
        primed: true,
        ..Capture::COVERS
    };
}

/// Live state a recorder reads from when capturing
pub struct Snapshot<'a> {
    pub matrix: &'a WorkingMatrix,
    pub stars: &'a StarMap,
    pub primes: &'a PrimeMap,
    pub covers: &'a CoverState,
}

/// Appends deep-copied steps to an ordered trace
#[derive(Debug, Default)]
pub struct StepRecorder {
    enabled: bool,
    steps: Vec<Step>,
}

impl StepRecorder {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            steps: Vec::new(),
        }
    }

    /// Records a step with the kind's standard title
    pub fn record(
        &mut self,
        kind: StepKind,
        description: impl Into<String>,
        state: &Snapshot<'_>,
        capture: Capture,
    ) {
        if !self.enabled {
            return;
        }

        self.steps.push(Step {
            kind,
            title: kind.title().to_string(),
            description: description.into(),
            matrix: state.matrix.to_rows(),
            covered_rows: capture.covered_rows.then(|| state.covers.rows().to_vec()),
            covered_cols: capture.covered_cols.then(|| state.covers.cols().to_vec()),
            starred: capture.starred.then(|| state.stars.to_grid()),
            primed: capture.primed.then(|| state.primes.to_grid()),
        });
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}
