//! Hungarian method (Kuhn-Munkres) with a recorded trace
//!
//! The engine runs a small state machine over a padded, reduced working
//! matrix:
//!
//! ```text
//! pad -> row reduce -> col reduce -> initial star
//!   -> CoverColumns --(all covered)--> Done
//!        ^   |
//!        |   v
//!        | FindZero <--> Adjust
//!        |   |
//!        +-- Augment
//! ```
//!
//! Every augmentation adds one star, so the loop runs at most `size`
//! augmentations before all columns are covered.

use thiserror::Error;
use tracing::{debug, trace};

use super::assignment::{extract, AssignmentResult};
use super::marks::{CoverState, PrimeMap, StarMap};
use super::matrix::{CostMatrix, WorkingMatrix};
use super::step::{Capture, Snapshot, StepKind, StepRecorder};

/// A bookkeeping invariant did not hold; this is a solver defect, not bad input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("no prime in row {row} while walking the augmenting path")]
    MissingPrime { row: usize },

    #[error("expected a star at ({row}, {col}) on the augmenting path")]
    MissingStar { row: usize, col: usize },

    #[error("cannot star ({row}, {col}): row or column already starred")]
    StarConflict { row: usize, col: usize },

    #[error("augmenting path exceeded {limit} cells")]
    UnterminatedPath { limit: usize },

    #[error("no uncovered cell left to adjust")]
    NoUncoveredCell,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("Solver invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Configurable entry point
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    record_steps: bool,
}

impl Default for Solver {
    fn default() -> Self {
        Self { record_steps: true }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the step trace; the matching is the same either way
    pub fn record_steps(mut self, enabled: bool) -> Self {
        self.record_steps = enabled;
        self
    }

    /// Computes a minimum-cost assignment of rows (agents) to columns (tasks)
    pub fn solve(&self, costs: &CostMatrix) -> Result<AssignmentResult, SolveError> {
        debug!(
            rows = costs.row_count(),
            cols = costs.col_count(),
            record_steps = self.record_steps,
            "solving assignment"
        );

        let mut engine = Engine::new(costs, self.record_steps);
        engine.reduce();
        engine.star_initial();
        engine.run()?;
        engine.finish();

        let Engine {
            stars,
            recorder,
            augmentations,
            ..
        } = engine;
        let result = extract(costs, &stars, recorder.into_steps());

        debug!(
            size = result.size,
            augmentations,
            steps = result.steps.len(),
            total_cost = result.total_cost,
            "assignment solved"
        );
        Ok(result)
    }
}

/// Solves with the default settings (trace recorded)
pub fn solve(costs: &CostMatrix) -> Result<AssignmentResult, SolveError> {
    Solver::new().solve(costs)
}

/// Engine states between transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    CoverColumns,
    FindZero,
    Adjust,
    Augment { row: usize, col: usize },
    Done,
}

struct Engine {
    matrix: WorkingMatrix,
    stars: StarMap,
    primes: PrimeMap,
    covers: CoverState,
    recorder: StepRecorder,
    augmentations: usize,
}

impl Engine {
    fn new(costs: &CostMatrix, record_steps: bool) -> Self {
        let matrix = costs.pad();
        let size = matrix.size();

        let mut engine = Self {
            matrix,
            stars: StarMap::new(size),
            primes: PrimeMap::new(size),
            covers: CoverState::new(size),
            recorder: StepRecorder::new(record_steps),
            augmentations: 0,
        };

        let added_rows = size - costs.row_count();
        let added_cols = size - costs.col_count();
        engine.emit(
            StepKind::Pad,
            format!(
                "Padded to {size}×{size} by adding {added_rows} row(s) and {added_cols} column(s) of zeros."
            ),
            Capture::MATRIX,
        );
        engine
    }

    fn size(&self) -> usize {
        self.matrix.size()
    }

    fn emit(&mut self, kind: StepKind, description: impl Into<String>, capture: Capture) {
        let snapshot = Snapshot {
            matrix: &self.matrix,
            stars: &self.stars,
            primes: &self.primes,
            covers: &self.covers,
        };
        self.recorder.record(kind, description, &snapshot, capture);
    }

    fn reduce(&mut self) {
        self.matrix.subtract_row_minima();
        self.emit(
            StepKind::RowReduction,
            "Subtract the minimum of each row.",
            Capture::MATRIX,
        );

        self.matrix.subtract_col_minima();
        self.emit(
            StepKind::ColumnReduction,
            "Subtract the minimum of each column.",
            Capture::MATRIX,
        );
    }

    /// Greedy row-major starring of independent zeros
    fn star_initial(&mut self) {
        let size = self.size();
        for row in 0..size {
            for col in 0..size {
                if self.matrix.is_zero(row, col) && self.stars.try_star(row, col) {
                    break;
                }
            }
        }

        trace!(stars = self.stars.count(), "initial stars placed");
        self.emit(
            StepKind::InitialStar,
            "Star a set of independent zeros.",
            Capture::STARS,
        );
    }

    fn run(&mut self) -> Result<(), SolveError> {
        let mut phase = Phase::CoverColumns;

        loop {
            phase = match phase {
                Phase::CoverColumns => self.cover_starred_columns(),
                Phase::FindZero => self.find_zero(),
                Phase::Adjust => self.adjust()?,
                Phase::Augment { row, col } => self.augment(row, col)?,
                Phase::Done => return Ok(()),
            };
        }
    }

    fn cover_starred_columns(&mut self) -> Phase {
        for col in 0..self.size() {
            if self.stars.in_col(col).is_some() {
                self.covers.cover_col(col);
            }
        }

        self.emit(
            StepKind::CoverColumns,
            "Cover every column containing a starred zero.",
            Capture::STARS_AND_COLUMNS,
        );

        if self.covers.covered_col_count() == self.size() {
            Phase::Done
        } else {
            Phase::FindZero
        }
    }

    fn uncovered_zero(&self) -> Option<(usize, usize)> {
        let size = self.size();
        (0..size)
            .filter(|&row| !self.covers.is_row_covered(row))
            .find_map(|row| {
                (0..size)
                    .find(|&col| !self.covers.is_col_covered(col) && self.matrix.is_zero(row, col))
                    .map(|col| (row, col))
            })
    }

    fn find_zero(&mut self) -> Phase {
        let Some((row, col)) = self.uncovered_zero() else {
            return Phase::Adjust;
        };

        self.primes.prime(row, col);
        trace!(row, col, "primed zero");
        self.emit(
            StepKind::Prime,
            format!("Prime uncovered zero at (r{}, c{}).", row + 1, col + 1),
            Capture::PRIMES_AND_COVERS,
        );

        match self.stars.in_row(row) {
            Some(star_col) => {
                self.covers.cover_row(row);
                self.covers.uncover_col(star_col);
                self.emit(
                    StepKind::UpdateCovers,
                    "Row with primed zero covered; column of its star uncovered.",
                    Capture::PRIMES_AND_COVERS,
                );
                Phase::FindZero
            }
            None => Phase::Augment { row, col },
        }
    }

    fn adjust(&mut self) -> Result<Phase, SolveError> {
        let size = self.size();
        let (matrix, covers) = (&self.matrix, &self.covers);
        let delta = (0..size)
            .filter(|&row| !covers.is_row_covered(row))
            .flat_map(|row| {
                (0..size)
                    .filter(move |&col| !covers.is_col_covered(col))
                    .map(move |col| (row, col))
            })
            .map(|(row, col)| matrix.get(row, col))
            .reduce(f64::min)
            .ok_or(InvariantViolation::NoUncoveredCell)?;

        trace!(delta, "adjusting matrix");
        self.matrix
            .adjust(delta, self.covers.rows(), self.covers.cols());
        self.emit(
            StepKind::Adjust,
            format!("No uncovered zeros. Subtract min uncovered ({delta}); add at intersections."),
            Capture::COVERS,
        );

        Ok(Phase::FindZero)
    }

    /// Walks prime -> star -> prime ... from `(row, col)` and flips every cell on the path
    fn augment(&mut self, row: usize, col: usize) -> Result<Phase, SolveError> {
        let limit = 2 * self.size() + 1;
        let mut path = vec![(row, col)];

        while let Some(star_row) = self.stars.in_col(path[path.len() - 1].1) {
            let star_col = path[path.len() - 1].1;
            let prime_col = self
                .primes
                .in_row(star_row)
                .ok_or(InvariantViolation::MissingPrime { row: star_row })?;

            path.push((star_row, star_col));
            path.push((star_row, prime_col));

            if path.len() > limit {
                return Err(InvariantViolation::UnterminatedPath { limit }.into());
            }
        }

        // Even positions are primes, odd positions are stars. Unstar first so
        // the primes land on vacated rows and columns.
        for &(r, c) in path.iter().skip(1).step_by(2) {
            if !self.stars.unstar(r, c) {
                return Err(InvariantViolation::MissingStar { row: r, col: c }.into());
            }
        }
        for &(r, c) in path.iter().step_by(2) {
            if !self.stars.try_star(r, c) {
                return Err(InvariantViolation::StarConflict { row: r, col: c }.into());
            }
        }

        self.primes.clear();
        self.covers.clear();
        self.augmentations += 1;

        trace!(
            path_len = path.len(),
            stars = self.stars.count(),
            "augmented along alternating path"
        );
        self.emit(
            StepKind::Augment,
            "Flip along augmenting path; clear primes; uncover all lines.",
            Capture {
                starred: true,
                ..Capture::COVERS
            },
        );

        Ok(Phase::CoverColumns)
    }

    fn finish(&mut self) {
        self.emit(
            StepKind::Final,
            "Starred zeros give the optimal assignment.",
            Capture::STARS,
        );
    }
}
