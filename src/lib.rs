//! munkres-trace - Minimum-cost assignment with a replayable trace
//!
//! Solves the assignment problem (rows = agents, columns = tasks) with the
//! Hungarian method and records every intermediate state so the run can be
//! replayed step by step. Rectangular matrices are padded with zero-cost
//! dummy rows or columns; matches to dummies mean "idle".
//!
//! ```
//! use munkres_trace::{solve, CostMatrix};
//!
//! let costs = CostMatrix::new(vec![vec![4.0, 1.0], vec![2.0, 3.0]]).unwrap();
//! let result = solve(&costs).unwrap();
//! assert_eq!(result.total_cost, 3.0);
//! ```

pub mod domain;
pub mod input;
pub mod cli;

pub use domain::{
    solve, Assignment, AssignmentResult, CostMatrix, InvariantViolation, MatrixError, SolveError, Solver, Step,
    StepKind,
};
