//! Assignment solver core
//!
//! Pure, synchronous, in-memory computation without any I/O concerns.
//! A solve owns every structure it creates; nothing is shared between calls.

mod matrix;
mod marks;
mod step;
mod engine;
mod assignment;

pub use matrix::{CostMatrix, MatrixError, WorkingMatrix};
pub use marks::{CoverState, PrimeMap, StarMap};
pub use step::{Step, StepKind};
pub use engine::{solve, InvariantViolation, SolveError, Solver};
pub use assignment::{Assignment, AssignmentResult};
