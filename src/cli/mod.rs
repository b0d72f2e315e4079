//! # Command-Line Interface
//!
//! Thin front end over the solver: loads a problem, solves it, prints it.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `solve` | Print the optimal assignment and its total cost |
//! | `trace` | Print every recorded step (or one with `--step N`) |
//! | `check` | Validate a problem and report the padding it needs |
//! | `demo` | Solve the built-in 5 agent x 4 task example |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output; `RUST_LOG` controls solver logs:
//! ```bash
//! munkres --verbose solve costs.json
//! RUST_LOG=munkres_trace=trace munkres trace costs.json
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod render;
mod solve;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use render::{format_cost, render_step};
