//! munkres - Assignment solver with a step-by-step trace

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = munkres_trace::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
