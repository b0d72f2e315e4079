//! Solver commands (solve, trace, check, demo)

use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use super::render::{format_cost, render_step};
use crate::domain::{AssignmentResult, Solver};
use crate::input::{Config, Problem};

/// Reads a problem from a path, or JSON from stdin for `-`
pub fn load_problem(source: &str) -> Result<Problem> {
    if source == "-" {
        return Problem::from_reader(std::io::stdin().lock()).context("Failed to read problem from stdin");
    }

    Problem::load(Path::new(source)).with_context(|| format!("Failed to load problem: {}", source))
}

fn run_solver(output: &Output, problem: &Problem, record_steps: bool) -> Result<AssignmentResult> {
    output.verbose_ctx(
        "solve",
        &format!(
            "Solving {}x{} problem (padded size {}, steps {})",
            problem.costs.row_count(),
            problem.costs.col_count(),
            problem.costs.padded_size(),
            if record_steps { "on" } else { "off" }
        ),
    );

    let result = Solver::new()
        .record_steps(record_steps)
        .solve(&problem.costs)
        .context("Solver failed")?;

    output.verbose_ctx("solve", &format!("Recorded {} steps", result.steps.len()));
    Ok(result)
}

/// Solve a problem and print the assignment
pub fn solve(output: &Output, config: &Config, source: &str, record_steps: bool) -> Result<()> {
    let problem = load_problem(source)?;
    let result = run_solver(output, &problem, record_steps)?;
    print_result(output, config, &problem, &result);
    Ok(())
}

/// Solve the built-in demo problem
pub fn demo(output: &Output, config: &Config, record_steps: bool) -> Result<()> {
    let problem = Problem::demo().context("Demo problem is invalid")?;
    let result = run_solver(output, &problem, record_steps)?;
    print_result(output, config, &problem, &result);
    Ok(())
}

fn print_result(output: &Output, config: &Config, problem: &Problem, result: &AssignmentResult) {
    if output.is_json() {
        output.data(result);
        return;
    }

    let labels = problem.labels(&config.labels);
    let precision = config.display.precision;

    println!(
        "Optimal assignments ({} agent(s), {} task(s)):",
        result.agent_count, result.task_count
    );
    println!("{}", "-".repeat(50));

    for agent in 0..result.agent_count {
        match result.task_for(agent) {
            Some(task) => println!(
                "{} -> {}  ({})",
                labels.agent(agent),
                labels.task(task),
                format_cost(problem.costs.get(agent, task), precision)
            ),
            None => println!("{} -> {}", labels.agent(agent), labels.idle()),
        }
    }

    let open_tasks = result.unassigned_tasks();
    if !open_tasks.is_empty() {
        let names: Vec<_> = open_tasks.iter().map(|&t| labels.task(t)).collect();
        println!();
        println!("Unassigned tasks: {}", names.join(", "));
    }

    println!();
    println!(
        "Total cost: {}{}",
        config.display.currency,
        format_cost(result.total_cost, precision)
    );
}

/// Print the recorded trace, or a single 1-based step
pub fn trace(output: &Output, config: &Config, source: &str, step: Option<usize>) -> Result<()> {
    let problem = load_problem(source)?;
    let result = run_solver(output, &problem, true)?;
    let total = result.steps.len();

    let selected: Vec<usize> = match step {
        Some(n) if n == 0 || n > total => {
            anyhow::bail!("Step {} out of range (trace has {} steps)", n, total)
        }
        Some(n) => vec![n - 1],
        None => (0..total).collect(),
    };

    if output.is_json() {
        let steps: Vec<_> = selected.iter().map(|&i| &result.steps[i]).collect();
        output.data(&steps);
        return Ok(());
    }

    let labels = problem.labels(&config.labels);
    for (n, &i) in selected.iter().enumerate() {
        if n > 0 {
            println!();
        }
        print!("{}", render_step(&result.steps[i], i, total, &labels, &config.display));
    }

    Ok(())
}

/// Validate a problem without solving it
pub fn check(output: &Output, source: &str) -> Result<()> {
    let problem = load_problem(source)?;
    let (rows, cols) = (problem.costs.row_count(), problem.costs.col_count());
    let size = problem.costs.padded_size();

    if output.is_json() {
        output.data(&serde_json::json!({
            "valid": true,
            "agents": rows,
            "tasks": cols,
            "size": size,
            "dummy_rows": size - rows,
            "dummy_cols": size - cols,
        }));
    } else {
        output.success(&format!("Valid {}x{} cost matrix", rows, cols));
        if problem.costs.is_square() {
            println!("Already square, no padding needed");
        } else {
            println!(
                "Pads to {}x{} with {} dummy row(s) and {} dummy column(s)",
                size,
                size,
                size - rows,
                size - cols
            );
        }
    }

    Ok(())
}
