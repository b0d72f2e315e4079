//! Plain-text rendering of costs and trace steps

use crate::domain::Step;
use crate::input::{DisplayConfig, Labels};

/// Formats a cost: integral values without decimals, others at `precision`
pub fn format_cost(value: f64, precision: usize) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Renders one step as a labelled grid
///
/// Starred zeros are suffixed `*`, primed zeros `'`. Covered columns are
/// flagged on a line under the header, covered rows at the end of the row.
pub fn render_step(step: &Step, index: usize, total: usize, labels: &Labels, display: &DisplayConfig) -> String {
    let matrix = step.matrix();
    let size = matrix.len();

    let cells: Vec<Vec<String>> = (0..size)
        .map(|row| {
            (0..size)
                .map(|col| {
                    let mut cell = format_cost(matrix[row][col], display.precision);
                    if mark(step.starred(), row, col) {
                        cell.push('*');
                    } else if mark(step.primed(), row, col) {
                        cell.push('\'');
                    }
                    cell
                })
                .collect()
        })
        .collect();

    let label_width = (0..size)
        .map(|row| labels.agent(row).chars().count())
        .max()
        .unwrap_or(0)
        .max("covered".len());
    let col_width = (0..size)
        .map(|col| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(labels.task(col).chars().count()))
                .max()
                .unwrap_or(0)
        })
        .max()
        .unwrap_or(0)
        + 2;

    let mut out = String::new();
    out.push_str(&format!("Step {}/{}: {}\n", index + 1, total, step.title()));
    out.push_str(step.description());
    out.push_str("\n\n");

    out.push_str(&" ".repeat(label_width));
    for col in 0..size {
        out.push_str(&format!("{:>width$}", labels.task(col), width = col_width));
    }
    out.push('\n');

    if let Some(covered) = step.covered_cols() {
        out.push_str(&format!("{:<width$}", "covered", width = label_width));
        for &is_covered in covered {
            let flag = if is_covered { "x" } else { "-" };
            out.push_str(&format!("{:>width$}", flag, width = col_width));
        }
        out.push('\n');
    }

    for (row, values) in cells.iter().enumerate() {
        out.push_str(&format!("{:<width$}", labels.agent(row), width = label_width));
        for cell in values {
            out.push_str(&format!("{:>width$}", cell, width = col_width));
        }
        if step.covered_rows().is_some_and(|rows| rows[row]) {
            out.push_str("  <- covered");
        }
        out.push('\n');
    }

    out
}

fn mark(grid: Option<&[Vec<bool>]>, row: usize, col: usize) -> bool {
    grid.is_some_and(|g| g[row][col])
}
