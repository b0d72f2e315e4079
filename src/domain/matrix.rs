//! Cost matrices and the reductions applied before the star/cover search
//!
//! A [`CostMatrix`] is the caller's rectangular input and is validated once at
//! construction. The solver never mutates it; instead it works on a square
//! [`WorkingMatrix`] produced by [`CostMatrix::pad`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MatrixError {
    #[error("Cost matrix is empty")]
    Empty,

    #[error("Row {row} of the cost matrix is empty")]
    EmptyRow { row: usize },

    #[error("Row {row} has {found} entries, expected {expected}")]
    Jagged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cost at ({row}, {col}) is not a finite number")]
    NonFinite { row: usize, col: usize },

    #[error("Cost at ({row}, {col}) is negative: {value}")]
    Negative { row: usize, col: usize, value: f64 },
}

/// Rectangular, finite, non-negative cost matrix (rows = agents, columns = tasks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CostMatrix {
    rows: Vec<Vec<f64>>,
}

impl CostMatrix {
    /// Validates and wraps a row-major cost table
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let expected = match rows.first() {
            None => return Err(MatrixError::Empty),
            Some(first) if first.is_empty() => return Err(MatrixError::EmptyRow { row: 0 }),
            Some(first) => first.len(),
        };

        for (row, values) in rows.iter().enumerate() {
            if values.is_empty() {
                return Err(MatrixError::EmptyRow { row });
            }
            if values.len() != expected {
                return Err(MatrixError::Jagged {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() {
                    return Err(MatrixError::NonFinite { row, col });
                }
                if value < 0.0 {
                    return Err(MatrixError::Negative { row, col, value });
                }
            }
        }

        Ok(Self { rows })
    }

    /// Number of agents
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of tasks
    pub fn col_count(&self) -> usize {
        self.rows[0].len()
    }

    /// Dimension of the padded working matrix
    pub fn padded_size(&self) -> usize {
        self.row_count().max(self.col_count())
    }

    pub fn is_square(&self) -> bool {
        self.row_count() == self.col_count()
    }

    /// Cost of assigning `row` to `col`
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Builds the square working matrix, appending zero-cost dummy rows or columns
    pub fn pad(&self) -> WorkingMatrix {
        let size = self.padded_size();
        let mut cells = Vec::with_capacity(size * size);

        for row in 0..size {
            for col in 0..size {
                let value = if row < self.row_count() && col < self.col_count() {
                    self.rows[row][col]
                } else {
                    0.0
                };
                cells.push(value);
            }
        }

        WorkingMatrix { size, cells }
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix.rows
    }
}

/// Square, mutable copy of the costs owned by a single solve
///
/// Stored flat in row-major order so cells are addressed by `(row, col)`
/// index pairs only.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl WorkingMatrix {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.size + col]
    }

    pub fn is_zero(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == 0.0
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        &mut self.cells[row * self.size + col]
    }

    /// Subtracts each row's minimum from that row, leaving at least one zero per row
    pub fn subtract_row_minima(&mut self) {
        for row in 0..self.size {
            let min = (0..self.size)
                .map(|col| self.get(row, col))
                .fold(f64::INFINITY, f64::min);
            for col in 0..self.size {
                *self.cell_mut(row, col) -= min;
            }
        }
    }

    /// Subtracts each column's minimum from that column, leaving at least one zero per column
    pub fn subtract_col_minima(&mut self) {
        for col in 0..self.size {
            let min = (0..self.size)
                .map(|row| self.get(row, col))
                .fold(f64::INFINITY, f64::min);
            for row in 0..self.size {
                *self.cell_mut(row, col) -= min;
            }
        }
    }

    /// Dual update: subtract `delta` from doubly-uncovered cells, add it to doubly-covered ones
    pub fn adjust(&mut self, delta: f64, covered_rows: &[bool], covered_cols: &[bool]) {
        for row in 0..self.size {
            for col in 0..self.size {
                match (covered_rows[row], covered_cols[col]) {
                    (false, false) => *self.cell_mut(row, col) -= delta,
                    (true, true) => *self.cell_mut(row, col) += delta,
                    _ => {}
                }
            }
        }
    }

    /// Deep copy as nested rows, for trace snapshots
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.cells.chunks(self.size).map(<[f64]>::to_vec).collect()
    }
}
