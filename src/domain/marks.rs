//! Star, prime and cover bookkeeping for the engine
//!
//! Stars and primes are stored as per-row/per-column column indices instead of
//! boolean grids. For stars this makes independence (at most one star per row
//! and per column) a property of the representation: a cell can only be
//! starred after its row and column have been vacated.

/// Tentative matching: independent starred zeros
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarMap {
    col_of_row: Vec<Option<usize>>,
    row_of_col: Vec<Option<usize>>,
}

impl StarMap {
    pub fn new(size: usize) -> Self {
        Self {
            col_of_row: vec![None; size],
            row_of_col: vec![None; size],
        }
    }

    /// Column of the star in `row`, if any
    pub fn in_row(&self, row: usize) -> Option<usize> {
        self.col_of_row[row]
    }

    /// Row of the star in `col`, if any
    pub fn in_col(&self, col: usize) -> Option<usize> {
        self.row_of_col[col]
    }

    pub fn is_starred(&self, row: usize, col: usize) -> bool {
        self.col_of_row[row] == Some(col)
    }

    /// Stars `(row, col)` if neither its row nor its column holds a star yet
    pub fn try_star(&mut self, row: usize, col: usize) -> bool {
        if self.col_of_row[row].is_some() || self.row_of_col[col].is_some() {
            return false;
        }
        self.col_of_row[row] = Some(col);
        self.row_of_col[col] = Some(row);
        true
    }

    /// Removes the star at `(row, col)`; returns false if it was not starred
    pub fn unstar(&mut self, row: usize, col: usize) -> bool {
        if !self.is_starred(row, col) {
            return false;
        }
        self.col_of_row[row] = None;
        self.row_of_col[col] = None;
        true
    }

    pub fn count(&self) -> usize {
        self.col_of_row.iter().filter(|c| c.is_some()).count()
    }

    /// Starred cells in row-major order
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.col_of_row
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|col| (row, col)))
            .collect()
    }

    pub fn to_grid(&self) -> Vec<Vec<bool>> {
        grid(&self.col_of_row)
    }
}

/// Primed zeros found during the current path search
///
/// A primed row is covered immediately or ends the search, so each row holds
/// at most one prime between augmentations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeMap {
    col_of_row: Vec<Option<usize>>,
}

impl PrimeMap {
    pub fn new(size: usize) -> Self {
        Self {
            col_of_row: vec![None; size],
        }
    }

    pub fn prime(&mut self, row: usize, col: usize) {
        self.col_of_row[row] = Some(col);
    }

    pub fn in_row(&self, row: usize) -> Option<usize> {
        self.col_of_row[row]
    }

    pub fn clear(&mut self) {
        self.col_of_row.fill(None);
    }

    pub fn is_empty(&self) -> bool {
        self.col_of_row.iter().all(Option::is_none)
    }

    pub fn to_grid(&self) -> Vec<Vec<bool>> {
        grid(&self.col_of_row)
    }
}

/// Covered rows and columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverState {
    rows: Vec<bool>,
    cols: Vec<bool>,
}

impl CoverState {
    pub fn new(size: usize) -> Self {
        Self {
            rows: vec![false; size],
            cols: vec![false; size],
        }
    }

    pub fn rows(&self) -> &[bool] {
        &self.rows
    }

    pub fn cols(&self) -> &[bool] {
        &self.cols
    }

    pub fn is_row_covered(&self, row: usize) -> bool {
        self.rows[row]
    }

    pub fn is_col_covered(&self, col: usize) -> bool {
        self.cols[col]
    }

    pub fn cover_row(&mut self, row: usize) {
        self.rows[row] = true;
    }

    pub fn cover_col(&mut self, col: usize) {
        self.cols[col] = true;
    }

    pub fn uncover_col(&mut self, col: usize) {
        self.cols[col] = false;
    }

    pub fn covered_col_count(&self) -> usize {
        self.cols.iter().filter(|&&c| c).count()
    }

    pub fn clear(&mut self) {
        self.rows.fill(false);
        self.cols.fill(false);
    }
}

fn grid(col_of_row: &[Option<usize>]) -> Vec<Vec<bool>> {
    let size = col_of_row.len();
    col_of_row
        .iter()
        .map(|col| {
            let mut row = vec![false; size];
            if let Some(col) = col {
                row[*col] = true;
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_rejects_occupied_row_or_column() {
        let mut stars = StarMap::new(3);

        assert!(stars.try_star(0, 1));
        assert!(!stars.try_star(0, 2), "row 0 already starred");
        assert!(!stars.try_star(2, 1), "column 1 already starred");
        assert!(stars.try_star(2, 0));

        assert_eq!(stars.count(), 2);
        assert_eq!(stars.in_row(2), Some(0));
        assert_eq!(stars.in_col(1), Some(0));
        assert_eq!(stars.pairs(), vec![(0, 1), (2, 0)]);
    }

    #[test]
    fn unstar_frees_row_and_column() {
        let mut stars = StarMap::new(2);
        stars.try_star(0, 0);

        assert!(!stars.unstar(0, 1));
        assert!(stars.unstar(0, 0));
        assert_eq!(stars.count(), 0);
        assert!(stars.try_star(1, 0));
    }

    #[test]
    fn grids_have_one_mark_per_row_at_most() {
        let mut stars = StarMap::new(3);
        stars.try_star(1, 2);

        assert_eq!(
            stars.to_grid(),
            vec![
                vec![false, false, false],
                vec![false, false, true],
                vec![false, false, false]
            ]
        );
    }

    #[test]
    fn primes_clear_completely() {
        let mut primes = PrimeMap::new(2);
        primes.prime(0, 1);
        primes.prime(1, 0);
        assert!(!primes.is_empty());

        primes.clear();
        assert!(primes.is_empty());
        assert_eq!(primes.to_grid(), vec![vec![false; 2]; 2]);
    }

    #[test]
    fn covers() {
        let mut covers = CoverState::new(3);
        covers.cover_col(0);
        covers.cover_col(2);
        covers.cover_row(1);
        assert_eq!(covers.covered_col_count(), 2);

        covers.uncover_col(2);
        assert_eq!(covers.cols(), &[true, false, false]);
        assert!(covers.is_row_covered(1));

        covers.clear();
        assert_eq!(covers.covered_col_count(), 0);
        assert!(!covers.is_row_covered(1));
    }
}
