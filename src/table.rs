//! DP table storage and fill-order coordinates.
//!
//! The table has `n + 1` rows (row 0 is the "no items" base case) and
//! `W + 1` columns. Cells are filled in row-major order starting at row 1;
//! the linear fill index `k` maps to `(k / (W + 1) + 1, k % (W + 1))`.

use serde::{Deserialize, Serialize};

/// A DP coordinate: `row` = items considered, `col` = capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Coordinate of fill index `step` in a table with `cols` columns.
    ///
    /// # Panics
    /// Panics if `cols == 0`.
    #[inline]
    pub fn from_fill_index(step: usize, cols: usize) -> Self {
        assert!(cols > 0, "a DP table always has at least one column");
        Self {
            row: step / cols + 1,
            col: step % cols,
        }
    }

    /// Inverse of [`Cell::from_fill_index`]; `None` for row 0.
    #[inline]
    pub fn fill_index(&self, cols: usize) -> Option<usize> {
        if self.row == 0 {
            None
        } else {
            Some((self.row - 1) * cols + self.col)
        }
    }
}

/// Render hints for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFlags {
    /// Holds its final value (row 0, or already computed).
    pub filled: bool,
    /// The next cell to be computed.
    pub current: bool,
    /// Read by the recurrence for the current cell.
    pub dependency: bool,
}

/// Cells the recurrence reads for a given cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    /// `(i - 1, w)`: value when the item is skipped.
    pub up: Cell,
    /// `(i - 1, w - weight)`: present only when the item fits.
    pub diag: Option<Cell>,
}

impl Dependencies {
    pub fn contains(&self, cell: Cell) -> bool {
        self.up == cell || self.diag == Some(cell)
    }
}

/// Dense `(n + 1) x (W + 1)` table of non-negative values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpTable {
    rows: usize,
    cols: usize,
    values: Vec<u64>,
}

impl DpTable {
    /// All-zero table for `n` items and capacity `capacity`.
    ///
    /// Panics if `(n + 1) * (capacity + 1)` overflows `usize`.
    pub fn zeroed(n: usize, capacity: usize) -> Self {
        let size = n
            .checked_add(1)
            .zip(capacity.checked_add(1))
            .and_then(|(rows, cols)| rows.checked_mul(cols).map(|len| (rows, cols, len)));
        let Some((rows, cols, len)) = size else {
            panic!("dp table for {n} items and capacity {capacity} does not fit in memory");
        };
        Self {
            rows,
            cols,
            values: vec![0; len],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cells excluding row 0.
    #[inline]
    pub fn fillable_cells(&self) -> usize {
        (self.rows - 1) * self.cols
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> u64 {
        self.values[self.offset(cell)]
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, value: u64) {
        let at = self.offset(cell);
        self.values[at] = value;
    }

    pub fn row(&self, row: usize) -> &[u64] {
        assert!(row < self.rows, "row {row} out of range ({} rows)", self.rows);
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [u64] {
        assert!(row < self.rows, "row {row} out of range ({} rows)", self.rows);
        &mut self.values[row * self.cols..(row + 1) * self.cols]
    }

    /// Bottom-right value, `dp[n][W]`.
    #[inline]
    pub fn optimum(&self) -> u64 {
        self.get(Cell::new(self.rows - 1, self.cols - 1))
    }

    /// Copy out as nested rows for rendering.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.values.chunks(self.cols).map(<[u64]>::to_vec).collect()
    }

    pub fn is_all_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0)
    }

    #[inline]
    fn offset(&self, cell: Cell) -> usize {
        debug_assert!(
            cell.row < self.rows && cell.col < self.cols,
            "cell ({}, {}) outside {}x{} table",
            cell.row,
            cell.col,
            self.rows,
            self.cols
        );
        cell.row * self.cols + cell.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_index_roundtrip() {
        let cols = 11;
        for step in 0..(3 * cols) {
            let cell = Cell::from_fill_index(step, cols);
            assert!(cell.row >= 1 && cell.row <= 3);
            assert_eq!(cell.fill_index(cols), Some(step));
        }
        assert_eq!(Cell::from_fill_index(0, 11), Cell::new(1, 0));
        assert_eq!(Cell::from_fill_index(11, 11), Cell::new(2, 0));
        assert_eq!(Cell::new(0, 4).fill_index(11), None);
    }

    #[test]
    fn zero_capacity_still_has_one_column() {
        let t = DpTable::zeroed(2, 0);
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 1);
        assert_eq!(t.fillable_cells(), 2);
        assert_eq!(Cell::from_fill_index(1, 1), Cell::new(2, 0));
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn oversized_table_panics_cleanly() {
        DpTable::zeroed(1, usize::MAX);
    }

    #[test]
    fn set_get_and_rows() {
        let mut t = DpTable::zeroed(1, 2);
        t.set(Cell::new(1, 2), 9);
        assert_eq!(t.get(Cell::new(1, 2)), 9);
        assert_eq!(t.row(1), &[0, 0, 9]);
        assert_eq!(t.optimum(), 9);
        assert_eq!(t.to_rows(), vec![vec![0, 0, 0], vec![0, 0, 9]]);
        assert!(!t.is_all_zero());
    }

    #[test]
    fn dependencies_contains() {
        let d = Dependencies {
            up: Cell::new(0, 3),
            diag: Some(Cell::new(0, 1)),
        };
        assert!(d.contains(Cell::new(0, 1)));
        assert!(!d.contains(Cell::new(0, 2)));
    }
}
