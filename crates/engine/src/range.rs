use serde::{Deserialize, Serialize};

/// A rectangular range of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    /// Start row (0-indexed).
    pub start_row: usize,
    /// Start column (0-indexed).
    pub start_col: usize,
    /// End row (inclusive, 0-indexed).
    pub end_row: usize,
    /// End column (inclusive, 0-indexed).
    pub end_col: usize,
}

impl CellRange {
    /// Create a new cell range. Corners may be given in any order.
    pub fn new(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self {
            start_row: start_row.min(end_row),
            start_col: start_col.min(end_col),
            end_row: start_row.max(end_row),
            end_col: start_col.max(end_col),
        }
    }

    /// Create a range for a single cell.
    pub fn single(row: usize, col: usize) -> Self {
        Self::new(row, col, row, col)
    }

    /// Check if this range contains the given cell.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row && row <= self.end_row
            && col >= self.start_col && col <= self.end_col
    }

    /// Check if this range overlaps with another range.
    pub fn overlaps(&self, other: &CellRange) -> bool {
        !(self.end_row < other.start_row
            || self.start_row > other.end_row
            || self.end_col < other.start_col
            || self.start_col > other.end_col)
    }

    /// Number of rows spanned.
    pub fn row_count(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    /// Number of columns spanned.
    pub fn col_count(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// Number of cells in this range.
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.col_count()
    }
}

impl PartialOrd for CellRange {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellRange {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.start_row, self.start_col, self.end_row, self.end_col)
            .cmp(&(other.start_row, other.start_col, other.end_row, other.end_col))
    }
}
