//! The grid surface a menu is drawn onto.
//!
//! Everything visual lives behind [`GridProvider`]. Coordinates are 1-based:
//! row 1 is the header, column 1 holds setting names, column 2 their values.

use std::fmt;

use sheetmenu_engine::CellValue;

/// Opaque handle to a named grid surface, issued by a [`GridProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    pub fn new(raw: u64) -> Self {
        SurfaceHandle(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A rectangular block of cells: origin (1-based) plus span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Region {
    pub fn new(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self { row, col, rows, cols }
    }

    /// A single cell.
    pub fn cell(row: usize, col: usize) -> Self {
        Self::new(row, col, 1, 1)
    }

    /// Last row covered (inclusive).
    pub fn last_row(&self) -> usize {
        self.row + self.rows.max(1) - 1
    }

    /// Last column covered (inclusive).
    pub fn last_col(&self) -> usize {
        self.col + self.cols.max(1) - 1
    }

    /// Absolute row/column of a cell addressed relative to this region,
    /// 1-based in both frames (`(1, 1)` is the origin).
    pub fn cell_at(&self, row: usize, col: usize) -> (usize, usize) {
        (self.row + row - 1, self.col + col - 1)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}:R{}C{}", self.row, self.col, self.last_row(), self.last_col())
    }
}

/// Presentation constraint attached to one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellWidget {
    /// Boolean checkbox.
    Toggle,
    /// Only the listed values are accepted; other input is rejected.
    ChoiceList(Vec<String>),
}

/// Failure reported by a grid surface.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The named surface could not be resolved or created.
    SurfaceUnavailable(String),
    /// A 1-based address outside the surface.
    OutOfBounds { row: usize, col: usize },
    /// Write refused by an enforced protection.
    Protected { row: usize, col: usize },
    /// Values did not match the region's shape.
    ShapeMismatch { region: Region, rows: usize, cols: usize },
    /// The provider refused the value.
    Rejected(String),
    Other(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceUnavailable(name) => write!(f, "grid surface '{name}' is unavailable"),
            Self::OutOfBounds { row, col } => write!(f, "cell R{row}C{col} is outside the surface"),
            Self::Protected { row, col } => write!(f, "cell R{row}C{col} is protected"),
            Self::ShapeMismatch { region, rows, cols } => {
                write!(f, "{rows}x{cols} values do not fit region {region}")
            }
            Self::Rejected(msg) => write!(f, "value rejected: {msg}"),
            Self::Other(msg) => write!(f, "grid error: {msg}"),
        }
    }
}

impl std::error::Error for GridError {}

/// A spreadsheet-like backend.
///
/// Every call is synchronous. Implementations report failures as
/// [`GridError`]; callers pass them through untouched.
pub trait GridProvider {
    /// Resolve the surface called `name`, creating it if it does not exist.
    fn get_or_create_surface(&mut self, name: &str) -> Result<SurfaceHandle, GridError>;

    /// Write a block of values. `values` must be `region.rows` lines of
    /// `region.cols` values each. The surface grows to hold the region.
    fn write_region(
        &mut self,
        surface: SurfaceHandle,
        region: Region,
        values: &[Vec<CellValue>],
    ) -> Result<(), GridError>;

    /// Read one cell.
    fn read_cell(&self, surface: SurfaceHandle, row: usize, col: usize) -> Result<CellValue, GridError>;

    /// Attach a widget to one cell, replacing any widget already there.
    fn set_cell_widget(
        &mut self,
        surface: SurfaceHandle,
        row: usize,
        col: usize,
        widget: &CellWidget,
    ) -> Result<(), GridError>;

    /// Remove every widget overlapping `region`. Parts of `region` beyond
    /// the surface are ignored.
    fn clear_widgets(&mut self, surface: SurfaceHandle, region: Region) -> Result<(), GridError>;

    /// Merge `region` into one displayed cell.
    fn merge_region(&mut self, surface: SurfaceHandle, region: Region) -> Result<(), GridError>;

    /// Delete all rows after `keep_rows` and all columns after `keep_cols`.
    fn trim_surface(&mut self, surface: SurfaceHandle, keep_rows: usize, keep_cols: usize) -> Result<(), GridError>;

    /// Protect `region`. With `warn_only`, edits are allowed but flagged.
    fn protect(&mut self, surface: SurfaceHandle, region: Region, warn_only: bool) -> Result<(), GridError>;
}
