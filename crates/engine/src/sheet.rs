use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::range::CellRange;
use crate::validation::{ErrorStyle, ValidationResult, ValidationRule, ValidationStore};

/// Stable sheet identity, assigned by the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SheetId(pub(crate) u64);

impl SheetId {
    pub fn from_raw(raw: u64) -> Self {
        SheetId(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Normalize a sheet name for case-insensitive lookups.
pub fn normalize_sheet_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Sheet names must be non-empty, at most 31 characters, and free of the
/// characters spreadsheets reserve for references.
pub fn is_valid_sheet_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed.chars().count() <= 31
        && !trimmed.contains(&['[', ']', ':', '*', '?', '/', '\\'][..])
}

/// A protected range. Warning-only protection lets writes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protection {
    pub range: CellRange,
    pub warning_only: bool,
}

/// Why a write to a sheet was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    /// The cell lies outside the sheet's current dimensions.
    OutOfBounds { row: usize, col: usize },
    /// The cell is inside an enforced protected range.
    Protected { row: usize, col: usize },
    /// Validation rejected the input.
    Rejected { row: usize, col: usize, reason: String },
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the sheet", row, col)
            }
            EditError::Protected { row, col } => {
                write!(f, "cell ({}, {}) is protected", row, col)
            }
            EditError::Rejected { row, col, reason } => {
                write!(f, "cell ({}, {}) rejected input: {}", row, col, reason)
            }
        }
    }
}

impl std::error::Error for EditError {}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub id: SheetId,
    pub name: String,
    pub(crate) name_key: String,
    cells: FxHashMap<(usize, usize), CellValue>,
    pub rows: usize,
    pub cols: usize,
    merges: Vec<CellRange>,
    validations: ValidationStore,
    protections: Vec<Protection>,
}

impl Sheet {
    pub fn new(id: SheetId, rows: usize, cols: usize) -> Self {
        Self::new_with_name(id, rows, cols, "Sheet1")
    }

    pub fn new_with_name(id: SheetId, rows: usize, cols: usize, name: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            name_key: normalize_sheet_name(name),
            cells: FxHashMap::default(),
            rows,
            cols,
            merges: Vec::new(),
            validations: ValidationStore::new(),
            protections: Vec::new(),
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    pub fn get_value(&self, row: usize, col: usize) -> CellValue {
        self.cells.get(&(row, col)).cloned().unwrap_or_default()
    }

    pub fn get_display(&self, row: usize, col: usize) -> String {
        self.cells
            .get(&(row, col))
            .map(|v| v.raw_display())
            .unwrap_or_default()
    }

    /// Programmatic write. Bypasses validation but honors protection.
    pub fn set_value(&mut self, row: usize, col: usize, value: CellValue) -> Result<(), EditError> {
        self.check_writable(row, col)?;
        self.store(row, col, value);
        Ok(())
    }

    /// Write a rectangular block whose top-left corner is `(row, col)`.
    ///
    /// The whole block is checked before anything is written.
    pub fn write_block(&mut self, row: usize, col: usize, values: &[Vec<CellValue>]) -> Result<(), EditError> {
        for (dr, line) in values.iter().enumerate() {
            for dc in 0..line.len() {
                self.check_writable(row + dr, col + dc)?;
            }
        }
        for (dr, line) in values.iter().enumerate() {
            for (dc, value) in line.iter().enumerate() {
                self.store(row + dr, col + dc, value.clone());
            }
        }
        Ok(())
    }

    /// User entry: parsed like a cell editor and checked against validation.
    pub fn enter_input(&mut self, row: usize, col: usize, input: &str) -> Result<(), EditError> {
        let value = CellValue::from_input(input);
        if let Some(rule) = self.validations.get(row, col) {
            if let ValidationResult::Invalid { rule, reason } = rule.validate(&value) {
                match rule.error_style {
                    ErrorStyle::Stop => return Err(EditError::Rejected { row, col, reason }),
                    ErrorStyle::Warning => {
                        log::warn!("{}: accepted invalid input at ({}, {}): {}", self.name, row, col, reason)
                    }
                }
            }
        }
        self.set_value(row, col, value)
    }

    fn store(&mut self, row: usize, col: usize, value: CellValue) {
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    fn check_writable(&self, row: usize, col: usize) -> Result<(), EditError> {
        if row >= self.rows || col >= self.cols {
            return Err(EditError::OutOfBounds { row, col });
        }
        if let Some(p) = self.protections.iter().find(|p| p.range.contains(row, col)) {
            if !p.warning_only {
                return Err(EditError::Protected { row, col });
            }
            log::warn!("{}: writing into protected cell ({}, {})", self.name, row, col);
        }
        Ok(())
    }

    // =========================================================================
    // Validation, merges, protection
    // =========================================================================

    pub fn set_validation(&mut self, range: CellRange, rule: ValidationRule) {
        self.validations.set(range, rule);
    }

    pub fn clear_validation(&mut self, range: &CellRange) {
        self.validations.clear_range(range);
    }

    pub fn get_validation(&self, row: usize, col: usize) -> Option<&ValidationRule> {
        self.validations.get(row, col)
    }

    pub fn validations(&self) -> &ValidationStore {
        &self.validations
    }

    /// Merge a range. Existing merges that overlap it are replaced.
    pub fn merge(&mut self, range: CellRange) {
        self.merges.retain(|m| !m.overlaps(&range));
        if range.cell_count() > 1 {
            self.merges.push(range);
        }
    }

    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    /// Protect a range. Protecting an identical range again replaces it.
    pub fn protect(&mut self, range: CellRange, warning_only: bool) {
        self.protections.retain(|p| p.range != range);
        self.protections.push(Protection { range, warning_only });
    }

    pub fn protections(&self) -> &[Protection] {
        &self.protections
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Extend the sheet so it spans at least `rows` x `cols`. Never shrinks.
    pub fn grow_to(&mut self, rows: usize, cols: usize) {
        if rows > self.rows || cols > self.cols {
            log::debug!("{}: growing to {} x {}", self.name, rows.max(self.rows), cols.max(self.cols));
        }
        self.rows = self.rows.max(rows);
        self.cols = self.cols.max(cols);
    }

    /// Shrink the sheet to `keep_rows` x `keep_cols`, discarding everything beyond.
    ///
    /// A sheet always keeps at least one row and one column.
    pub fn truncate(&mut self, keep_rows: usize, keep_cols: usize) {
        let keep_rows = keep_rows.max(1);
        let keep_cols = keep_cols.max(1);
        if self.rows > keep_rows {
            self.delete_rows(keep_rows, self.rows - keep_rows);
        }
        if self.cols > keep_cols {
            self.delete_cols(keep_cols, self.cols - keep_cols);
        }
    }

    /// Delete rows at the specified position, shifting remaining rows up
    pub fn delete_rows(&mut self, start_row: usize, count: usize) {
        if count == 0 || start_row >= self.rows {
            return;
        }
        let count = count.min(self.rows - start_row);
        let end_row = start_row + count - 1;

        self.cells.retain(|(r, _), _| *r < start_row || *r > end_row);

        // Collect cells that need to be shifted up
        let cells_to_shift: Vec<_> = self.cells
            .iter()
            .filter(|((r, _), _)| *r > end_row)
            .map(|((r, c), value)| ((*r, *c), value.clone()))
            .collect();

        for ((r, c), _) in &cells_to_shift {
            self.cells.remove(&(*r, *c));
        }
        for ((r, c), value) in cells_to_shift {
            self.cells.insert((r - count, c), value);
        }

        let band = CellRange::new(start_row, 0, end_row, self.cols.max(1) - 1);
        let shift = |range: CellRange| {
            if range.start_row > end_row {
                CellRange::new(range.start_row - count, range.start_col, range.end_row - count, range.end_col)
            } else {
                range
            }
        };
        self.remap_ranges(&band, shift);
        self.rows -= count;
    }

    /// Delete columns at the specified position, shifting remaining columns left
    pub fn delete_cols(&mut self, start_col: usize, count: usize) {
        if count == 0 || start_col >= self.cols {
            return;
        }
        let count = count.min(self.cols - start_col);
        let end_col = start_col + count - 1;

        self.cells.retain(|(_, c), _| *c < start_col || *c > end_col);

        // Collect cells that need to be shifted left
        let cells_to_shift: Vec<_> = self.cells
            .iter()
            .filter(|((_, c), _)| *c > end_col)
            .map(|((r, c), value)| ((*r, *c), value.clone()))
            .collect();

        for ((r, c), _) in &cells_to_shift {
            self.cells.remove(&(*r, *c));
        }
        for ((r, c), value) in cells_to_shift {
            self.cells.insert((r, c - count), value);
        }

        let band = CellRange::new(0, start_col, self.rows.max(1) - 1, end_col);
        let shift = |range: CellRange| {
            if range.start_col > end_col {
                CellRange::new(range.start_row, range.start_col - count, range.end_row, range.end_col - count)
            } else {
                range
            }
        };
        self.remap_ranges(&band, shift);
        self.cols -= count;
    }

    /// Drop range-based state touching a deleted band and move what lies past it.
    fn remap_ranges(&mut self, band: &CellRange, shift: impl Fn(CellRange) -> CellRange) {
        self.merges = self.merges
            .iter()
            .filter(|m| !m.overlaps(band))
            .map(|m| shift(*m))
            .collect();

        self.protections = self.protections
            .iter()
            .filter(|p| !p.range.overlaps(band))
            .map(|p| Protection { range: shift(p.range), warning_only: p.warning_only })
            .collect();

        let rules: Vec<_> = self.validations
            .iter()
            .filter(|(r, _)| !r.overlaps(band))
            .map(|(r, rule)| (shift(*r), rule.clone()))
            .collect();
        let mut store = ValidationStore::new();
        for (range, rule) in rules {
            store.set(range, rule);
        }
        self.validations = store;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Sheet {
        Sheet::new_with_name(SheetId(1), 20, 5, "Settings")
    }

    #[test]
    fn test_set_and_get_value() {
        let mut s = sheet();
        s.set_value(0, 0, CellValue::from("title")).unwrap();
        assert_eq!(s.get_value(0, 0), CellValue::Text("title".into()));
        assert_eq!(s.get_value(1, 1), CellValue::Empty);
        assert_eq!(s.get_display(0, 0), "title");
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut s = sheet();
        assert_eq!(
            s.set_value(20, 0, CellValue::Boolean(true)),
            Err(EditError::OutOfBounds { row: 20, col: 0 })
        );
    }

    #[test]
    fn test_write_block_is_atomic() {
        let mut s = sheet();
        s.protect(CellRange::single(1, 2), false);
        let block = vec![vec![CellValue::from("a"), CellValue::from("b"), CellValue::from("c")]];

        assert!(s.write_block(1, 0, &block).is_err());
        assert_eq!(s.get_value(1, 0), CellValue::Empty);

        s.write_block(2, 0, &block).unwrap();
        assert_eq!(s.get_display(2, 2), "c");
    }

    #[test]
    fn test_warning_only_protection_allows_writes() {
        let mut s = sheet();
        s.protect(CellRange::new(0, 0, 3, 2), true);
        s.set_value(1, 1, CellValue::Boolean(true)).unwrap();
        assert_eq!(s.get_value(1, 1), CellValue::Boolean(true));
    }

    #[test]
    fn test_reprotect_replaces() {
        let mut s = sheet();
        let range = CellRange::new(0, 0, 3, 2);
        s.protect(range, false);
        s.protect(range, true);
        assert_eq!(s.protections().len(), 1);
        assert!(s.protections()[0].warning_only);
    }

    #[test]
    fn test_enter_input_checkbox() {
        let mut s = sheet();
        s.set_validation(CellRange::single(3, 1), ValidationRule::checkbox());

        s.enter_input(3, 1, "true").unwrap();
        assert_eq!(s.get_value(3, 1), CellValue::Boolean(true));

        let err = s.enter_input(3, 1, "yes").unwrap_err();
        assert!(matches!(err, EditError::Rejected { row: 3, col: 1, .. }));
        assert_eq!(s.get_value(3, 1), CellValue::Boolean(true));
    }

    #[test]
    fn test_enter_input_list_warning_style() {
        let mut s = sheet();
        let rule = ValidationRule::list_inline(vec!["red".into(), "blue".into()])
            .with_error_style(ErrorStyle::Warning);
        s.set_validation(CellRange::single(2, 1), rule);

        s.enter_input(2, 1, "green").unwrap();
        assert_eq!(s.get_display(2, 1), "green");
    }

    #[test]
    fn test_empty_value_clears_cell() {
        let mut s = sheet();
        s.set_value(4, 4, CellValue::from("x")).unwrap();
        s.set_value(4, 4, CellValue::Empty).unwrap();
        assert!(s.cells.is_empty());
    }

    #[test]
    fn test_truncate_drops_trailing_state() {
        let mut s = sheet();
        s.set_value(1, 1, CellValue::from("keep")).unwrap();
        s.set_value(10, 1, CellValue::from("stale")).unwrap();
        s.set_value(1, 4, CellValue::from("stale")).unwrap();
        s.set_validation(CellRange::single(10, 1), ValidationRule::checkbox());
        s.merge(CellRange::new(0, 0, 0, 2));

        s.truncate(4, 3);

        assert_eq!(s.rows, 4);
        assert_eq!(s.cols, 3);
        assert_eq!(s.get_display(1, 1), "keep");
        assert_eq!(s.cells.len(), 1);
        assert!(s.validations().is_empty());
        assert_eq!(s.merges(), &[CellRange::new(0, 0, 0, 2)]);
    }

    #[test]
    fn test_grow_then_write() {
        let mut s = sheet();
        s.truncate(2, 3);
        assert!(s.set_value(5, 3, CellValue::from("x")).is_err());

        s.grow_to(6, 4);
        assert_eq!((s.rows, s.cols), (6, 4));
        s.set_value(5, 3, CellValue::from("x")).unwrap();

        s.grow_to(1, 1);
        assert_eq!((s.rows, s.cols), (6, 4));
    }

    #[test]
    fn test_truncate_keeps_one_row() {
        let mut s = sheet();
        s.truncate(0, 0);
        assert_eq!(s.rows, 1);
        assert_eq!(s.cols, 1);
    }

    #[test]
    fn test_delete_rows_shifts_up() {
        let mut s = sheet();
        s.set_value(0, 0, CellValue::from("top")).unwrap();
        s.set_value(5, 0, CellValue::from("below")).unwrap();
        s.set_validation(CellRange::single(5, 1), ValidationRule::checkbox());

        s.delete_rows(1, 2);

        assert_eq!(s.rows, 18);
        assert_eq!(s.get_display(0, 0), "top");
        assert_eq!(s.get_display(3, 0), "below");
        assert!(s.get_validation(3, 1).is_some());
        assert!(s.get_validation(5, 1).is_none());
    }

    #[test]
    fn test_delete_cols_shifts_left() {
        let mut s = sheet();
        s.set_value(0, 4, CellValue::from("right")).unwrap();
        s.delete_cols(1, 2);
        assert_eq!(s.cols, 3);
        assert_eq!(s.get_display(0, 2), "right");
    }

    #[test]
    fn test_merge_replaces_overlapping() {
        let mut s = sheet();
        s.merge(CellRange::new(0, 0, 0, 4));
        s.merge(CellRange::new(0, 0, 0, 2));
        assert_eq!(s.merges(), &[CellRange::new(0, 0, 0, 2)]);

        s.merge(CellRange::single(0, 0));
        assert!(s.merges().is_empty());
    }

    #[test]
    fn test_sheet_names() {
        assert!(is_valid_sheet_name("Settings"));
        assert!(!is_valid_sheet_name("   "));
        assert!(!is_valid_sheet_name("a/b"));
        assert_eq!(normalize_sheet_name("  Settings "), "settings");

        let s = Sheet::new_with_name(SheetId(2), 1, 1, " Options ");
        assert_eq!(s.name, "Options");
        assert_eq!(s.name_key, "options");
    }
}
