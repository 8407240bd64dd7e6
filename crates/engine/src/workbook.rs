use crate::cell::CellValue;
use crate::sheet::{is_valid_sheet_name, normalize_sheet_name, EditError, Sheet, SheetId};

/// Default dimensions for newly inserted sheets.
pub const DEFAULT_ROWS: usize = 1000;
pub const DEFAULT_COLS: usize = 26;

/// A workbook containing multiple sheets
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    /// Next ID to assign to a new sheet. Monotonically increasing, never reused.
    next_sheet_id: u64,
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbook {
    /// Create a new workbook with one default sheet
    pub fn new() -> Self {
        let sheet = Sheet::new(SheetId(1), DEFAULT_ROWS, DEFAULT_COLS);
        Self {
            sheets: vec![sheet],
            next_sheet_id: 2,
        }
    }

    /// Generate a new unique SheetId (monotonically increasing, never reused)
    fn generate_sheet_id(&mut self) -> SheetId {
        let id = SheetId(self.next_sheet_id);
        self.next_sheet_id += 1;
        id
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Add a new sheet with a specific name
    /// Returns None if name is invalid or already exists
    pub fn add_sheet_named(&mut self, name: &str) -> Option<SheetId> {
        if !is_valid_sheet_name(name) {
            return None;
        }
        if self.sheet_name_exists(name) {
            return None;
        }
        let id = self.generate_sheet_id();
        let sheet = Sheet::new_with_name(id, DEFAULT_ROWS, DEFAULT_COLS, name);
        self.sheets.push(sheet);
        Some(id)
    }

    /// Resolve a sheet by name, creating it if absent.
    /// Returns None only if the name is invalid.
    pub fn get_or_insert_sheet(&mut self, name: &str) -> Option<SheetId> {
        if let Some(id) = self.sheet_id_by_name(name) {
            return Some(id);
        }
        let id = self.add_sheet_named(name)?;
        log::debug!("created sheet '{}' ({})", name.trim(), id.raw());
        Some(id)
    }

    /// Check if a sheet name already exists (case-insensitive)
    pub fn sheet_name_exists(&self, name: &str) -> bool {
        let key = normalize_sheet_name(name);
        self.sheets.iter().any(|s| s.name_key == key)
    }

    /// Get a reference to a sheet by its ID
    pub fn sheet_by_id(&self, id: SheetId) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id == id)
    }

    /// Get a mutable reference to a sheet by its ID
    pub fn sheet_by_id_mut(&mut self, id: SheetId) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.id == id)
    }

    /// Find a sheet by name (case-insensitive)
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        let key = normalize_sheet_name(name);
        self.sheets.iter().find(|s| s.name_key == key)
    }

    /// Get the SheetId for a sheet by name (case-insensitive)
    pub fn sheet_id_by_name(&self, name: &str) -> Option<SheetId> {
        self.sheet_by_name(name).map(|s| s.id)
    }

    /// Simulate a user typing into a cell (0-indexed). Validation applies.
    pub fn edit_cell(&mut self, id: SheetId, row: usize, col: usize, input: &str) -> Result<(), EditError> {
        match self.sheet_by_id_mut(id) {
            Some(sheet) => sheet.enter_input(row, col, input),
            None => Err(EditError::OutOfBounds { row, col }),
        }
    }

    /// Read a cell (0-indexed). Missing sheets read as empty.
    pub fn cell_value(&self, id: SheetId, row: usize, col: usize) -> CellValue {
        self.sheet_by_id(id)
            .map(|s| s.get_value(row, col))
            .unwrap_or_default()
    }
}
