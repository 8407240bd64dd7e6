// Layout options for a settings menu

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options controlling where and how a menu is laid out.
///
/// Missing keys fall back to the defaults below, so `{}` is a valid options
/// table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuOptions {
    /// Name of the grid surface (sheet) that holds the menu.
    pub sheet_name: String,

    /// Header label written across the top of the menu.
    pub title_text: String,

    /// Blank rows inserted between settings.
    pub row_spacing: usize,

    /// Height of the header in rows.
    pub header_rows: usize,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Settings".to_string(),
            title_text: "Settings Menu".to_string(),
            row_spacing: 1,
            header_rows: 1,
        }
    }
}

impl MenuOptions {
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title_text = title.into();
        self
    }

    pub fn with_row_spacing(mut self, spacing: usize) -> Self {
        self.row_spacing = spacing;
        self
    }

    pub fn with_header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    /// Reject options no layout can honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sheet_name.trim().is_empty() {
            return Err(ConfigError::Invalid("sheetName must not be empty".into()));
        }
        if self.header_rows == 0 {
            return Err(ConfigError::Invalid("headerRows must be at least 1".into()));
        }
        Ok(())
    }
}
