//! In-memory grid engine: workbooks of named sheets holding scalar cells,
//! with data validation widgets, merged ranges and advisory protection.

pub mod cell;
pub mod range;
pub mod sheet;
pub mod validation;
pub mod workbook;

pub use cell::CellValue;
pub use range::CellRange;
pub use sheet::{EditError, Sheet, SheetId};
pub use validation::{ValidationRule, ValidationType};
pub use workbook::Workbook;
