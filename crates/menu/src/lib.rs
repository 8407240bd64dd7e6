//! Typed settings menus drawn as rows of a spreadsheet grid.
//!
//! A host declares an ordered list of settings (text, checkbox, dropdown),
//! hands them to a [`MenuLayout`], calls [`MenuLayout::draw`] to materialize
//! them with defaults, and later reads live values back by name. All grid
//! access goes through the [`GridProvider`] trait; the engine [`Workbook`]
//! implements it for in-memory use.
//!
//! [`Workbook`]: sheetmenu_engine::Workbook

pub mod error;
pub mod grid;
pub mod layout;
pub mod setting;
pub mod workbook_grid;

pub use error::MenuError;
pub use grid::{CellWidget, GridError, GridProvider, Region, SurfaceHandle};
pub use layout::{compute_structure, MenuLayout, Structure};
pub use setting::{
    CheckboxSetting, DropdownSetting, Setting, SettingKind, SettingSize, TextSetting, VALUE_COLUMN,
};
pub use sheetmenu_config::{MenuFile, MenuOptions, SettingDecl};
pub use sheetmenu_engine::CellValue;
