//! Setting descriptors.
//!
//! A descriptor is an immutable description of one row of the menu: its
//! name, default value, and description, plus a [`SettingKind`] that decides
//! how the value cell is presented. All kinds share the read/default logic
//! on [`Setting`]; variants only override [`Setting::render`], and always run
//! the base write first.

use std::fmt;

use sheetmenu_config::SettingDecl;
use sheetmenu_engine::CellValue;

use crate::error::MenuError;
use crate::grid::{CellWidget, GridError, GridProvider, Region, SurfaceHandle};

/// Column (1-based, within a setting's region) holding the live value.
pub const VALUE_COLUMN: usize = 2;

/// Closed set of setting types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    Text,
    Checkbox,
    Dropdown,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Checkbox => write!(f, "checkbox"),
            Self::Dropdown => write!(f, "dropdown"),
        }
    }
}

/// Footprint of a setting on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSize {
    pub rows: usize,
    pub columns: usize,
}

impl SettingSize {
    /// One row: name, value, description.
    pub const SINGLE_ROW: SettingSize = SettingSize { rows: 1, columns: 3 };
}

pub trait Setting: fmt::Debug {
    fn name(&self) -> &str;

    /// The stored default.
    fn default_value(&self) -> &CellValue;

    fn description(&self) -> &str;

    fn kind(&self) -> SettingKind;

    fn get_default(&self) -> CellValue {
        self.default_value().clone()
    }

    /// Layout footprint. Variants with a different shape must override this.
    fn get_size(&self) -> SettingSize {
        SettingSize::SINGLE_ROW
    }

    /// The literal row written by [`render`](Setting::render).
    fn get_default_values(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.name().to_string()),
            self.get_default(),
            CellValue::Text(self.description().to_string()),
        ]
    }

    /// Base rendering step: write the default row across the first row of
    /// `region`. Further rows of a taller footprint are left to the variant.
    fn render_values(
        &self,
        grid: &mut dyn GridProvider,
        surface: SurfaceHandle,
        region: Region,
    ) -> Result<(), GridError> {
        let values = self.get_default_values();
        let first_row = Region::new(region.row, region.col, 1, values.len());
        grid.write_region(surface, first_row, &[values])
    }

    fn render(
        &self,
        grid: &mut dyn GridProvider,
        surface: SurfaceHandle,
        region: Region,
    ) -> Result<(), GridError> {
        self.render_values(grid, surface, region)
    }
}

/// Free-text setting.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSetting {
    name: String,
    default: CellValue,
    description: String,
}

impl TextSetting {
    pub fn new(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: CellValue::Text(default.into()),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Setting for TextSetting {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> &CellValue {
        &self.default
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn kind(&self) -> SettingKind {
        SettingKind::Text
    }
}

/// Boolean setting shown as a checkbox.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxSetting {
    name: String,
    default: CellValue,
    description: String,
}

impl CheckboxSetting {
    pub fn new(name: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            default: CellValue::Boolean(default),
            description: String::new(),
        }
    }

    /// An unchecked checkbox.
    pub fn unchecked(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Setting for CheckboxSetting {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> &CellValue {
        &self.default
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn kind(&self) -> SettingKind {
        SettingKind::Checkbox
    }

    fn render(
        &self,
        grid: &mut dyn GridProvider,
        surface: SurfaceHandle,
        region: Region,
    ) -> Result<(), GridError> {
        self.render_values(grid, surface, region)?;
        let (row, col) = region.cell_at(1, VALUE_COLUMN);
        grid.set_cell_widget(surface, row, col, &CellWidget::Toggle)
    }
}

/// Choice among a fixed list. The first choice is the default.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownSetting {
    name: String,
    possible_values: Vec<String>,
    default: CellValue,
    description: String,
}

impl DropdownSetting {
    pub fn new<I, S>(name: impl Into<String>, possible_values: I) -> Result<Self, MenuError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let possible_values: Vec<String> = possible_values.into_iter().map(Into::into).collect();
        let first = possible_values.first().cloned().ok_or_else(|| {
            MenuError::InvalidConfiguration(format!("dropdown '{name}' has no possible values"))
        })?;

        Ok(Self {
            name,
            possible_values,
            default: CellValue::Text(first),
            description: String::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn possible_values(&self) -> &[String] {
        &self.possible_values
    }
}

impl Setting for DropdownSetting {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> &CellValue {
        &self.default
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn kind(&self) -> SettingKind {
        SettingKind::Dropdown
    }

    fn render(
        &self,
        grid: &mut dyn GridProvider,
        surface: SurfaceHandle,
        region: Region,
    ) -> Result<(), GridError> {
        self.render_values(grid, surface, region)?;
        let (row, col) = region.cell_at(1, VALUE_COLUMN);
        let widget = CellWidget::ChoiceList(self.possible_values.clone());
        grid.set_cell_widget(surface, row, col, &widget)
    }
}

impl From<TextSetting> for Box<dyn Setting> {
    fn from(setting: TextSetting) -> Self {
        Box::new(setting)
    }
}

impl From<CheckboxSetting> for Box<dyn Setting> {
    fn from(setting: CheckboxSetting) -> Self {
        Box::new(setting)
    }
}

impl From<DropdownSetting> for Box<dyn Setting> {
    fn from(setting: DropdownSetting) -> Self {
        Box::new(setting)
    }
}

/// Build a descriptor from its declaration in a menu file.
pub fn from_decl(decl: &SettingDecl) -> Result<Box<dyn Setting>, MenuError> {
    let setting: Box<dyn Setting> = match decl {
        SettingDecl::Text { name, default, description } => {
            TextSetting::new(name.as_str(), default.as_str())
                .with_description(description.as_str())
                .into()
        }
        SettingDecl::Checkbox { name, default, description } => {
            CheckboxSetting::new(name.as_str(), *default)
                .with_description(description.as_str())
                .into()
        }
        SettingDecl::Dropdown { name, values, description } => {
            DropdownSetting::new(name.as_str(), values.iter().map(String::as_str))?
                .with_description(description.as_str())
                .into()
        }
    };
    Ok(setting)
}
