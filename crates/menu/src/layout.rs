//! Menu layout: where each setting lives on the grid, drawing, and read-back.
//!
//! The structure (setting name -> first row) is the single source of truth
//! for addressing. It is computed once per layout from the declared order and
//! each setting's footprint:
//!
//! ```text
//! row 1            title (merged across the declared width)
//! row h + s        first setting       h = header rows, s = row spacing
//!                                      (at least h + 1, never on the header)
//! + rows + s       next setting
//! ```

use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};

use sheetmenu_config::{MenuFile, MenuOptions};
use sheetmenu_engine::CellValue;

use crate::error::MenuError;
use crate::grid::{GridProvider, Region, SurfaceHandle};
use crate::setting::{self, Setting, SettingSize, VALUE_COLUMN};

/// Setting name -> 1-based starting row.
pub type Structure = HashMap<String, usize>;

/// An ordered settings menu bound to a grid provider.
#[derive(Debug)]
pub struct MenuLayout<G> {
    options: MenuOptions,
    settings: Vec<Box<dyn Setting>>,
    structure: OnceCell<Structure>,
    surface: Option<SurfaceHandle>,
    grid: G,
}

/// Footprint used for layout. A setting always spans at least one row and
/// its name and value columns.
fn footprint(setting: &dyn Setting) -> SettingSize {
    let size = setting.get_size();
    SettingSize {
        rows: size.rows.max(1),
        columns: size.columns.max(VALUE_COLUMN),
    }
}

/// First row available to settings.
fn first_setting_row(options: &MenuOptions) -> usize {
    (options.header_rows + options.row_spacing).max(options.header_rows + 1)
}

/// Assign each setting its starting row, in declared order.
pub fn compute_structure(options: &MenuOptions, settings: &[Box<dyn Setting>]) -> Structure {
    let mut structure = Structure::with_capacity(settings.len());
    let mut row = first_setting_row(options);

    for setting in settings {
        structure.insert(setting.name().to_string(), row);
        row += footprint(setting.as_ref()).rows + options.row_spacing;
    }

    structure
}

fn structure_of<'a>(
    cell: &'a OnceCell<Structure>,
    options: &MenuOptions,
    settings: &[Box<dyn Setting>],
) -> &'a Structure {
    cell.get_or_init(|| {
        log::debug!("computing structure for {} settings", settings.len());
        compute_structure(options, settings)
    })
}

impl<G: GridProvider> MenuLayout<G> {
    /// Build a layout. Settings keep the given order. Nothing is drawn.
    pub fn new(options: MenuOptions, settings: Vec<Box<dyn Setting>>, grid: G) -> Result<Self, MenuError> {
        options.validate()?;

        let mut seen = HashSet::with_capacity(settings.len());
        for setting in &settings {
            if !seen.insert(setting.name()) {
                return Err(MenuError::DuplicateSettingName(setting.name().to_string()));
            }
        }

        Ok(Self {
            options,
            settings,
            structure: OnceCell::new(),
            surface: None,
            grid,
        })
    }

    /// Build a layout from a parsed menu file.
    pub fn from_file(file: &MenuFile, grid: G) -> Result<Self, MenuError> {
        let settings = file
            .settings
            .iter()
            .map(setting::from_decl)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(file.options.clone(), settings, grid)
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    pub fn settings(&self) -> &[Box<dyn Setting>] {
        &self.settings
    }

    pub fn setting(&self, name: &str) -> Option<&dyn Setting> {
        self.settings
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn into_grid(self) -> G {
        self.grid
    }

    /// Name -> starting row. Computed on first use, then cached.
    pub fn structure(&self) -> &Structure {
        structure_of(&self.structure, &self.options, &self.settings)
    }

    /// Widest setting footprint; the title spans this many columns.
    pub fn column_width(&self) -> usize {
        self.settings
            .iter()
            .map(|s| footprint(s.as_ref()).columns)
            .max()
            .unwrap_or(1)
    }

    /// Last row written by [`draw`](Self::draw).
    pub fn last_row(&self) -> usize {
        let structure = self.structure();
        self.settings
            .last()
            .and_then(|s| {
                structure
                    .get(s.name())
                    .map(|row| row + footprint(s.as_ref()).rows - 1)
            })
            .unwrap_or(self.options.header_rows)
    }

    /// 1-based (row, column) of a setting's value cell.
    pub fn value_cell(&self, name: &str) -> Result<(usize, usize), MenuError> {
        self.structure()
            .get(name)
            .map(|row| (*row, VALUE_COLUMN))
            .ok_or_else(|| MenuError::UnknownSettingName(name.to_string()))
    }

    /// The menu's grid surface, resolved (and created if needed) on first use.
    pub fn surface(&mut self) -> Result<SurfaceHandle, MenuError> {
        if let Some(handle) = self.surface {
            return Ok(handle);
        }
        let handle = self.grid.get_or_create_surface(&self.options.sheet_name)?;
        log::debug!("resolved surface '{}' ({})", self.options.sheet_name, handle.raw());
        self.surface = Some(handle);
        Ok(handle)
    }

    /// Render the whole menu with default values.
    ///
    /// Overwrites any edits, so calling it again resets the menu. Widgets
    /// left by an earlier layout are cleared, rows and columns beyond the
    /// menu are removed, and the written area gets a warning-only protection.
    /// A failure part way leaves the surface partly drawn; drawing again
    /// recovers.
    pub fn draw(&mut self) -> Result<(), MenuError> {
        let surface = self.surface()?;
        let width = self.column_width();
        let last_row = self.last_row();
        let header_rows = self.options.header_rows;

        let structure = structure_of(&self.structure, &self.options, &self.settings);
        let grid: &mut dyn GridProvider = &mut self.grid;

        let mut title = vec![CellValue::Empty; width];
        title[0] = CellValue::Text(self.options.title_text.clone());
        grid.write_region(surface, Region::new(1, 1, 1, width), &[title])?;
        grid.merge_region(surface, Region::new(1, 1, header_rows, width))?;
        grid.clear_widgets(surface, Region::new(1, 1, last_row, width))?;

        for setting in &self.settings {
            let row = structure
                .get(setting.name())
                .copied()
                .ok_or_else(|| MenuError::UnknownSettingName(setting.name().to_string()))?;
            let size = footprint(setting.as_ref());
            let region = Region::new(row, 1, size.rows, size.columns);

            setting.render(grid, surface, region)?;
        }

        grid.trim_surface(surface, last_row, width)?;
        grid.protect(surface, Region::new(1, 1, last_row, width), true)?;

        log::debug!(
            "drew '{}': {} settings, {} rows x {} cols",
            self.options.sheet_name,
            self.settings.len(),
            last_row,
            width
        );
        Ok(())
    }

    /// Current value of a setting as stored in the grid (not its default).
    pub fn get(&mut self, name: &str) -> Result<CellValue, MenuError> {
        let (row, col) = self.value_cell(name)?;
        let surface = self.surface()?;
        Ok(self.grid.read_cell(surface, row, col)?)
    }

    /// `(name, current value)` for every setting, in declared order.
    pub fn get_all(&mut self) -> Result<Vec<(String, CellValue)>, MenuError> {
        let names: Vec<String> = self.settings.iter().map(|s| s.name().to_string()).collect();
        let mut values = Vec::with_capacity(names.len());
        for name in names {
            let value = self.get(&name)?;
            values.push((name, value));
        }
        Ok(values)
    }

    /// Write a value into a setting's value cell.
    pub fn set(&mut self, name: &str, value: impl Into<CellValue>) -> Result<(), MenuError> {
        let (row, col) = self.value_cell(name)?;
        let surface = self.surface()?;
        self.grid
            .write_region(surface, Region::cell(row, col), &[vec![value.into()]])?;
        Ok(())
    }
}
