//! [`GridProvider`] backed by the in-memory engine [`Workbook`].
//!
//! Surfaces are sheets; handles carry the sheet id. The provider speaks
//! 1-based coordinates, the engine 0-based, so every address is shifted here.

use sheetmenu_engine::sheet::{EditError, Sheet, SheetId};
use sheetmenu_engine::validation::ValidationRule;
use sheetmenu_engine::{CellRange, CellValue, Workbook};

use crate::grid::{CellWidget, GridError, GridProvider, Region, SurfaceHandle};

/// Sheet id behind a handle issued by the workbook provider.
pub fn sheet_id(surface: SurfaceHandle) -> SheetId {
    SheetId::from_raw(surface.raw())
}

impl From<EditError> for GridError {
    fn from(e: EditError) -> Self {
        match e {
            EditError::OutOfBounds { row, col } => GridError::OutOfBounds { row: row + 1, col: col + 1 },
            EditError::Protected { row, col } => GridError::Protected { row: row + 1, col: col + 1 },
            EditError::Rejected { row, col, reason } => {
                GridError::Rejected(format!("R{}C{}: {}", row + 1, col + 1, reason))
            }
        }
    }
}

fn sheet(wb: &Workbook, surface: SurfaceHandle) -> Result<&Sheet, GridError> {
    wb.sheet_by_id(sheet_id(surface))
        .ok_or_else(|| GridError::SurfaceUnavailable(format!("sheet #{}", surface.raw())))
}

fn sheet_mut(wb: &mut Workbook, surface: SurfaceHandle) -> Result<&mut Sheet, GridError> {
    wb.sheet_by_id_mut(sheet_id(surface))
        .ok_or_else(|| GridError::SurfaceUnavailable(format!("sheet #{}", surface.raw())))
}

/// Convert a 1-based address to 0-based, checking it lies on the sheet.
fn to_index(sheet: &Sheet, row: usize, col: usize) -> Result<(usize, usize), GridError> {
    if row == 0 || col == 0 || row > sheet.rows || col > sheet.cols {
        return Err(GridError::OutOfBounds { row, col });
    }
    Ok((row - 1, col - 1))
}

/// 0-based range for a region, growing the sheet so the region fits.
fn cover(sheet: &mut Sheet, region: Region) -> Result<CellRange, GridError> {
    if region.row == 0 || region.col == 0 {
        return Err(GridError::OutOfBounds { row: region.row, col: region.col });
    }
    sheet.grow_to(region.last_row(), region.last_col());
    Ok(CellRange::new(region.row - 1, region.col - 1, region.last_row() - 1, region.last_col() - 1))
}

impl GridProvider for Workbook {
    fn get_or_create_surface(&mut self, name: &str) -> Result<SurfaceHandle, GridError> {
        self.get_or_insert_sheet(name)
            .map(|id| SurfaceHandle::new(id.raw()))
            .ok_or_else(|| GridError::SurfaceUnavailable(name.to_string()))
    }

    fn write_region(
        &mut self,
        surface: SurfaceHandle,
        region: Region,
        values: &[Vec<CellValue>],
    ) -> Result<(), GridError> {
        let shape_ok = values.len() == region.rows && values.iter().all(|line| line.len() == region.cols);
        if !shape_ok {
            return Err(GridError::ShapeMismatch {
                region,
                rows: values.len(),
                cols: values.first().map_or(0, Vec::len),
            });
        }

        let sheet = sheet_mut(self, surface)?;
        let range = cover(sheet, region)?;
        sheet.write_block(range.start_row, range.start_col, values)?;
        Ok(())
    }

    fn read_cell(&self, surface: SurfaceHandle, row: usize, col: usize) -> Result<CellValue, GridError> {
        let sheet = sheet(self, surface)?;
        let (r, c) = to_index(sheet, row, col)?;
        Ok(sheet.get_value(r, c))
    }

    fn set_cell_widget(
        &mut self,
        surface: SurfaceHandle,
        row: usize,
        col: usize,
        widget: &CellWidget,
    ) -> Result<(), GridError> {
        let sheet = sheet_mut(self, surface)?;
        let range = cover(sheet, Region::cell(row, col))?;
        let rule = match widget {
            CellWidget::Toggle => ValidationRule::checkbox(),
            CellWidget::ChoiceList(values) => ValidationRule::list_inline(values.clone()),
        };
        sheet.set_validation(range, rule);
        Ok(())
    }

    fn clear_widgets(&mut self, surface: SurfaceHandle, region: Region) -> Result<(), GridError> {
        let sheet = sheet_mut(self, surface)?;
        if region.row == 0 || region.col == 0 {
            return Err(GridError::OutOfBounds { row: region.row, col: region.col });
        }
        let range = CellRange::new(region.row - 1, region.col - 1, region.last_row() - 1, region.last_col() - 1);
        sheet.clear_validation(&range);
        Ok(())
    }

    fn merge_region(&mut self, surface: SurfaceHandle, region: Region) -> Result<(), GridError> {
        let sheet = sheet_mut(self, surface)?;
        let range = cover(sheet, region)?;
        sheet.merge(range);
        Ok(())
    }

    fn trim_surface(&mut self, surface: SurfaceHandle, keep_rows: usize, keep_cols: usize) -> Result<(), GridError> {
        let sheet = sheet_mut(self, surface)?;
        sheet.truncate(keep_rows, keep_cols);
        Ok(())
    }

    fn protect(&mut self, surface: SurfaceHandle, region: Region, warn_only: bool) -> Result<(), GridError> {
        let sheet = sheet_mut(self, surface)?;
        let range = cover(sheet, region)?;
        sheet.protect(range, warn_only);
        Ok(())
    }
}
