//! Tabular input
//!
//! Reads the first worksheet of a workbook into a [`Grid`] of cell text.
//! No header row is assumed; the grid is anchored at cell A1 even when the
//! sheet's used range starts further down or to the right.

use std::path::PathBuf;

use calamine::{open_workbook_auto, Data, Range, Reader};
use sheetpol_compiler::Grid;
use tracing::debug;

use crate::{Error, Result};

/// A source of spreadsheet rows
pub trait TabularSource {
    /// Read the whole sheet. Empty cells read as empty strings.
    fn read_grid(&self) -> Result<Grid>;
}

impl TabularSource for Grid {
    fn read_grid(&self) -> Result<Grid> {
        Ok(self.clone())
    }
}

/// Workbook file reader (xlsx, xlsm, xlsb, xls, ods)
#[derive(Clone, Debug)]
pub struct WorkbookReader {
    path: PathBuf,
}

impl WorkbookReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TabularSource for WorkbookReader {
    fn read_grid(&self) -> Result<Grid> {
        let mut workbook =
            open_workbook_auto(&self.path).map_err(|e| Error::workbook(&self.path, e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::EmptyWorkbook {
                path: self.path.clone(),
            })?
            .map_err(|e| Error::workbook(&self.path, e))?;

        let grid = grid_from_range(&range);
        debug!(path = %self.path.display(), rows = grid.row_count(), "read worksheet");
        Ok(grid)
    }
}

/// Convert a worksheet range into a grid anchored at A1
pub fn grid_from_range(range: &Range<Data>) -> Grid {
    let (row_offset, col_offset) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }
    Grid::new(rows)
}

/// Text of a single cell. Whole numbers render without a fraction, so a
/// port typed as a number reads as `53` rather than `53.0`.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}
