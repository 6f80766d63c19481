use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx};

use super::FieldExtractor;
use crate::domain::error::{AppError, Result};
use crate::domain::intake::{CellGrid, CellRef, CellValue};

impl FieldExtractor {
    /// Load the first worksheet of an xlsx workbook as a grid of cached values.
    ///
    /// Always the first worksheet, never the tab that was active when the file was
    /// saved: calamine does not expose the active tab.
    pub(in crate::application::use_cases) fn read_intake_grid(
        &self,
        content: &[u8],
    ) -> Result<CellGrid> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(content))
            .map_err(|e| AppError::UnreadableSource(format!("Failed to open workbook: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::UnreadableSource("No worksheet found".to_string()))?
            .map_err(|e| {
                AppError::UnreadableSource(format!("Failed to read worksheet range: {}", e))
            })?;

        // Range positions are relative to the first used cell
        let (start_row, start_col) = range.start().unwrap_or((0, 0));

        let mut grid = CellGrid::new();
        for (row, col, cell) in range.used_cells() {
            let position = CellRef::new(start_row + row as u32, start_col + col as u32);
            grid.set(position, cell_value(cell));
        }

        Ok(grid)
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::from(text.as_str()),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::Error(err) => CellValue::Error(err.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(datetime) => {
                CellValue::DateTime(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            None => CellValue::Text(format!("{}", cell)),
        },
        other => CellValue::Text(other.to_string()),
    }
}
