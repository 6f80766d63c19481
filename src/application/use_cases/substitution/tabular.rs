use std::io::Cursor;

use tracing::debug;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::domain::error::{AppError, Result};
use crate::domain::placeholder::PlaceholderValues;

/// Fill the active worksheet of an xlsx template and serialise the result.
pub fn fill_price_sheet(template: &[u8], values: &PlaceholderValues) -> Result<(Vec<u8>, usize)> {
    let mut book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(template), false)
        .map_err(|e| AppError::TemplateError(format!("Failed to parse XLSX template: {}", e)))?;

    let replaced = fill_worksheet(active_sheet_mut(&mut book)?, values);

    let mut cursor = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut cursor)
        .map_err(|e| AppError::TemplateError(format!("Failed to write XLSX: {}", e)))?;

    Ok((cursor.into_inner(), replaced))
}

/// The sheet named by the workbook view, or the first sheet when the recorded
/// tab index points past the last sheet.
fn active_sheet_mut(book: &mut Spreadsheet) -> Result<&mut Worksheet> {
    let active_tab = book.get_workbook_view().get_active_tab().to_owned() as usize;
    let index = if active_tab < book.get_sheet_count() {
        active_tab
    } else {
        debug!(active_tab, "Active tab out of range; using the first sheet");
        0
    };
    book.get_sheet_mut(&index)
        .ok_or_else(|| AppError::TemplateError("XLSX template has no worksheet".to_string()))
}

/// Generic placeholder scan: every cell, every known token. Returns the number of
/// cells that changed.
pub fn fill_worksheet(sheet: &mut Worksheet, values: &PlaceholderValues) -> usize {
    let mut replaced = 0;
    for cell in sheet.get_cell_collection_mut() {
        let current = cell.get_value().into_owned();
        if let Some(filled) = values.substitute(&current) {
            cell.set_value_string(filled);
            replaced += 1;
        }
    }
    replaced
}
