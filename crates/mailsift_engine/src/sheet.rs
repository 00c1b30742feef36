use std::fmt::Display;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use engine_logging::{engine_info, engine_warn};
use thiserror::Error;

use crate::WorkbookInput;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Error reading file.")]
    Io(#[source] std::io::Error),
    #[error("Failed to read the Excel file: {0}")]
    Parse(#[from] calamine::Error),
    #[error("The Excel file does not contain any sheets.")]
    NoSheets,
    #[error("No valid URLs found in the first sheet of the Excel file.")]
    NoUrls,
}

impl WorkbookInput {
    /// Reads the first sheet and returns its URLs.
    pub fn read_urls(&self) -> Result<Vec<String>, SheetError> {
        match self {
            WorkbookInput::Path(path) => read_urls(path),
            WorkbookInput::Bytes(bytes) => urls_from_bytes(bytes),
        }
    }
}

/// Reads the workbook at `path` and returns the URLs in its first sheet.
pub fn read_urls(path: &Path) -> Result<Vec<String>, SheetError> {
    let bytes = fs::read(path).map_err(|err| {
        engine_warn!("Failed to read workbook {:?}: {}", path, err);
        SheetError::Io(err)
    })?;
    urls_from_bytes(&bytes)
}

/// Parses an `.xlsx`/`.xls` workbook from memory and returns the URLs in its first sheet.
pub fn urls_from_bytes(bytes: &[u8]) -> Result<Vec<String>, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook.worksheet_range_at(0).ok_or(SheetError::NoSheets)??;

    let urls = urls_from_grid(&range);
    engine_info!(
        "Workbook first sheet: {} cells, {} URLs",
        range.get_size().0 * range.get_size().1,
        urls.len()
    );
    if urls.is_empty() {
        return Err(SheetError::NoUrls);
    }
    Ok(urls)
}

/// Flattens a sheet row by row and keeps the cells that look like URLs.
pub fn urls_from_grid(range: &Range<Data>) -> Vec<String> {
    urls_from_cells(range.rows().flatten())
}

/// Stringifies and trims each cell, keeping values that start with `http://` or `https://`.
///
/// A leading or trailing byte-order mark counts as whitespace.
pub fn urls_from_cells<I>(cells: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Display,
{
    cells
        .into_iter()
        .map(|cell| {
            cell.to_string()
                .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
                .to_string()
        })
        .filter(|cell| cell.starts_with("http://") || cell.starts_with("https://"))
        .collect()
}
