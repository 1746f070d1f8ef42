use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::cell_ref;
use crate::error::{ConvertError, ConvertResult};
use crate::types::Row;

use super::cells::{RawCell, SharedStrings, rows_from_raw_cells};

/// Which worksheet of a workbook holds the tag table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelection {
    /// The first sheet in workbook order (default).
    #[default]
    First,
    /// A single named sheet.
    Named(String),
}

/// Read the data rows of a workbook (`.xlsx`, `.xlsm`, `.xls`, `.ods`, ...).
///
/// Behavior:
/// - Picks the sheet given by `selection`
/// - Skips the first non-empty row (header)
/// - Produces one [`Row`] per remaining sheet row, keyed by absolute column index
///
/// Shared strings are resolved by the workbook reader.
pub fn read_rows_from_path(path: impl AsRef<Path>, selection: &SheetSelection) -> ConvertResult<Vec<Row>> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match selection {
        SheetSelection::First => {
            workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| ConvertError::MissingWorksheet {
                    message: "workbook has no sheets".to_string(),
                })?
        }
        SheetSelection::Named(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(ConvertError::MissingWorksheet {
                    message: format!("sheet '{name}' not found"),
                });
            }
            name.clone()
        }
    };

    let range = workbook.worksheet_range(&sheet)?;
    Ok(rows_from_range(&range))
}

/// Convert a decoded sheet range into [`Row`]s, skipping its first row.
///
/// A range is dense, so rows absent from the sheet show up as all-empty rows; those are dropped
/// and never reach the parsers.
pub fn rows_from_range(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let start_col = start_col as usize;

    let raw_rows = range
        .rows()
        .enumerate()
        .map(|(idx0, cells)| {
            let row_number = start_row + idx0 as u32 + 1;
            cells
                .iter()
                .enumerate()
                .filter_map(|(offset, cell)| {
                    let value = cell_to_string(cell)?;
                    Some(RawCell::inline(
                        cell_ref::reference(start_col + offset, row_number),
                        value,
                    ))
                })
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty());

    // Strings are already resolved by calamine.
    rows_from_raw_cells(raw_rows, &SharedStrings::default())
}

/// Cell text as stored in the sheet XML; `None` for empty cells.
fn cell_to_string(c: &Data) -> Option<String> {
    let s = match c {
        Data::Empty => return None,
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    };
    Some(s)
}
