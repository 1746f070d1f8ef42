//! Row extraction from raw worksheet cells.
//!
//! A worksheet is a sequence of rows, each a sequence of [`RawCell`]s carrying an A1 reference,
//! an optional type discriminator and a value. Type `"s"` values are indices into the workbook's
//! [`SharedStrings`] table.
//!
//! Extraction rules:
//! - the first row is a header and is always skipped
//! - the column comes from the reference's letter prefix; cells without one are skipped
//! - cells without a value are skipped
//! - shared-string indices that cannot be resolved keep their raw value
//! - every value is trimmed

use crate::cell_ref;
use crate::types::Row;

/// Cell type discriminator for shared-string-indexed values.
pub const SHARED_STRING_TYPE: &str = "s";

/// A worksheet cell as stored in the sheet XML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    /// A1-style reference, e.g. `"AB12"`.
    pub reference: Option<String>,
    /// `Some("s")` for shared strings; anything else is an inline/numeric value.
    pub cell_type: Option<String>,
    pub value: Option<String>,
}

impl RawCell {
    /// An inline (non-shared) cell.
    pub fn inline(reference: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            cell_type: None,
            value: Some(value.into()),
        }
    }

    /// A shared-string cell whose value is an index into the table.
    pub fn shared(reference: impl Into<String>, index: usize) -> Self {
        Self {
            reference: Some(reference.into()),
            cell_type: Some(SHARED_STRING_TYPE.to_string()),
            value: Some(index.to_string()),
        }
    }
}

/// The workbook's shared-string table.
///
/// An absent or unreadable table is represented by [`SharedStrings::default`] (empty), which
/// leaves shared-string cells with their raw index values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    pub fn new(strings: Vec<String>) -> Self {
        Self { strings }
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Resolve a raw shared-string index (e.g. `"3"`).
    pub fn resolve(&self, raw_index: &str) -> Option<&str> {
        let idx = raw_index.trim().parse::<usize>().ok()?;
        self.strings.get(idx).map(String::as_str)
    }
}

/// Convert raw worksheet rows into [`Row`]s, skipping the header row.
pub fn rows_from_raw_cells<R, C>(rows: R, shared: &SharedStrings) -> Vec<Row>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = RawCell>,
{
    rows.into_iter()
        .skip(1)
        .map(|cells| row_from_raw_cells(cells, shared))
        .collect()
}

fn row_from_raw_cells<C>(cells: C, shared: &SharedStrings) -> Row
where
    C: IntoIterator<Item = RawCell>,
{
    let mut row = Row::new();
    for cell in cells {
        let Some(col) = cell
            .reference
            .as_deref()
            .and_then(cell_ref::split_reference)
            .map(|(col, _)| col)
        else {
            continue;
        };
        let Some(raw) = cell.value.as_deref() else {
            continue;
        };
        row.insert(col, resolve_value(cell.cell_type.as_deref(), raw, shared));
    }
    row
}

fn resolve_value<'a>(cell_type: Option<&str>, raw: &'a str, shared: &'a SharedStrings) -> &'a str {
    if cell_type == Some(SHARED_STRING_TYPE) && !shared.is_empty() {
        shared.resolve(raw).unwrap_or(raw)
    } else {
        raw
    }
}
