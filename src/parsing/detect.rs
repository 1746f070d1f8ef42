//! Sheet layout detection.
//!
//! Looks at a leading sample of rows and decides between the flat (old) layout and the
//! cluster/installation (new) layout. The thresholds are heuristics tuned against existing tag
//! sheets; changing them changes how those sheets convert.

use crate::types::{Row, SheetFormat};

/// Number of leading rows inspected (blank rows inside the window are ignored).
pub const SAMPLE_ROWS: usize = 10;

/// Below this many filled column-A cells, column A counts as empty.
pub const MIN_FILLED_ROWS: usize = 3;

/// Prefixes that mark an R&I identifier rather than a heading or name.
pub const ID_PREFIXES: [&str; 6] = ["MS", "AG", "LME", "TME", "PME", "FME"];

/// Whether `value` starts like an R&I identifier.
pub fn is_id_like(value: &str) -> bool {
    ID_PREFIXES.iter().any(|p| value.starts_with(p))
}

/// Result of layout detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub format: SheetFormat,
    /// First data column of the flat layout (0 = title in A, 2 = title in C). Always 0 for the
    /// hierarchical layout, whose columns are fixed.
    pub column_offset: usize,
}

impl SheetLayout {
    pub const FLAT: Self = Self {
        format: SheetFormat::Flat,
        column_offset: 0,
    };
    pub const FLAT_SHIFTED: Self = Self {
        format: SheetFormat::Flat,
        column_offset: 2,
    };
    pub const HIERARCHICAL: Self = Self {
        format: SheetFormat::Hierarchical,
        column_offset: 0,
    };
}

/// Counts gathered over the detection sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleStats {
    /// Non-blank rows in the sample.
    pub rows: usize,
    pub col_a_count: usize,
    pub col_b_count: usize,
    /// Some column-B value starts with an [`ID_PREFIXES`] entry.
    pub col_b_looks_like_id: bool,
}

impl SampleStats {
    /// Gather counts over the first [`SAMPLE_ROWS`] rows.
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut stats = Self::default();
        for row in rows.iter().take(SAMPLE_ROWS).filter(|r| !r.is_blank()) {
            stats.rows += 1;
            if row.has(0) {
                stats.col_a_count += 1;
            }
            if row.has(1) {
                stats.col_b_count += 1;
                if is_id_like(row.get(1)) {
                    stats.col_b_looks_like_id = true;
                }
            }
        }
        stats
    }

    /// Column A is too sparse to hold cluster names or titles.
    pub fn col_a_is_empty(&self) -> bool {
        self.col_a_count < MIN_FILLED_ROWS
    }
}

/// Classify a sheet from its rows. A sheet without any rows is flat with offset 0.
pub fn detect_layout(rows: &[Row]) -> SheetLayout {
    if rows.is_empty() {
        return SheetLayout::FLAT;
    }
    layout_from_stats(&SampleStats::from_rows(rows))
}

/// Classify a sheet from already gathered sample counts.
pub fn layout_from_stats(stats: &SampleStats) -> SheetLayout {
    if stats.col_a_is_empty() {
        SheetLayout::FLAT_SHIFTED
    } else if stats.col_b_looks_like_id {
        SheetLayout::FLAT
    } else {
        SheetLayout::HIERARCHICAL
    }
}
