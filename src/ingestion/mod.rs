//! Reading worksheet rows and reporting conversion outcomes.
//!
//! - [`excel`]: reads a workbook file into [`crate::types::Row`]s
//! - [`cells`]: the extraction rules over raw sheet cells (header skip, column mapping,
//!   shared-string resolution, trimming)
//! - [`observability`]: observer hooks for logging/alerts

pub mod cells;
pub mod excel;
pub mod observability;

pub use cells::{RawCell, SharedStrings, rows_from_raw_cells};
pub use excel::{SheetSelection, read_rows_from_path};
pub use observability::{
    CompositeObserver, ConversionContext, ConversionObserver, ConversionSeverity, FileObserver, StdErrObserver,
};
