//! `tagsheet` converts instrumentation-tag spreadsheets into the JSON documents consumed by the
//! tag display widget.
//!
//! The primary entrypoint is [`convert::convert_file_to_json`] (or [`convert::convert_directory`]
//! for a whole folder), which reads the first worksheet of an `.xlsx` workbook, detects which of
//! the two sheet layouts it follows, and writes `<stem>.json` next to it.
//!
//! ## Sheet layouts
//!
//! The first row of the sheet is a header and is ignored.
//!
//! **Flat (old)**: title / R&I / description / unit / variable / timeline, starting in column A
//! or, when column A is (nearly) empty, in column C. An uppercase title opens a section:
//!
//! ```json
//! { "name": "plant", "sections": [ { "title": "BIOGAS", "tags": [ ... ] } ] }
//! ```
//!
//! **Hierarchical (new)**: cluster / installation / title / R&I / description / unit /
//! variable / timeline in columns A–H:
//!
//! ```json
//! { "name": "plant", "clusters": [ { "name": "...", "installations": [
//!     { "name": "...", "sections": [ { "title": "...", "tags": [ ... ] } ] } ] } ] }
//! ```
//!
//! Every tag has the shape `{"ri", "description", "unit", "variable", "timeline"}`, with
//! `timeline` defaulting to `"0"`.
//!
//! ## Quick example: convert one workbook
//!
//! ```no_run
//! use tagsheet::convert::{convert_file_to_json, ConvertOptions};
//!
//! # fn main() -> Result<(), tagsheet::ConvertError> {
//! let converted = convert_file_to_json("Anlage Nord.xlsx", &ConvertOptions::default())?;
//! println!("{} -> {}", converted.stats, converted.output.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Parsing rows without a workbook
//!
//! ```rust
//! use tagsheet::parsing::{parse_with_layout, SheetLayout};
//! use tagsheet::types::Row;
//!
//! let rows = vec![
//!     Row::from_cells([(0, "Cluster1"), (1, "Plant1"), (2, "Sensors"), (3, "MS1"), (7, "5")]),
//!     Row::from_cells([(2, "Sensors"), (3, "MS2"), (7, "10")]),
//! ];
//! let doc = parse_with_layout("plant", &rows, SheetLayout::HIERARCHICAL);
//! assert_eq!(doc.stats().tags, 2);
//! ```
//!
//! ## Modules
//!
//! - [`convert`]: per-file and batch conversion, JSON output
//! - [`ingestion`]: reading worksheet rows, observer hooks
//! - [`parsing`]: layout detection and the two parsers
//! - [`types`]: rows and the document model
//! - [`cell_ref`]: A1 column-letter arithmetic
//! - [`error`]: error types

pub mod cell_ref;
pub mod convert;
pub mod error;
pub mod ingestion;
pub mod parsing;
pub mod types;

pub use error::{ConvertError, ConvertResult};
