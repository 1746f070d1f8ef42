//! Turning worksheet rows into a [`Document`].
//!
//! [`parse_rows`] is the whole pipeline for one sheet:
//!
//! 1. [`detect::detect_layout`] classifies the sheet from its leading rows
//! 2. [`flat::parse_sections`] or [`hierarchy::parse_clusters`] builds the content
//! 3. the result is wrapped with the source name
//!
//! Parsing never fails. A misdetected layout produces a well-formed but wrong hierarchy.
//!
//! ```rust
//! use tagsheet::parsing::parse_rows;
//! use tagsheet::types::{Document, Row};
//!
//! let rows = vec![
//!     Row::from_cells([(0, "BIOGAS"), (1, "MS100"), (2, "Flow rate"), (3, "m3/h"), (4, "FLOW1")]),
//!     Row::from_cells([(0, "BIOGAS"), (1, "MS101"), (2, "Pressure"), (3, "bar"), (4, "PRES1")]),
//!     Row::from_cells([(0, "BIOGAS"), (1, "MS102"), (2, "Level"), (3, "%"), (4, "LVL1")]),
//! ];
//! let doc = parse_rows("plant", &rows);
//! let Document::Flat { sections, .. } = &doc else { panic!("expected flat layout") };
//! assert_eq!(sections[0].title, "BIOGAS");
//! assert_eq!(sections[0].tags.len(), 3);
//! ```

pub mod detect;
pub mod flat;
pub mod hierarchy;

use crate::types::{Cluster, Document, Row, Section, SheetFormat};

pub use detect::{SheetLayout, detect_layout};

/// Detect the layout of `rows` and parse them into a document named `name`.
pub fn parse_rows(name: &str, rows: &[Row]) -> Document {
    parse_with_layout(name, rows, detect_layout(rows))
}

/// Parse `rows` with an already known layout.
pub fn parse_with_layout(name: &str, rows: &[Row], layout: SheetLayout) -> Document {
    match layout.format {
        SheetFormat::Flat => flat_document(name, flat::parse_sections(rows, layout.column_offset)),
        SheetFormat::Hierarchical => hierarchical_document(name, hierarchy::parse_clusters(rows)),
    }
}

/// Wrap flat-layout sections into a document.
pub fn flat_document(name: impl Into<String>, sections: Vec<Section>) -> Document {
    Document::Flat {
        name: name.into(),
        sections,
    }
}

/// Wrap hierarchical-layout clusters into a document.
pub fn hierarchical_document(name: impl Into<String>, clusters: Vec<Cluster>) -> Document {
    Document::Hierarchical {
        name: name.into(),
        clusters,
    }
}
