//! Core data model types.
//!
//! A worksheet is read into a sequence of sparse [`Row`]s, which the parsers in
//! [`crate::parsing`] turn into a [`Document`]: either a flat list of [`Section`]s or a
//! [`Cluster`] → [`Installation`] → [`Section`] hierarchy.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Timeline value used when a tag's timeline cell is blank or absent.
pub const DEFAULT_TIMELINE: &str = "0";

/// One worksheet row: column index (0-based) → trimmed cell text.
///
/// Absent keys mean an empty cell. Blank cells are never stored, so a fully blank row is an empty
/// mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: BTreeMap<usize, String>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(column, value)` pairs. Values are trimmed; blank values are dropped.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: AsRef<str>,
    {
        let mut row = Self::new();
        for (col, value) in cells {
            row.insert(col, value.as_ref());
        }
        row
    }

    /// Set a cell. The value is trimmed; a blank value removes the cell instead.
    pub fn insert(&mut self, col: usize, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.cells.remove(&col);
        } else {
            self.cells.insert(col, value.to_string());
        }
    }

    /// Cell text at `col`, or `""` when the cell is empty.
    pub fn get(&self, col: usize) -> &str {
        self.cells.get(&col).map_or("", String::as_str)
    }

    /// Whether the cell at `col` holds a non-blank value.
    pub fn has(&self, col: usize) -> bool {
        !self.get(col).is_empty()
    }

    /// Whether the row has no non-blank cells at all.
    pub fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

}

/// One instrumentation point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// R&I identifier (e.g. `MS100`).
    pub ri: String,
    pub description: String,
    pub unit: String,
    pub variable: String,
    /// Never empty; blank sources become [`DEFAULT_TIMELINE`].
    pub timeline: String,
}

impl Tag {
    /// Create a tag, applying the timeline default.
    pub fn new(
        ri: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
        variable: impl Into<String>,
        timeline: impl Into<String>,
    ) -> Self {
        let timeline = timeline.into();
        let timeline = if timeline.trim().is_empty() {
            DEFAULT_TIMELINE.to_string()
        } else {
            timeline
        };
        Self {
            ri: ri.into(),
            description: description.into(),
            unit: unit.into(),
            variable: variable.into(),
            timeline,
        }
    }
}

/// Tags grouped under a heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub tags: Vec<Tag>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
        }
    }
}

/// A plant installation (hierarchical layout only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installation {
    pub name: String,
    pub sections: Vec<Section>,
}

/// A group of installations (hierarchical layout only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    pub installations: Vec<Installation>,
}

/// Which layout convention a worksheet follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetFormat {
    /// Old layout: title / id / description / unit / variable / timeline, sections only.
    Flat,
    /// New layout: cluster / installation / title / id / description / unit / variable / timeline.
    Hierarchical,
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => f.write_str("OLD FORMAT"),
            Self::Hierarchical => f.write_str("NEW FORMAT"),
        }
    }
}

/// The converted document for one spreadsheet.
///
/// Serializes as `{"name": ..., "sections": [...]}` or `{"name": ..., "clusters": [...]}`; the two
/// shapes never mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    Flat { name: String, sections: Vec<Section> },
    Hierarchical { name: String, clusters: Vec<Cluster> },
}

impl Document {
    /// Source name (spreadsheet file stem).
    pub fn name(&self) -> &str {
        match self {
            Self::Flat { name, .. } | Self::Hierarchical { name, .. } => name,
        }
    }

    /// Layout the document was parsed from.
    pub fn format(&self) -> SheetFormat {
        match self {
            Self::Flat { .. } => SheetFormat::Flat,
            Self::Hierarchical { .. } => SheetFormat::Hierarchical,
        }
    }

    /// Iterate every section, regardless of layout.
    pub fn sections(&self) -> Box<dyn Iterator<Item = &Section> + '_> {
        match self {
            Self::Flat { sections, .. } => Box::new(sections.iter()),
            Self::Hierarchical { clusters, .. } => Box::new(
                clusters
                    .iter()
                    .flat_map(|c| c.installations.iter())
                    .flat_map(|i| i.sections.iter()),
            ),
        }
    }

    /// Count clusters, installations, sections and tags.
    pub fn stats(&self) -> DocumentStats {
        let (clusters, installations) = match self {
            Self::Flat { .. } => (0, 0),
            Self::Hierarchical { clusters, .. } => (
                clusters.len(),
                clusters.iter().map(|c| c.installations.len()).sum(),
            ),
        };
        let (sections, tags) = self
            .sections()
            .fold((0, 0), |(s, t), section| (s + 1, t + section.tags.len()));
        DocumentStats {
            format: self.format(),
            clusters,
            installations,
            sections,
            tags,
        }
    }
}

/// Summary counts for a converted [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub format: SheetFormat,
    pub clusters: usize,
    pub installations: usize,
    pub sections: usize,
    pub tags: usize,
}

impl fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            SheetFormat::Flat => write!(
                f,
                "Parsed {} sections with {} tags ({})",
                self.sections, self.tags, self.format
            ),
            SheetFormat::Hierarchical => write!(
                f,
                "Parsed {} clusters, {} installations, {} sections with {} tags ({})",
                self.clusters, self.installations, self.sections, self.tags, self.format
            ),
        }
    }
}
