//! Flat (old) layout: title / R&I / description / unit / variable / timeline.
//!
//! A title cell in uppercase opens a new section; every row with an id, description or variable
//! becomes a tag of the section currently open, including the title row itself.

use crate::types::{Row, Section, Tag};

use super::detect::is_id_like;

/// Column of each field relative to the layout's column offset.
mod col {
    pub const TITLE: usize = 0;
    pub const RI: usize = 1;
    pub const DESCRIPTION: usize = 2;
    pub const UNIT: usize = 3;
    pub const VARIABLE: usize = 4;
    pub const TIMELINE: usize = 5;
}

/// At least one uppercase letter and no lowercase letter.
///
/// Digits, punctuation and uncased letters are neutral, so `"ZONE 2"` qualifies while `"123"`
/// and `"Zone 2"` do not.
pub fn is_uppercase_heading(value: &str) -> bool {
    let mut has_upper = false;
    for c in value.chars() {
        if c.is_lowercase() {
            return false;
        }
        has_upper |= c.is_uppercase();
    }
    has_upper
}

/// Whether `value` can open a section (independently of the section currently open).
pub fn is_section_title(value: &str) -> bool {
    !value.is_empty() && is_uppercase_heading(value) && !is_id_like(value)
}

/// Build a tag from the fields starting at `offset`, or `None` when the row carries no tag data.
pub(crate) fn tag_at(row: &Row, offset: usize) -> Option<Tag> {
    let ri = row.get(offset + col::RI);
    let description = row.get(offset + col::DESCRIPTION);
    let variable = row.get(offset + col::VARIABLE);
    if ri.is_empty() && description.is_empty() && variable.is_empty() {
        return None;
    }
    Some(Tag::new(
        ri,
        description,
        row.get(offset + col::UNIT),
        variable,
        row.get(offset + col::TIMELINE),
    ))
}

/// Parse rows of the flat layout into sections, in source order.
///
/// Rows before the first title are dropped. A title equal to the open section's title continues
/// that section; the same title appearing again later starts a second section.
pub fn parse_sections(rows: &[Row], column_offset: usize) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for row in rows.iter().filter(|r| !r.is_blank()) {
        let title = row.get(column_offset + col::TITLE);

        let continues_current = current.as_ref().is_some_and(|s| s.title == title);
        if is_section_title(title) && !continues_current {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(Section::new(title));
        }

        if let Some(section) = current.as_mut() {
            if let Some(tag) = tag_at(row, column_offset) {
                section.tags.push(tag);
            }
        }
    }

    if let Some(done) = current {
        sections.push(done);
    }
    sections
}
