//! A1-style cell reference helpers.
//!
//! Columns are bijective base-26: `A=0`, `Z=25`, `AA=26`, `ZZ=701`, `AAA=702`.

/// Convert column letters (e.g. `"AB"`) to a 0-based column index.
///
/// Returns `None` for an empty string, non-letters, or an index that overflows `usize`.
/// Lowercase letters are accepted.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut num: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        num = num.checked_mul(26)?.checked_add(digit)?;
    }
    Some(num - 1)
}

/// Convert a 0-based column index to its letters (e.g. `27` → `"AB"`).
pub fn column_letters(index: usize) -> String {
    let mut out = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    out.iter().rev().collect()
}

/// Split a cell reference such as `"AB12"` into `(column_index, row_number)`.
///
/// The row number is 1-based as written, and `None` when the rest of the reference is not a row
/// number (`"AB"`, `"B1x"`). Returns `None` when there is no leading column-letter prefix.
pub fn split_reference(reference: &str) -> Option<(usize, Option<u32>)> {
    let reference = reference.trim();
    let split = reference
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(reference.len());
    let (letters, digits) = reference.split_at(split);
    let col = column_index(letters)?;
    Some((col, digits.parse::<u32>().ok()))
}

/// Build an A1 reference from a 0-based column and a 1-based row (e.g. `(2, 7)` → `"C7"`).
pub fn reference(col: usize, row: u32) -> String {
    format!("{}{row}", column_letters(col))
}
