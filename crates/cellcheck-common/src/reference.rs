//! A1-notation cell references.
//!
//! `CellReference` keeps the text the user typed next to the zero-based
//! coordinates decoded from it, so reports can echo the input verbatim.
//!
//! Column decoding looks at the first letter of the letter run only:
//! `"C7"` and `"CZ7"` both land in column 2. Rows are 1-based on input and
//! 0-based here; `"A0"` decodes to row `-1`, which no grid contains.

use core::fmt;
use std::str::FromStr;

use crate::error::A1ParseError;

/// A parsed `letters+digits` cell name together with its zero-based coordinates.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CellReference {
    original: String,
    column: i64,
    row: i64,
}

impl CellReference {
    /// Parse a cell reference such as `"C20"` or `"c20"`.
    pub fn parse(text: &str) -> Result<Self, A1ParseError> {
        parse_cell_reference(text)
    }

    /// The exact text this reference was parsed from.
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn column(&self) -> i64 {
        self.column
    }

    #[inline]
    pub fn row(&self) -> i64 {
        self.row
    }

    /// Re-stringify the coordinates as upper-case A1 notation.
    pub fn to_a1(&self) -> String {
        let letters = u32::try_from(self.column)
            .map(column_to_letters)
            .unwrap_or_default();
        format!("{letters}{}", self.row.saturating_add(1))
    }
}

/// Parse `text` as one-or-more ASCII letters followed by one-or-more ASCII digits.
pub fn parse_cell_reference(text: &str) -> Result<CellReference, A1ParseError> {
    let split = text
        .bytes()
        .position(|b| !b.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (letters, digits) = text.split_at(split);

    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(A1ParseError::invalid(text));
    }

    let column = letter_to_column(letters.as_bytes()[0]);
    let row_number: i64 = digits.parse().map_err(|_| A1ParseError::invalid(text))?;

    Ok(CellReference {
        original: text.to_string(),
        column,
        row: row_number - 1,
    })
}

/// Decode a single column letter (`A`/`a` = 0 … `Z`/`z` = 25).
#[inline]
fn letter_to_column(letter: u8) -> i64 {
    (letter.to_ascii_uppercase() - b'A') as i64
}

/// Convert a zero-based column index to letters (0 -> A, 25 -> Z, 26 -> AA).
pub fn column_to_letters(mut col: u32) -> String {
    let mut buf = Vec::new();
    loop {
        let rem = (col % 26) as u8;
        buf.push(b'A' + rem);
        col /= 26;
        if col == 0 {
            break;
        }
        col -= 1;
    }
    buf.reverse();
    String::from_utf8(buf).expect("only ASCII A-Z")
}

impl FromStr for CellReference {
    type Err = A1ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cell_reference(s)
    }
}

impl TryFrom<&str> for CellReference {
    type Error = A1ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_cell_reference(value)
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
