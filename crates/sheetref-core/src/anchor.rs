//! Single-point references and the column letter codec

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Convert a 1-based column number to its letters (1 = A, 26 = Z, 27 = AA, etc.)
///
/// Column letters form a bijective base-26 system: there is no letter for
/// zero, so "Z" is followed by "AA" rather than "A0". `0` encodes to an empty
/// string.
///
/// # Examples
/// ```
/// use sheetref_core::column_to_letters;
///
/// assert_eq!(column_to_letters(1), "A");
/// assert_eq!(column_to_letters(27), "AA");
/// assert_eq!(column_to_letters(703), "AAA");
/// ```
pub fn column_to_letters(column: u32) -> String {
    let mut letters = Vec::new();
    let mut n = column;

    while n > 0 {
        let remainder = (n - 1) % 26;
        letters.push((b'A' + remainder as u8) as char);
        n = (n - remainder) / 26;
    }

    letters.iter().rev().collect()
}

/// Convert column letters to a 1-based column number (A = 1, Z = 26, AA = 27, etc.)
///
/// Letters are case-insensitive.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    decode_letters(letters).map_err(Error::logged)
}

fn decode_letters(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::parse(letters, "empty column letters"));
    }

    let mut column: u32 = 0;
    let mut place: u32 = 1;
    for (position, c) in letters.chars().rev().enumerate() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::parse(
                letters,
                format!("invalid column letter '{}'", c),
            ));
        }
        if position > 0 {
            place = place
                .checked_mul(26)
                .ok_or_else(|| Error::parse(letters, "column letters out of range"))?;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A' + 1) as u32;
        column = place
            .checked_mul(digit)
            .and_then(|v| column.checked_add(v))
            .ok_or_else(|| Error::parse(letters, "column letters out of range"))?;
    }

    Ok(column)
}

/// A single-point reference: a row, a column, both, or neither.
///
/// Rows and columns are 1-based. Either part may be absent, so an anchor can
/// mean "column B, any row" (`B`), "row 5, any column" (`5`), a single cell
/// (`B5`), or nothing at all (the unanchored reference, written as `""`).
///
/// No range validation happens here; values are stored as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    /// Row number (1-based), if anchored to a row
    pub row: Option<u32>,
    /// Column number (1-based, A = 1), if anchored to a column
    pub column: Option<u32>,
}

impl Anchor {
    /// Create an anchor from explicit, independently optional parts
    pub fn new(row: Option<u32>, column: Option<u32>) -> Self {
        Self { row, column }
    }

    /// Create an anchor pointing at a single cell
    pub fn cell(row: u32, column: u32) -> Self {
        Self::new(Some(row), Some(column))
    }

    /// Create an anchor for a whole row
    pub fn row_only(row: u32) -> Self {
        Self::new(Some(row), None)
    }

    /// Create an anchor for a whole column
    pub fn column_only(column: u32) -> Self {
        Self::new(None, Some(column))
    }

    /// The anchor with neither row nor column
    pub fn unanchored() -> Self {
        Self::default()
    }

    /// Whether both row and column are absent
    pub fn is_unanchored(&self) -> bool {
        self.row.is_none() && self.column.is_none()
    }

    /// Whether both row and column are present
    pub fn is_cell(&self) -> bool {
        self.row.is_some() && self.column.is_some()
    }

    /// Parse an anchor token of the form `<letters><digits>`, where either
    /// part may be missing.
    ///
    /// # Examples
    /// ```
    /// use sheetref_core::Anchor;
    ///
    /// let anchor = Anchor::parse("B2").unwrap();
    /// assert_eq!(anchor.row, Some(2));
    /// assert_eq!(anchor.column, Some(2));
    ///
    /// assert_eq!(Anchor::parse("B").unwrap(), Anchor::column_only(2));
    /// assert_eq!(Anchor::parse("2").unwrap(), Anchor::row_only(2));
    /// assert!(Anchor::parse("").unwrap().is_unanchored());
    /// assert!(Anchor::parse("2B").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self> {
        Self::parse_token(token).map_err(Error::logged)
    }

    /// Parse without logging, for callers that report the error themselves
    pub(crate) fn parse_token(token: &str) -> Result<Self> {
        let bytes = token.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        let letters = &token[..pos];

        let digits_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let digits = &token[digits_start..pos];

        if pos != bytes.len() {
            return Err(Error::parse(
                token,
                "expected column letters followed by row digits",
            ));
        }

        let column = if letters.is_empty() {
            None
        } else {
            Some(
                decode_letters(letters)
                    .map_err(|e| e.within(token, &format!("column '{}'", letters)))?,
            )
        };

        let row = if digits.is_empty() {
            None
        } else {
            Some(
                digits
                    .parse::<u32>()
                    .map_err(|_| Error::parse(token, format!("row '{}' out of range", digits)))?,
            )
        };

        Ok(Self { row, column })
    }

    /// Format as an A1 token (`""`, `"B"`, `"2"` or `"B2"`)
    pub fn a1(&self) -> String {
        match (self.column, self.row) {
            (None, None) => String::new(),
            (Some(column), None) => column_to_letters(column),
            (None, Some(row)) => row.to_string(),
            (Some(column), Some(row)) => format!("{}{}", column_to_letters(column), row),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.a1())
    }
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
