//! Ranges on a named sheet

use crate::anchor::Anchor;
use crate::error::{Error, Result};
use crate::options::A1Format;
use std::fmt;
use std::str::FromStr;

/// A region on a named sheet, bounded by two corner anchors (e.g. "Sheet1!B2:D10")
///
/// The corners are kept in the order they were given; nothing is normalized.
/// Minimum/maximum queries look at both corners on every call.
///
/// # Examples
/// ```
/// use sheetref_core::{Anchor, SheetRange};
///
/// let range = SheetRange::parse("Sheet1!B2:D10").unwrap();
/// assert_eq!(range.sheet_title(), "Sheet1");
/// assert_eq!(range.first(), Anchor::cell(2, 2));
/// assert_eq!(range.second(), Anchor::cell(10, 4));
/// assert_eq!(range.row_count().unwrap(), 8);
/// assert_eq!(range.a1(), "Sheet1!B2:D10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetRange {
    sheet_title: String,
    first: Anchor,
    second: Anchor,
}

/// The pieces of an A1 range string, before the anchor tokens are decoded
#[derive(Debug, PartialEq, Eq)]
struct RangeTokens<'a> {
    sheet_title: String,
    first: &'a str,
    second: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Row,
    Column,
}

impl Axis {
    fn of(self, anchor: &Anchor) -> Option<u32> {
        match self {
            Axis::Row => anchor.row,
            Axis::Column => anchor.column,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

impl SheetRange {
    /// Create a range from its parts
    ///
    /// A missing second corner becomes a copy of the first.
    pub fn new<S: Into<String>>(sheet_title: S, first: Anchor, second: Option<Anchor>) -> Self {
        Self {
            sheet_title: sheet_title.into(),
            first,
            second: second.unwrap_or(first),
        }
    }

    /// Create a range whose corners are both `anchor`
    pub fn single<S: Into<String>>(sheet_title: S, anchor: Anchor) -> Self {
        Self::new(sheet_title, anchor, None)
    }

    /// Parse a range from A1 notation
    ///
    /// Accepts `Sheet1!B2:D10`, `'My Sheet'!B2:D10`, `Sheet1!B2`, `Sheet1!B2:`
    /// and `Sheet1!`. The sheet title is required. When the second corner is
    /// missing or empty it is a copy of the first.
    pub fn parse(input: &str) -> Result<Self> {
        let range = Self::parse_unlogged(input).map_err(Error::logged)?;
        log::trace!("parsed '{}' as {:?}", input, range);
        Ok(range)
    }

    fn parse_unlogged(input: &str) -> Result<Self> {
        let tokens = tokenize(input)?;
        let anchor = |token: &str| {
            Anchor::parse_token(token)
                .map_err(|e| e.within(input, &format!("invalid anchor '{}'", token)))
        };

        let first = anchor(tokens.first)?;
        let second = match tokens.second {
            Some(token) if !token.is_empty() => Some(anchor(token)?),
            _ => None,
        };

        Ok(Self::new(tokens.sheet_title, first, second))
    }

    /// The sheet title, without any quoting
    pub fn sheet_title(&self) -> &str {
        &self.sheet_title
    }

    /// The first corner
    pub fn first(&self) -> Anchor {
        self.first
    }

    /// The second corner
    pub fn second(&self) -> Anchor {
        self.second
    }

    /// Whether both corners have a row and a column
    pub fn is_bounded(&self) -> bool {
        self.first.is_cell() && self.second.is_cell()
    }

    fn bounds(&self, axis: Axis) -> Result<(u32, u32)> {
        match (axis.of(&self.first), axis.of(&self.second)) {
            (Some(a), Some(b)) => Ok((a.min(b), a.max(b))),
            _ => Err(Error::precondition(format!(
                "both corners of '{}' need a {}",
                self.a1(),
                axis
            ))),
        }
    }

    /// Smaller row of the two corners
    pub fn minimum_row(&self) -> Result<u32> {
        self.bounds(Axis::Row).map(|(min, _)| min)
    }

    /// Larger row of the two corners
    pub fn maximum_row(&self) -> Result<u32> {
        self.bounds(Axis::Row).map(|(_, max)| max)
    }

    /// Smaller column of the two corners
    pub fn minimum_column(&self) -> Result<u32> {
        self.bounds(Axis::Column).map(|(min, _)| min)
    }

    /// Larger column of the two corners
    pub fn maximum_column(&self) -> Result<u32> {
        self.bounds(Axis::Column).map(|(_, max)| max)
    }

    /// `maximum_row - minimum_row`
    ///
    /// This is the distance between the corners, not the number of rows
    /// covered: a single-cell range has a row count of 0. Use
    /// [`row_span`](Self::row_span) for the inclusive count.
    pub fn row_count(&self) -> Result<u32> {
        self.bounds(Axis::Row).map(|(min, max)| max - min)
    }

    /// `maximum_column - minimum_column`
    ///
    /// Not inclusive, see [`row_count`](Self::row_count).
    pub fn column_count(&self) -> Result<u32> {
        self.bounds(Axis::Column).map(|(min, max)| max - min)
    }

    /// Number of rows covered, counting both corners
    pub fn row_span(&self) -> Result<u64> {
        self.row_count().map(|count| u64::from(count) + 1)
    }

    /// Number of columns covered, counting both corners
    pub fn column_span(&self) -> Result<u64> {
        self.column_count().map(|count| u64::from(count) + 1)
    }

    /// Check if a cell lies within this range
    ///
    /// Anchors that are not a single cell are never contained.
    pub fn contains(&self, anchor: &Anchor) -> Result<bool> {
        let (min_row, max_row) = self.bounds(Axis::Row)?;
        let (min_col, max_col) = self.bounds(Axis::Column)?;

        Ok(match (anchor.row, anchor.column) {
            (Some(row), Some(column)) => {
                row >= min_row && row <= max_row && column >= min_col && column <= max_col
            }
            _ => false,
        })
    }

    /// Iterate over every cell in the range, row by row
    pub fn cells(&self) -> Result<impl Iterator<Item = Anchor>> {
        let (min_row, max_row) = self.bounds(Axis::Row)?;
        let (min_col, max_col) = self.bounds(Axis::Column)?;

        Ok((min_row..=max_row)
            .flat_map(move |row| (min_col..=max_col).map(move |column| Anchor::cell(row, column))))
    }

    /// Format as `<title>!<first>:<second>`
    ///
    /// Both corners are always written, so `Sheet1!B2` comes back as
    /// `Sheet1!B2:B2`. The title is written as stored.
    pub fn a1(&self) -> String {
        self.a1_with(&A1Format::default())
    }

    /// Format with the given options
    pub fn a1_with(&self, format: &A1Format) -> String {
        let title = format.quote_titles.apply(&self.sheet_title);

        if format.collapse_single_cell && self.first == self.second {
            format!("{}!{}", title, self.first)
        } else {
            format!("{}!{}:{}", title, self.first, self.second)
        }
    }
}

/// Split an A1 range string into its title and anchor tokens
fn tokenize(input: &str) -> Result<RangeTokens<'_>> {
    let (sheet_title, rest) = split_title(input)?;

    if sheet_title.is_empty() {
        return Err(Error::parse(input, "empty sheet title"));
    }

    let (first, second) = match rest.split_once(':') {
        Some((first, second)) => {
            if second.contains(':') {
                return Err(Error::parse(input, "more than two anchors"));
            }
            (first, Some(second))
        }
        None => (rest, None),
    };

    Ok(RangeTokens {
        sheet_title,
        first,
        second,
    })
}

/// Separate the sheet title from the text after `!`, unquoting if needed
fn split_title(input: &str) -> Result<(String, &str)> {
    let Some(quoted) = input.strip_prefix('\'') else {
        return match input.split_once('!') {
            Some((title, rest)) => Ok((title.to_string(), rest)),
            None => Err(Error::parse(input, "missing sheet title")),
        };
    };

    let mut title = String::new();
    let mut chars = quoted.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '\'' {
            title.push(c);
            continue;
        }

        // '' is an escaped quote
        if matches!(chars.peek(), Some((_, '\''))) {
            title.push('\'');
            chars.next();
            continue;
        }

        return match quoted[i + 1..].strip_prefix('!') {
            Some(rest) => Ok((title, rest)),
            None => Err(Error::parse(input, "expected '!' after quoted sheet title")),
        };
    }

    Err(Error::parse(input, "unterminated quoted sheet title"))
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.a1())
    }
}

impl FromStr for SheetRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::QuoteStyle;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Sheet1!B2:D10").unwrap(),
            RangeTokens {
                sheet_title: "Sheet1".into(),
                first: "B2",
                second: Some("D10"),
            }
        );
        assert_eq!(
            tokenize("'It''s'!A1").unwrap(),
            RangeTokens {
                sheet_title: "It's".into(),
                first: "A1",
                second: None,
            }
        );
        assert_eq!(
            tokenize("Sheet1!B2:").unwrap(),
            RangeTokens {
                sheet_title: "Sheet1".into(),
                first: "B2",
                second: Some(""),
            }
        );
    }

    #[test]
    fn test_range_parse() {
        let range = SheetRange::parse("Sheet1!B2:D10").unwrap();
        assert_eq!(range.sheet_title(), "Sheet1");
        assert_eq!(range.first(), Anchor::cell(2, 2));
        assert_eq!(range.second(), Anchor::cell(10, 4));
        assert_eq!(range.minimum_row().unwrap(), 2);
        assert_eq!(range.maximum_row().unwrap(), 10);
        assert_eq!(range.minimum_column().unwrap(), 2);
        assert_eq!(range.maximum_column().unwrap(), 4);
        assert_eq!(range.row_count().unwrap(), 8);
        assert_eq!(range.column_count().unwrap(), 2);
        assert_eq!(range.row_span().unwrap(), 9);
        assert_eq!(range.column_span().unwrap(), 3);
    }

    #[test]
    fn test_range_parse_single_cell() {
        let range = SheetRange::parse("Sheet1!B2").unwrap();
        assert_eq!(range.first(), range.second());
        assert_eq!(range.row_count().unwrap(), 0);
        assert_eq!(range.column_count().unwrap(), 0);
        assert_eq!(range.row_span().unwrap(), 1);
        assert_eq!(range.a1(), "Sheet1!B2:B2");

        // Trailing colon behaves the same
        assert_eq!(SheetRange::parse("Sheet1!B2:").unwrap(), range);
    }

    #[test]
    fn test_range_parse_open_forms() {
        let range = SheetRange::parse("Sheet1!").unwrap();
        assert_eq!(range.sheet_title(), "Sheet1");
        assert!(range.first().is_unanchored());
        assert!(range.second().is_unanchored());
        assert_eq!(range.a1(), "Sheet1!:");

        let range = SheetRange::parse("Data!A:C").unwrap();
        assert_eq!(range.first(), Anchor::column_only(1));
        assert_eq!(range.second(), Anchor::column_only(3));
        assert_eq!(range.minimum_column().unwrap(), 1);
        assert_eq!(range.column_count().unwrap(), 2);
        assert!(range.minimum_row().is_err());

        let range = SheetRange::parse("Data!2:5").unwrap();
        assert_eq!(range.first(), Anchor::row_only(2));
        assert_eq!(range.row_count().unwrap(), 3);
        assert!(range.maximum_column().is_err());
    }

    #[test]
    fn test_range_parse_reversed_corners() {
        let range = SheetRange::parse("Sheet1!D10:B2").unwrap();
        assert_eq!(range.first(), Anchor::cell(10, 4));
        assert_eq!(range.minimum_row().unwrap(), 2);
        assert_eq!(range.maximum_column().unwrap(), 4);
        assert_eq!(range.a1(), "Sheet1!D10:B2");
    }

    #[test]
    fn test_range_parse_quoted_titles() {
        let range = SheetRange::parse("'My Sheet'!A1:A1").unwrap();
        assert_eq!(range.sheet_title(), "My Sheet");

        let range = SheetRange::parse("'Bob''s Data'!A1:B2").unwrap();
        assert_eq!(range.sheet_title(), "Bob's Data");

        let range = SheetRange::parse("'Q1!Q2'!C3").unwrap();
        assert_eq!(range.sheet_title(), "Q1!Q2");
        assert_eq!(range.first(), Anchor::cell(3, 3));

        let range = SheetRange::parse("'Sheet:1'!a1:b2").unwrap();
        assert_eq!(range.sheet_title(), "Sheet:1");
        assert_eq!(range.second(), Anchor::cell(2, 2));
    }

    #[test]
    fn test_range_parse_errors() {
        for input in [
            "",
            "B2:D10",
            "!B2:D10",
            "''!A1",
            "'My Sheet!A1",
            "'My Sheet'A1",
            "Sheet1!2B",
            "Sheet1!B2:D10B",
            "Sheet1!B2:C3:D4",
            "Sheet1!$B$2",
        ] {
            let err = SheetRange::parse(input).unwrap_err();
            assert!(matches!(err, Error::Parse { .. }), "{input}");
        }
    }

    #[test]
    fn test_range_parse_error_keeps_anchor_reason() {
        let err = SheetRange::parse("Sheet1!A1:A99999999999").unwrap_err();
        assert_eq!(
            err,
            Error::Parse {
                input: "Sheet1!A1:A99999999999".into(),
                reason: "invalid anchor 'A99999999999': row '99999999999' out of range".into(),
            }
        );

        let err = SheetRange::parse("Sheet1!ZZZZZZZZ1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error in 'Sheet1!ZZZZZZZZ1': invalid anchor 'ZZZZZZZZ1': \
             column 'ZZZZZZZZ': column letters out of range"
        );
    }

    #[test]
    fn test_new_defaults_second_corner() {
        let anchor = Anchor::cell(3, 5);
        let range = SheetRange::new("Sheet1", anchor, None);
        assert_eq!(range.second(), anchor);
        assert_eq!(SheetRange::single("Sheet1", anchor), range);

        let range = SheetRange::new("Sheet1", anchor, Some(Anchor::cell(7, 6)));
        assert_eq!(range.a1(), "Sheet1!E3:F7");
    }

    #[test]
    fn test_precondition_errors() {
        let range = SheetRange::new("Sheet1", Anchor::cell(2, 2), Some(Anchor::column_only(4)));
        assert_eq!(range.minimum_column().unwrap(), 2);
        let err = range.maximum_row().unwrap_err();
        assert_eq!(
            err,
            Error::Precondition("both corners of 'Sheet1!B2:D' need a row".into())
        );
        assert!(range.row_count().is_err());
        assert!(range.contains(&Anchor::cell(2, 2)).is_err());
        assert!(range.cells().is_err());
        assert!(!range.is_bounded());
    }

    #[test]
    fn test_contains() {
        let range = SheetRange::parse("Sheet1!B2:D4").unwrap();
        assert!(range.contains(&Anchor::cell(2, 2)).unwrap());
        assert!(range.contains(&Anchor::cell(4, 4)).unwrap());
        assert!(range.contains(&Anchor::cell(3, 3)).unwrap());
        assert!(!range.contains(&Anchor::cell(1, 1)).unwrap());
        assert!(!range.contains(&Anchor::cell(5, 2)).unwrap());
        assert!(!range.contains(&Anchor::row_only(3)).unwrap());
    }

    #[test]
    fn test_cells() {
        let range = SheetRange::parse("Sheet1!A1:B2").unwrap();
        let cells: Vec<_> = range.cells().unwrap().map(|a| a.a1()).collect();
        assert_eq!(cells, vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_a1_with_options() {
        let range = SheetRange::parse("'My Sheet'!B2").unwrap();
        assert_eq!(range.a1(), "My Sheet!B2:B2");

        let format = A1Format {
            quote_titles: QuoteStyle::WhenNeeded,
            collapse_single_cell: true,
        };
        assert_eq!(range.a1_with(&format), "'My Sheet'!B2");
        assert_eq!(range.a1_with(&A1Format::lossless()), "'My Sheet'!B2:B2");

        let range = SheetRange::parse("Sheet1!B2:C3").unwrap();
        assert_eq!(range.a1_with(&format), "Sheet1!B2:C3");
    }

    #[test]
    fn test_display_and_from_str() {
        let range: SheetRange = "Sheet1!c3:a1".parse().unwrap();
        assert_eq!(range.to_string(), "Sheet1!C3:A1");
    }

    proptest! {
        #[test]
        fn range_roundtrips(
            title in "[A-Za-z][A-Za-z0-9 _']{0,12}",
            r1 in 1u32..1_048_577, c1 in 1u32..18_279,
            r2 in 1u32..1_048_577, c2 in 1u32..18_279
        ) {
            let range = SheetRange::new(title, Anchor::cell(r1, c1), Some(Anchor::cell(r2, c2)));
            let text = range.a1_with(&A1Format::lossless());
            prop_assert_eq!(SheetRange::parse(&text).unwrap(), range);
        }

        #[test]
        fn plain_titles_roundtrip_unquoted(
            title in "[A-Za-z_][A-Za-z0-9_]{0,12}",
            r in 1u32..1000, c in 1u32..1000
        ) {
            let range = SheetRange::single(title, Anchor::cell(r, c));
            prop_assert_eq!(SheetRange::parse(&range.a1()).unwrap(), range);
        }
    }
}
