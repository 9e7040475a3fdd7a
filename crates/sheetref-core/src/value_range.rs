//! Values read back from a spreadsheet service
//!
//! A batch read sends a list of A1 range strings and gets back, per range,
//! the range as the service understood it plus a sparse grid of values.
//! Trailing empty cells and rows are left out by the service, so every
//! lookup here treats a missing entry as an empty cell.

use crate::error::{Error, Result};
use crate::options::A1Format;
use crate::range::SheetRange;

/// Largest grid [`ValueRange::dense`] will build (the cell limit of a Google Sheets spreadsheet)
pub const MAX_DENSE_CELLS: u64 = 10_000_000;

/// Build the A1 strings for a batch read request
pub fn request_ranges<'a, I>(ranges: I, format: &A1Format) -> Vec<String>
where
    I: IntoIterator<Item = &'a SheetRange>,
{
    ranges.into_iter().map(|r| r.a1_with(format)).collect()
}

/// Whether the outer vector of `values` holds rows or columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MajorDimension {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "DIMENSION_UNSPECIFIED"))]
    Rows,
    Columns,
}

/// One entry of a batch read response, as sent over the wire
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RawValueRange<T> {
    /// The range echoed back by the service
    pub range: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub major_dimension: MajorDimension,
    /// Omitted entirely by the service when the range is empty
    #[cfg_attr(feature = "serde", serde(default = "Vec::new"))]
    pub values: Vec<Vec<T>>,
}

impl<T> RawValueRange<T> {
    /// Parse the echoed range
    pub fn parse(self) -> Result<ValueRange<T>> {
        let range = SheetRange::parse(&self.range)?;
        Ok(ValueRange::new(range, self.major_dimension, self.values))
    }
}

/// A batch read response
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BatchGetResponse<T> {
    #[cfg_attr(feature = "serde", serde(default))]
    pub spreadsheet_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default = "Vec::new"))]
    pub value_ranges: Vec<RawValueRange<T>>,
}

impl<T> BatchGetResponse<T> {
    /// Parse every echoed range, failing on the first malformed one
    pub fn into_value_ranges(self) -> Result<Vec<ValueRange<T>>> {
        self.value_ranges
            .into_iter()
            .map(RawValueRange::parse)
            .collect()
    }
}

/// A range together with the (sparse) values read from it
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRange<T> {
    range: SheetRange,
    major_dimension: MajorDimension,
    values: Vec<Vec<T>>,
}

impl<T> ValueRange<T> {
    /// Create a value range from an already parsed range
    pub fn new(range: SheetRange, major_dimension: MajorDimension, values: Vec<Vec<T>>) -> Self {
        Self {
            range,
            major_dimension,
            values,
        }
    }

    /// Create a row-major value range from the range string echoed by the service
    pub fn from_echo(echo: &str, values: Vec<Vec<T>>) -> Result<Self> {
        Ok(Self::new(
            SheetRange::parse(echo)?,
            MajorDimension::Rows,
            values,
        ))
    }

    /// The parsed range
    pub fn range(&self) -> &SheetRange {
        &self.range
    }

    /// Layout of the raw values
    pub fn major_dimension(&self) -> MajorDimension {
        self.major_dimension
    }

    /// The values as sent, without padding
    pub fn raw_values(&self) -> &[Vec<T>] {
        &self.values
    }

    /// Split into the range and the raw values
    pub fn into_parts(self) -> (SheetRange, Vec<Vec<T>>) {
        (self.range, self.values)
    }

    /// Lower and upper limit of the data along one axis
    ///
    /// A corner without the axis leaves that side open: `B2:D` starts at
    /// row 2 and has no last row. With neither corner set the axis starts at 1.
    fn extent(first: Option<u32>, second: Option<u32>) -> (u32, Option<u32>) {
        match (first, second) {
            (Some(a), Some(b)) => (a.min(b), Some(a.max(b))),
            (Some(a), None) | (None, Some(a)) => (a, None),
            (None, None) => (1, None),
        }
    }

    /// Look up a value by sheet coordinates (1-based)
    ///
    /// Returns `None` outside the range and for cells the service left out.
    pub fn get(&self, row: u32, column: u32) -> Option<&T> {
        let (first, second) = (self.range.first(), self.range.second());
        let (top, bottom) = Self::extent(first.row, second.row);
        let (left, right) = Self::extent(first.column, second.column);

        if row < top || column < left {
            return None;
        }
        if bottom.map_or(false, |bottom| row > bottom)
            || right.map_or(false, |right| column > right)
        {
            return None;
        }

        let r = (row - top) as usize;
        let c = (column - left) as usize;
        match self.major_dimension {
            MajorDimension::Rows => self.values.get(r)?.get(c),
            MajorDimension::Columns => self.values.get(c)?.get(r),
        }
    }

    /// Row-major grid covering the whole range, with `None` for missing cells
    ///
    /// The range must be bounded on both axes and hold at most
    /// [`MAX_DENSE_CELLS`] cells.
    pub fn dense(&self) -> Result<Vec<Vec<Option<&T>>>> {
        let top = self.range.minimum_row()?;
        let left = self.range.minimum_column()?;
        let height = self.range.row_span()?;
        let width = self.range.column_span()?;

        let cells = height.saturating_mul(width);
        if cells > MAX_DENSE_CELLS {
            return Err(Error::precondition(format!(
                "'{}' covers {} cells, more than the {} a dense grid allows",
                self.range.a1(),
                cells,
                MAX_DENSE_CELLS
            )));
        }
        let height = to_len(height)?;
        let width = to_len(width)?;

        let mut grid = Vec::with_capacity(height);
        for r in 0..height {
            let row = (0..width)
                .map(|c| self.get(top + r as u32, left + c as u32))
                .collect();
            grid.push(row);
        }
        Ok(grid)
    }
}

fn to_len(span: u64) -> Result<usize> {
    usize::try_from(span)
        .map_err(|_| Error::precondition(format!("span of {} cells is too large", span)))
}
