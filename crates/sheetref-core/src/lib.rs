//! # sheetref-core
//!
//! A1-notation coordinates for spreadsheet ranges.
//!
//! This crate provides:
//! - [`Anchor`] - A row, a column, both or neither (e.g. "B2", "B", "2")
//! - [`SheetRange`] - A region on a named sheet (e.g. "Sheet1!B2:D10")
//! - [`column_to_letters`] / [`letters_to_column`] - The bijective base-26 column codec
//! - [`A1Format`] - Output options (title quoting, single-cell collapsing)
//! - [`ValueRange`] - Sparse values returned by a spreadsheet service for a range
//!
//! ## Example
//!
//! ```rust
//! use sheetref_core::{Anchor, SheetRange};
//!
//! let range = SheetRange::parse("'My Sheet'!B2").unwrap();
//! assert_eq!(range.sheet_title(), "My Sheet");
//! assert_eq!(range.second(), Anchor::cell(2, 2));
//!
//! // Both corners are always written back
//! assert_eq!(range.a1(), "My Sheet!B2:B2");
//!
//! // Counts are corner distances, not cell counts
//! assert_eq!(range.row_count().unwrap(), 0);
//! assert_eq!(range.row_span().unwrap(), 1);
//! ```

pub mod anchor;
pub mod error;
pub mod options;
pub mod range;
pub mod value_range;

pub use anchor::{column_to_letters, letters_to_column, Anchor};
pub use error::{Error, Result};
pub use options::{A1Format, QuoteStyle};
pub use range::SheetRange;
pub use value_range::{
    request_ranges, BatchGetResponse, MajorDimension, RawValueRange, ValueRange, MAX_DENSE_CELLS,
};
