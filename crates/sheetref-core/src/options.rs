//! A1 output options

/// How sheet titles are quoted when a range is written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Write the title exactly as stored
    #[default]
    Never,
    /// Quote titles that would not survive a parse unquoted
    WhenNeeded,
    /// Always wrap the title in single quotes
    Always,
}

impl QuoteStyle {
    /// Render `title` under this style, doubling embedded quotes when quoting
    pub fn apply(self, title: &str) -> String {
        let quote = match self {
            QuoteStyle::Never => false,
            QuoteStyle::WhenNeeded => title_needs_quotes(title),
            QuoteStyle::Always => true,
        };

        if quote {
            format!("'{}'", title.replace('\'', "''"))
        } else {
            title.to_string()
        }
    }
}

/// Whether a sheet title must be quoted to be read back unchanged
pub fn title_needs_quotes(title: &str) -> bool {
    match title.chars().next() {
        None => true,
        Some(first) if first.is_ascii_digit() => true,
        Some(_) => !title.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
    }
}

/// Options for writing ranges in A1 notation
///
/// The default reproduces [`SheetRange::a1`](crate::SheetRange::a1): titles
/// verbatim, both corners always written.
#[derive(Debug, Clone, Default)]
pub struct A1Format {
    /// Sheet title quoting
    pub quote_titles: QuoteStyle,
    /// Write `Sheet1!B2` instead of `Sheet1!B2:B2` when both corners are equal
    pub collapse_single_cell: bool,
}

impl A1Format {
    /// Output that always parses back to the same range
    pub fn lossless() -> Self {
        Self {
            quote_titles: QuoteStyle::WhenNeeded,
            collapse_single_cell: false,
        }
    }
}
