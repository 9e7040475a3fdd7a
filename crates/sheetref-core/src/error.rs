//! Error types for sheetref-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetref-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A1 text that could not be turned into an anchor or range
    #[error("Parse error in '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// A geometry query was made on a range whose corners lack the queried axis
    #[error("Precondition violated: {0}")]
    Precondition(String),
}

impl Error {
    /// Create a parse error for `input`
    pub fn parse<I: Into<String>, R: Into<String>>(input: I, reason: R) -> Self {
        Error::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Restate a parse error raised on a piece of `input` in terms of the whole
    pub(crate) fn within(self, input: &str, what: &str) -> Self {
        match self {
            Error::Parse { reason, .. } => Error::parse(input, format!("{}: {}", what, reason)),
            other => other,
        }
    }

    /// Log at debug level on the way out of a public entry point
    pub(crate) fn logged(self) -> Self {
        log::debug!("{self}");
        self
    }

    /// Create a precondition error with a message
    pub fn precondition<S: Into<String>>(msg: S) -> Self {
        Error::Precondition(msg.into())
    }
}
