//! Sheet error types.
//!
//! These errors describe why one uploaded sheet could not be turned into an
//! evaluation record set. Each one is scoped to a single upload attempt: the
//! caller reports it and asks for another file. I/O failures (unreadable file,
//! unsupported extension) are reported separately through `anyhow`.

use thiserror::Error;

use crate::sheet::CellRef;

/// Errors that can occur while extracting metadata or loading records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// A fixed-position metadata cell did not hold a value of the expected type.
    #[error("malformed metadata in cell {cell} ({field}): {message}")]
    MalformedMetadata {
        cell: CellRef,
        field: &'static str,
        message: String,
    },

    /// One or more required data columns are absent. All of them are listed.
    #[error("missing required column(s): {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// No data rows were found below the header block.
    #[error("no evaluation rows found after skipping {header_rows} header row(s)")]
    EmptyInput { header_rows: usize },
}

impl SheetError {
    /// Returns `true` if the caller can recover by supplying another file.
    ///
    /// Every sheet error is scoped to one upload, so this holds for all variants.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SheetError::MalformedMetadata { .. }
            | SheetError::MissingColumns { .. }
            | SheetError::EmptyInput { .. } => true,
        }
    }

    /// The missing column labels, if this is a missing-column error.
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            SheetError::MissingColumns { columns } => Some(columns),
            _ => None,
        }
    }
}

/// A type alias for results that return [`SheetError`].
pub type SheetResult<T> = Result<T, SheetError>;
