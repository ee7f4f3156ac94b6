use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no table selector provided: pass a table id or a table class")]
    SelectorMissing,

    #[error("no table matching {selector} was found")]
    TableNotFound { selector: String },

    #[error("failed to fetch '{url}': HTTP status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("failed to fetch '{url}': {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("failed to parse page: {0}")]
    ParseFailed(String),

    #[error("data row {row} has {found} cell(s) but the table has {expected} header(s)")]
    RowColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl ScrapeError {
    /// HTTP status for fetch failures that got as far as a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::FetchStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
