//! Error types for bubbletea-combobox.

use thiserror::Error;

/// Errors reported by the combobox component.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An `aria-autocomplete` value that is not `none`, `list`, `both` or `inline`.
    #[error("invalid autocomplete mode: {0:?}")]
    InvalidMode(String),

    /// An option id that does not refer to a currently visible option.
    #[error("no visible option with index {0}")]
    UnknownOption(usize),

    /// A fallible search source failed.
    #[error("search failed: {0}")]
    Search(String),
}

/// Result type for combobox operations.
pub type Result<T> = std::result::Result<T, Error>;
