//! Error types for pyhl

use thiserror::Error;

/// Result type alias for pyhl operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Errors raised at the configuration and I/O boundary.
///
/// Scanning itself never fails; these only come from loading themes,
/// reconfiguring styles or reading files.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Category index out of range: {0}")]
    CategoryOutOfRange(u8),

    #[error("Invalid scanner state: {0}")]
    InvalidState(u8),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid emphasis: {0}")]
    InvalidEmphasis(String),

    #[error("Theme parse error: {0}")]
    ThemeParse(#[from] toml::de::Error),

    #[error("{0}")]
    Message(String),
}
