/*!
 * Error types for the srtscan application.
 *
 * Line-level parse failures are modelled by `SubtitleError`. The parser
 * absorbs them (they are counted and logged, never returned from the
 * `parse_*` entry points); they only surface when the line-level helpers
 * are called directly. `AppError` is what the controller reports per file.
 */

use thiserror::Error;

/// Errors that can occur while classifying a single SRT line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// A `-->` line that does not split into exactly two parts
    #[error("Malformed time range: {0}")]
    MalformedTimeRange(String),

    /// A time-range operand that is not `HH:MM:SS,mmm`
    #[error("Unparseable time code: {0}")]
    UnparseableTimeCode(String),

    /// A digit-only line that does not fit into an index
    #[error("Invalid subtitle index: {0}")]
    InvalidIndex(String),
}

/// Errors reported when processing one subtitle file
#[derive(Error, Debug)]
pub enum AppError {
    /// Input file missing or not a regular file
    #[error("File error: {0}")]
    File(String),

    /// Reading or parsing the file failed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Parse(format!("{:#}", error))
    }
}
