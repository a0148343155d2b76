use thiserror::Error;

/// A launch table that cannot back the dashboard.
///
/// Row numbers are zero-based data rows (header excluded).
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: launch site is empty")]
    EmptySite { row: usize },

    #[error("row {row}: payload mass {value} is not a non-negative number")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: class '{value}' is not 0 or 1")]
    InvalidOutcome { row: usize, value: String },
}
