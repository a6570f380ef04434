use thiserror::Error;

/// Result type for dvhmetrics operations
pub type Result<T> = std::result::Result<T, DvhError>;

/// Error types for dvhmetrics operations
///
/// Missing structures, unparsable fields and absent table rows are not
/// errors: extraction queries return `None` for those and the metric
/// layer reports the affected metric as not computed. Only conditions
/// that make the whole analysis meaningless surface here.
#[derive(Error, Debug)]
pub enum DvhError {
    /// The report contains no non-blank lines
    #[error("report is empty")]
    EmptyReport,

    /// Fraction count outside the supported schedules (1, 3 or 5)
    #[error("invalid fraction count: {0} (expected 1, 3 or 5)")]
    InvalidFractionCount(u32),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
