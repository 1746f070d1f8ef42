use thiserror::Error;

/// Convenience result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error type returned by conversion functions.
///
/// Parsing itself never fails (see [`crate::parsing`]); every variant here comes from reading the
/// workbook container, writing the JSON document, or setting up a batch run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook container could not be opened or decoded.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// The document could not be rendered as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The batch worker pool could not be started.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The workbook has no usable worksheet (or the requested one is absent).
    #[error("missing worksheet: {message}")]
    MissingWorksheet { message: String },

    /// The path cannot be used (no file stem, non-UTF-8 directory, bad search pattern).
    #[error("invalid path: {message}")]
    InvalidPath { message: String },
}
