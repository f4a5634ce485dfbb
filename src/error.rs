use std::path::PathBuf;

use thiserror::Error;

/// Every way a pipeline call can fail. All of them are terminal for the
/// single invocation that raised them.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Could not parse input: {0}")]
    Parse(String),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Invalid range [{low}, {high}]: low must not exceed high")]
    InvalidRange { low: f64, high: f64 },

    #[error("Column '{column}': cannot interpret {value:?} as {expected}")]
    TypeCoercion {
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
