use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading an AIS file or writing its derived output.
#[derive(Debug, Error)]
pub enum AisFileError {
    #[error("input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {reason}", .path.display())]
    InputParse {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("cannot draw {requested} days from a window of {available}")]
    TooFewDays { requested: usize, available: usize },
}
