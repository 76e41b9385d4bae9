//! Error types for item tasks.

use std::path::PathBuf;

use thiserror::Error;

/// Structural failures that abort an entire import run.
///
/// Row-level problems are not errors at this level: they accumulate in the
/// per-file result and the run keeps going. An unreadable directory or
/// file, however, stops everything rather than silently skipping input and
/// misleading the operator about completeness.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("failed to read source directory {path:?}: {source}")]
    SourceDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {path:?}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?} as CSV: {source}")]
    ParseCsv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
