//! Error types for the annotation pipeline and the enrichment client.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors: any of these terminates the run before an output file is written.
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// The path could not be opened, read, or written.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line did not match the expected schema.
    #[error("{}:{line}: {message}", .path.display())]
    MalformedInput {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// The temporary output could not be moved over the destination.
    #[error("could not replace {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The enrichment table could not be serialized.
    #[error("could not write table {}: {source}", .path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl AnnotateError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        AnnotateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: &Path, line: u64, message: impl Into<String>) -> Self {
        AnnotateError::MalformedInput {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// Check that a split line has exactly `expected` columns.
    pub(crate) fn check_columns(
        path: &Path,
        line: u64,
        found: usize,
        expected: usize,
    ) -> Result<()> {
        if found == expected {
            Ok(())
        } else {
            Err(Self::malformed(
                path,
                line,
                format!(
                    "expected {} tab-delimited columns, found {}",
                    expected, found
                ),
            ))
        }
    }
}

/// Per-identifier failures of the enrichment client. These are logged and skipped.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("could not build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("lookup of {id} failed: {source}")]
    Request {
        id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("lookup of {id} failed: {message}")]
    Unavailable { id: String, message: String },
}

pub type Result<T> = std::result::Result<T, AnnotateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_line() {
        let e = AnnotateError::malformed(Path::new("panel.bed"), 3, "bad start");
        assert_eq!(e.to_string(), "panel.bed:3: bad start");
    }

    #[test]
    fn test_check_columns() {
        let p = Path::new("x.bed");
        assert!(AnnotateError::check_columns(p, 1, 6, 6).is_ok());
        let e = AnnotateError::check_columns(p, 2, 5, 6).unwrap_err();
        assert_eq!(
            e.to_string(),
            "x.bed:2: expected 6 tab-delimited columns, found 5"
        );
    }
}
