//! Error types for the proxy-checker crate.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a run before or after the probing phase.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// Reading the input list or writing the output file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration was rejected by the builder.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CheckerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Error raised by a transport while fetching through a single proxy.
///
/// These never leave [`crate::probe::probe`]; they only decide the outcome.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("connection failed: {0}")]
    Connection(String),
}
