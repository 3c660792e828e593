//! Crate error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::gapped::GapParseError;

/// Errors that can be returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A gapped pattern could not be tokenized; the whole pattern set is rejected.
    #[error("pattern {index}: {source}")]
    Parse {
        index: usize,
        #[source]
        source: GapParseError,
    },
    /// Reading an input file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
