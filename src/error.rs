use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the configuration helpers.
///
/// `LogDirUnusable` is the one condition the original treated as fatal; the
/// library reports it and leaves process termination to the binary boundary.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("log directory {} cannot be created: {source}", path.display())]
    LogDirUnusable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown severity level {0:?}")]
    InvalidLevel(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Facility(#[from] log::SetLoggerError),
}
