//! Fatal error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::purge::PurgeFailure;

/// Conditions that abort a run with exit code 1.
#[derive(Debug, Error)]
pub enum HelpgenError {
    /// The source tree root is missing or not a directory.
    #[error("root directory {} does not exist", .0.display())]
    RootNotFound(PathBuf),

    /// The command-line option definition header is missing.
    #[error("option definition file {} does not exist", .0.display())]
    OptionsFileNotFound(PathBuf),

    /// A configured file-name glob does not compile.
    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The purge pass found at least one defect.
    #[error(transparent)]
    Purge(#[from] PurgeFailure),
}

impl HelpgenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T, E = HelpgenError> = std::result::Result<T, E>;
