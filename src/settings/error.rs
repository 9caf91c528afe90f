//! Settings persistence error types.
//!
//! Loading never fails (bad values fall back to defaults), so these errors
//! only describe saving. A failed save leaves the previous file in place.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] std::io::Error),

    /// A filesystem operation failed.
    #[error("failed to write settings to {}: {source}", path.display())]
    Io {
        /// File or directory being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The temporary file could not replace the settings file.
    #[error("failed to replace settings file {}: {source}", path.display())]
    Persist {
        /// Target settings file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl SettingsError {
    /// Returns true if this error came from the filesystem.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Persist { .. })
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Serialize(_) => "Report this as a bug; the settings could not be encoded",
            Self::Io { .. } | Self::Persist { .. } => {
                "Check that the settings directory exists and is writable"
            }
        }
    }
}
