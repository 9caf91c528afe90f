//! Render error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing a timer frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Neither the configured font nor the built-in font could be used.
    #[error("no usable font available")]
    NoFont,

    /// Nothing to draw.
    #[error("cannot render empty text")]
    EmptyText,
}

impl RenderError {
    /// Returns true if keeping the previous frame is an adequate recovery.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyText)
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoFont => "Set Display.font_path to a readable TrueType or OpenType font",
            Self::EmptyText => "This is an internal error; the previous frame is kept",
        }
    }
}

/// Why a configured font file was not used.
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// The file could not be read.
    #[error("cannot read font file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a font ab_glyph understands.
    #[error("cannot parse font file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
}
