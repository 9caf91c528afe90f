//! Font loading with a built-in fallback.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, FontRef, FontVec};
use eframe::egui;
use tracing::{debug, warn};

use super::error::FontLoadError;

/// Loads a font file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_font_file(path: &Path) -> Result<FontArc, FontLoadError> {
    let bytes = std::fs::read(path).map_err(|source| FontLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    FontArc::try_from_vec(bytes).map_err(|source| FontLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The monospace font bundled with egui.
pub fn builtin_font() -> Option<FontArc> {
    let definitions = egui::FontDefinitions::default();
    let name = definitions
        .families
        .get(&egui::FontFamily::Monospace)?
        .first()?;
    let data = definitions.font_data.get(name)?.clone();
    match data.font {
        Cow::Borrowed(bytes) => FontRef::try_from_slice_and_index(bytes, data.index)
            .map(FontArc::from)
            .ok(),
        Cow::Owned(bytes) => FontVec::try_from_vec_and_index(bytes, data.index)
            .map(FontArc::from)
            .ok(),
    }
}

/// Fonts loaded so far, keyed by configured path.
///
/// Failed loads are cached as well, so a broken path is read and reported
/// once.
#[derive(Default)]
pub struct FontCache {
    custom: HashMap<PathBuf, Option<FontArc>>,
    builtin: Option<FontArc>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the font for `path`, or the built-in font if there is no
    /// path or it cannot be used.
    pub fn resolve(&mut self, path: Option<&Path>) -> Option<FontArc> {
        if let Some(path) = path {
            let entry = self.custom.entry(path.to_path_buf()).or_insert_with(|| {
                match load_font_file(path) {
                    Ok(font) => {
                        debug!(path = %path.display(), "Custom font loaded");
                        Some(font)
                    }
                    Err(e) => {
                        warn!("{}; falling back to the built-in font", e);
                        None
                    }
                }
            });
            if let Some(font) = entry {
                return Some(font.clone());
            }
        }
        self.builtin()
    }

    /// Number of distinct custom paths tried so far.
    pub fn attempted_paths(&self) -> usize {
        self.custom.len()
    }

    fn builtin(&mut self) -> Option<FontArc> {
        if self.builtin.is_none() {
            self.builtin = builtin_font();
        }
        self.builtin.clone()
    }
}
