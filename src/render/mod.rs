//! Render engine for the timer display.
//!
//! Turns a time string into an RGBA bitmap with transparent background.
//! Digits share one fixed cell width, so the bitmap size only depends on
//! the font size and the shape of the string (`MM:SS` always yields the
//! same dimensions and the window does not jitter while counting down).

mod error;
mod font;

pub use error::{FontLoadError, RenderError};
pub use font::{builtin_font, load_font_file, FontCache};

use std::path::PathBuf;

use ab_glyph::{point, Font, FontArc, ScaleFont};
use eframe::egui;
use image::{Rgba, RgbaImage};

use crate::settings::Color;

/// Transparent margin around the text, relative to the font size.
const PADDING_RATIO: f32 = 0.1;

/// Formats seconds as `MM:SS`, with at least two minute digits.
pub fn format_time(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// FontSpec / Frame
// ============================================================================

/// Font selection for a render call.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Custom font file; `None` uses the built-in font
    pub path: Option<PathBuf>,
    /// Size in pixels
    pub size: f32,
}

impl FontSpec {
    pub fn new(path: Option<PathBuf>, size: f32) -> Self {
        Self { path, size }
    }
}

/// A rendered bitmap with straight (unmultiplied) alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RgbaImage,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns true if no pixel is visible.
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }

    /// Raw RGBA bytes, row by row.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Converts the frame for upload as an egui texture.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.as_raw(),
        )
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Renders timer text, caching fonts between calls.
#[derive(Default)]
pub struct Renderer {
    fonts: FontCache,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `text` with the given font and color.
    ///
    /// A custom font that cannot be loaded is replaced by the built-in font;
    /// the failure is logged once per path.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::EmptyText` for empty input and
    /// `RenderError::NoFont` if not even the built-in font is usable.
    pub fn render(
        &mut self,
        text: &str,
        font: &FontSpec,
        color: Color,
    ) -> Result<Frame, RenderError> {
        if text.is_empty() {
            return Err(RenderError::EmptyText);
        }
        let resolved = self
            .fonts
            .resolve(font.path.as_deref())
            .ok_or(RenderError::NoFont)?;
        render_text(&resolved, text, font.size, color)
    }

    /// Font cache used by this renderer.
    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }
}

/// Renders `text` with an already loaded font.
///
/// # Errors
///
/// Returns `RenderError::EmptyText` for empty input.
pub fn render_text(
    font: &FontArc,
    text: &str,
    size: f32,
    color: Color,
) -> Result<Frame, RenderError> {
    if text.is_empty() {
        return Err(RenderError::EmptyText);
    }

    let scaled = font.as_scaled(size);
    let digit_cell = ('0'..='9')
        .map(|c| scaled.h_advance(scaled.glyph_id(c)))
        .fold(0.0_f32, f32::max);
    let cell_width = |c: char| {
        if c.is_ascii_digit() {
            digit_cell
        } else {
            scaled.h_advance(scaled.glyph_id(c))
        }
    };

    let padding = (size * PADDING_RATIO).ceil().max(2.0);
    let text_width: f32 = text.chars().map(cell_width).sum();
    let text_height = scaled.ascent() - scaled.descent();
    let width = (text_width + 2.0 * padding).ceil().max(1.0) as u32;
    let height = (text_height + 2.0 * padding).ceil().max(1.0) as u32;

    let mut image = RgbaImage::new(width, height);
    let [r, g, b] = color.to_array();
    let baseline = padding + scaled.ascent();
    let mut caret_x = padding;

    for c in text.chars() {
        let cell = cell_width(c);
        let mut glyph = scaled.scaled_glyph(c);
        let advance = scaled.h_advance(glyph.id);
        glyph.position = point(caret_x + (cell - advance) / 2.0, baseline);
        caret_x += cell;

        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|x, y, coverage| {
            let px = x as i32 + bounds.min.x as i32;
            let py = y as i32 + bounds.min.y as i32;
            if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                return;
            }
            let alpha = (coverage * 255.0).round().clamp(0.0, 255.0) as u8;
            let pixel = image.get_pixel_mut(px as u32, py as u32);
            if alpha > pixel.0[3] {
                *pixel = Rgba([r, g, b, alpha]);
            }
        });
    }

    Ok(Frame { image })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::rgb(255, 255, 255);

    fn font_spec(size: f32) -> FontSpec {
        FontSpec::new(None, size)
    }

    // ------------------------------------------------------------------------
    // format_time Tests
    // ------------------------------------------------------------------------

    mod format_time_tests {
        use super::*;

        #[test]
        fn test_format_time() {
            assert_eq!(format_time(0), "00:00");
            assert_eq!(format_time(59), "00:59");
            assert_eq!(format_time(60), "01:00");
            assert_eq!(format_time(25 * 60), "25:00");
            assert_eq!(format_time(1500 - 1), "24:59");
        }

        #[test]
        fn test_format_time_over_an_hour() {
            assert_eq!(format_time(90 * 60 + 5), "90:05");
            assert_eq!(format_time(1440 * 60), "1440:00");
        }
    }

    // ------------------------------------------------------------------------
    // Renderer Tests
    // ------------------------------------------------------------------------

    mod renderer_tests {
        use super::*;

        #[test]
        fn test_render_produces_visible_pixels() {
            let mut renderer = Renderer::new();
            let frame = renderer.render("25:00", &font_spec(48.0), WHITE).unwrap();

            assert!(frame.width() > 0);
            assert!(frame.height() > 0);
            assert!(!frame.is_blank());
            assert_eq!(
                frame.as_raw().len(),
                (frame.width() * frame.height() * 4) as usize
            );
        }

        #[test]
        fn test_render_uses_requested_color() {
            let mut renderer = Renderer::new();
            let color = Color::rgb(0x4C, 0xAF, 0x50);
            let frame = renderer.render("05:00", &font_spec(32.0), color).unwrap();

            let visible: Vec<_> = frame.image().pixels().filter(|p| p.0[3] > 0).collect();
            assert!(!visible.is_empty());
            assert!(visible.iter().all(|p| p.0[..3] == [0x4C, 0xAF, 0x50]));
        }

        #[test]
        fn test_render_is_deterministic() {
            let mut first = Renderer::new();
            let mut second = Renderer::new();

            let a = first.render("12:34", &font_spec(40.0), WHITE).unwrap();
            let b = second.render("12:34", &font_spec(40.0), WHITE).unwrap();
            let c = first.render("12:34", &font_spec(40.0), WHITE).unwrap();

            assert_eq!(a, b);
            assert_eq!(a, c);
        }

        #[test]
        fn test_dimensions_do_not_depend_on_digits() {
            let mut renderer = Renderer::new();
            let sizes: Vec<_> = ["00:00", "11:11", "25:00", "59:59", "08:17"]
                .iter()
                .map(|text| {
                    let frame = renderer.render(text, &font_spec(64.0), WHITE).unwrap();
                    (frame.width(), frame.height())
                })
                .collect();

            assert!(sizes.windows(2).all(|w| w[0] == w[1]), "{sizes:?}");
        }

        #[test]
        fn test_larger_font_gives_larger_frame() {
            let mut renderer = Renderer::new();
            let small = renderer.render("25:00", &font_spec(24.0), WHITE).unwrap();
            let large = renderer.render("25:00", &font_spec(96.0), WHITE).unwrap();

            assert!(large.width() > small.width());
            assert!(large.height() > small.height());
        }

        #[test]
        fn test_missing_font_falls_back() {
            let mut renderer = Renderer::new();
            let missing = FontSpec::new(Some(PathBuf::from("/nonexistent/dseg7.ttf")), 48.0);

            let fallback = renderer.render("25:00", &missing, WHITE).unwrap();
            let builtin = renderer.render("25:00", &font_spec(48.0), WHITE).unwrap();
            renderer.render("24:59", &missing, WHITE).unwrap();

            assert!(!fallback.is_blank());
            assert_eq!(fallback, builtin);
            assert_eq!(renderer.fonts().attempted_paths(), 1);
        }

        #[test]
        fn test_empty_text_is_rejected() {
            let mut renderer = Renderer::new();
            let err = renderer.render("", &font_spec(48.0), WHITE).unwrap_err();
            assert!(matches!(err, RenderError::EmptyText));
        }

        #[test]
        fn test_color_image_matches_frame() {
            let mut renderer = Renderer::new();
            let frame = renderer.render("00:00", &font_spec(20.0), WHITE).unwrap();
            let image = frame.to_color_image();

            assert_eq!(
                image.size,
                [frame.width() as usize, frame.height() as usize]
            );
        }
    }
}
