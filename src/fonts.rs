//! Typefaces used for the card text.
//!
//! A TrueType face is preferred. When it cannot be loaded the card is still
//! produced with the built-in 5x7 bitmap glyphs so a missing font never aborts
//! a render.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::{debug, warn};

use crate::error::CardError;
use crate::graphics::glyphs;

pub const DEFAULT_FONT_PATH: &str = "Arial Rounded MT Bold.ttf";
pub const LARGE_SIZE: f32 = 36.0;
pub const MEDIUM_SIZE: f32 = 28.0;

pub enum Typeface {
    Outline(FontVec),
    Builtin,
}

impl Typeface {
    pub fn load(path: &Path) -> Result<Self, CardError> {
        let data = fs::read(path).map_err(|source| CardError::FontIo {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|_| CardError::InvalidFont {
            path: path.to_path_buf(),
        })?;
        debug!("loaded font {}", path.display());
        Ok(Typeface::Outline(font))
    }

    /// Load `path`, falling back to the built-in glyphs on any failure.
    pub fn load_or_builtin(path: &Path) -> Self {
        match Self::load(path) {
            Ok(face) => face,
            Err(err) => {
                warn!("{err}");
                warn!("Error loading specified font. Using default font.");
                Typeface::Builtin
            }
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw(
        &self,
        image: &mut RgbaImage,
        x: i32,
        y: i32,
        size: f32,
        color: Rgba<u8>,
        text: &str,
    ) {
        match self {
            Typeface::Outline(font) => {
                draw_text_mut(image, color, x, y, PxScale::from(size), font, text)
            }
            Typeface::Builtin => {
                glyphs::draw_text(image, x, y, builtin_scale(size), color, text)
            }
        }
    }

    /// Width and height in pixels of `text` rendered at `size`.
    pub fn measure(&self, size: f32, text: &str) -> (u32, u32) {
        match self {
            Typeface::Outline(font) => text_size(PxScale::from(size), font, text),
            Typeface::Builtin => glyphs::text_size(builtin_scale(size), text),
        }
    }
}

/// Pixel multiplier for the bitmap glyphs so the cell lands near `size` px tall.
fn builtin_scale(size: f32) -> u32 {
    ((size / 9.0).round() as u32).max(1)
}

/// The face and the two sizes the card is drawn with.
pub struct CardFonts {
    pub typeface: Typeface,
    pub large: f32,
    pub medium: f32,
}

impl CardFonts {
    pub fn new(typeface: Typeface) -> Self {
        Self {
            typeface,
            large: LARGE_SIZE,
            medium: MEDIUM_SIZE,
        }
    }

    /// Resolve the card fonts from an optional override path.
    pub fn resolve(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_PATH));
        Self::new(Typeface::load_or_builtin(&path))
    }

    pub fn builtin() -> Self {
        Self::new(Typeface::Builtin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_scale_tracks_requested_size() {
        assert_eq!(builtin_scale(LARGE_SIZE), 4);
        assert_eq!(builtin_scale(MEDIUM_SIZE), 3);
        assert_eq!(builtin_scale(2.0), 1);
    }

    #[test]
    fn missing_font_falls_back_to_builtin() {
        let face = Typeface::load_or_builtin(Path::new("/nonexistent/font.ttf"));
        assert!(face.is_builtin());
    }

    #[test]
    fn garbage_font_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"definitely not a font").unwrap();
        let err = Typeface::load(&path).err().unwrap();
        assert!(matches!(err, CardError::InvalidFont { .. }));
    }

    const SYSTEM_FONTS: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    #[test]
    fn outline_face_measures_and_draws() {
        // Only runs where a common system font is installed.
        let Some(path) = SYSTEM_FONTS.iter().map(Path::new).find(|p| p.exists()) else {
            return;
        };
        let face = Typeface::load(path).unwrap();
        assert!(!face.is_builtin());

        let (short, height) = face.measure(MEDIUM_SIZE, "Name");
        let (long, _) = face.measure(MEDIUM_SIZE, "Name: Muhammad Danish");
        assert!(short > 0 && height > 0);
        assert!(long > short);

        let paper = Rgba([255, 255, 255, 255]);
        let mut image = RgbaImage::from_pixel(400, 60, paper);
        face.draw(&mut image, 10, 10, MEDIUM_SIZE, Rgba([0, 0, 0, 255]), "Name");
        let inked: Vec<u32> = (0..400)
            .filter(|&x| (0..60).any(|y| *image.get_pixel(x, y) != paper))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked[0] >= 10);
        assert!(*inked.last().unwrap() <= 10 + short + 2);
    }

    #[test]
    fn builtin_measure_is_monospaced() {
        let face = Typeface::Builtin;
        let (one, h) = face.measure(MEDIUM_SIZE, "A");
        let (three, _) = face.measure(MEDIUM_SIZE, "ABC");
        assert_eq!(h, 21);
        assert_eq!(one, 15);
        assert_eq!(three, 15 * 3 + 3 * 2);
    }
}
