//! Terminal preview of a rendered card.

use std::fmt::{self, Write};

use image::imageops::FilterType;
use image::{DynamicImage, Rgb};

pub const DEFAULT_COLUMNS: u32 = 100;
const MIN_COLUMNS: u32 = 8;
const MAX_COLUMNS: u32 = 400;
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStyle {
    /// 24-bit ANSI colour, two pixel rows per text row.
    Truecolor,
    /// Luminance ramp for terminals without colour.
    Ascii,
}

impl fmt::Display for PreviewStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewStyle::Truecolor => write!(f, "truecolor"),
            PreviewStyle::Ascii => write!(f, "ascii"),
        }
    }
}

/// Render `image` as text `columns` characters wide.
pub fn render_preview(image: &DynamicImage, columns: u32, style: PreviewStyle) -> String {
    let columns = columns.clamp(MIN_COLUMNS, MAX_COLUMNS);
    let (width, height) = (image.width().max(1), image.height().max(1));
    // Terminal cells are about twice as tall as wide.
    let rows = ((columns as f32 * height as f32 / width as f32) / 2.0)
        .round()
        .max(1.0) as u32;

    match style {
        PreviewStyle::Truecolor => {
            let small = image
                .resize_exact(columns, rows * 2, FilterType::Triangle)
                .to_rgb8();
            let mut out = String::new();
            for row in 0..rows {
                for col in 0..columns {
                    let upper = small.get_pixel(col, row * 2);
                    let lower = small.get_pixel(col, row * 2 + 1);
                    write!(
                        &mut out,
                        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}",
                        upper[0], upper[1], upper[2], lower[0], lower[1], lower[2]
                    )
                    .ok();
                }
                out.push_str("\x1b[0m\n");
            }
            out
        }
        PreviewStyle::Ascii => {
            let small = image
                .resize_exact(columns, rows, FilterType::Triangle)
                .to_rgb8();
            let mut out = String::with_capacity(((columns + 1) * rows) as usize);
            for row in 0..rows {
                for col in 0..columns {
                    out.push(ramp_char(small.get_pixel(col, row)));
                }
                out.push('\n');
            }
            out
        }
    }
}

/// Darker pixels map to denser characters.
fn ramp_char(pixel: &Rgb<u8>) -> char {
    let [r, g, b] = pixel.0;
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    let darkness = 1.0 - luma / 255.0;
    let idx = (darkness * (ASCII_RAMP.len() - 1) as f32).round() as usize;
    ASCII_RAMP[idx.min(ASCII_RAMP.len() - 1)] as char
}
