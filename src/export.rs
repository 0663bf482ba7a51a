use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::CardError;

pub const DEFAULT_OUTPUT: &str = "PIAIC_ID_Card.png";

/// What was written by [`export_card`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
    pub sha256: String,
}

/// Write the card as an RGB PNG, creating the parent directory when missing.
pub fn export_card(image: &DynamicImage, path: &Path) -> Result<ExportSummary, CardError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    rgb.save_with_format(path, ImageFormat::Png)
        .map_err(|source| CardError::Export {
            path: path.to_path_buf(),
            source,
        })?;

    let written = fs::read(path)?;
    let digest = Sha256::digest(&written);
    let summary = ExportSummary {
        path: path.to_path_buf(),
        width: rgb.width(),
        height: rgb.height(),
        bytes: written.len() as u64,
        sha256: format!("{digest:x}"),
    };
    info!(
        "saved ID card to {} ({} bytes)",
        summary.path.display(),
        summary.bytes
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    #[test]
    fn export_writes_rgb_png_and_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("card.png");
        let card = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 4, Rgba([1, 2, 3, 255])));

        let summary = export_card(&card, &path).unwrap();
        assert_eq!((summary.width, summary.height), (8, 4));
        assert_eq!(summary.sha256.len(), 64);
        assert_eq!(summary.bytes, fs::metadata(&path).unwrap().len());

        let reloaded = image::open(&path).unwrap();
        assert!(matches!(reloaded, DynamicImage::ImageRgb8(_)));
        assert_eq!(reloaded.to_rgb8().get_pixel(7, 3).0, [1, 2, 3]);
    }

    #[test]
    fn same_card_gives_same_digest() {
        let dir = tempfile::tempdir().unwrap();
        let card = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 3, Rgba([9, 9, 9, 255])));
        let a = export_card(&card, &dir.path().join("a.png")).unwrap();
        let b = export_card(&card, &dir.path().join("b.png")).unwrap();
        assert_eq!(a.sha256, b.sha256);
    }
}
