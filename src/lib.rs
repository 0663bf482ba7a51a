//! Core library for composing a student ID card image.

mod details;
mod error;
mod export;
mod fonts;
mod graphics;
mod preview;

pub use details::CardDetails;
pub use error::{AssetKind, CardError};
pub use export::{DEFAULT_OUTPUT, ExportSummary, export_card};
pub use fonts::{CardFonts, DEFAULT_FONT_PATH, LARGE_SIZE, MEDIUM_SIZE, Typeface};
pub use graphics::{
    CARD_HEIGHT, CARD_WIDTH, CardRenderOptions, DEFAULT_WATERMARK_OPACITY, blend_mut,
    draw_rounded_outline_mut, load_asset, qr_code_image, render_id_card,
};
pub use preview::{DEFAULT_COLUMNS, PreviewStyle, render_preview};

use std::path::Path;

/// Render `details` with the given options and write the card to `output`.
pub fn create_id_card(
    details: &CardDetails,
    options: &CardRenderOptions<'_>,
    output: &Path,
) -> Result<ExportSummary, CardError> {
    let card = render_id_card(details, options)?;
    export_card(&card, output)
}
