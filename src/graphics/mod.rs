//! Raster composition of the ID card.

pub(crate) mod glyphs;
mod paint;
mod qr;

pub use paint::{
    CARD_HEIGHT, CARD_WIDTH, CardRenderOptions, DEFAULT_WATERMARK_OPACITY, blend_mut,
    draw_rounded_outline_mut, load_asset, render_id_card,
};
pub use qr::qr_code_image;
