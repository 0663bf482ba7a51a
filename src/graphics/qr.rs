use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::CardError;

/// Pixels per QR module before the code is scaled onto the card.
pub const MODULE_PX: u32 = 10;

/// Encode `payload` as a black-on-white QR code with a quiet zone.
pub fn qr_code_image(payload: &str) -> Result<GrayImage, CardError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)?;
    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(MODULE_PX, MODULE_PX)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .build();
    Ok(image)
}
