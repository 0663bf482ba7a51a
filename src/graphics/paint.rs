use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::details::CardDetails;
use crate::error::{AssetKind, CardError};
use crate::fonts::CardFonts;
use crate::graphics::qr::qr_code_image;

pub const CARD_WIDTH: u32 = 600;
pub const CARD_HEIGHT: u32 = 400;
pub const DEFAULT_WATERMARK_OPACITY: f32 = 0.1;

const BORDER_RADIUS: u32 = 20;
const BORDER_WIDTH: u32 = 5;
const BAR_HEIGHT: u32 = 50;
const TEXT_X: i32 = 40;
const TITLE_Y: i32 = 10;
const FIRST_LINE_Y: i32 = 70;
const LINE_STEP: i32 = 40;
const THUMB_SIZE: u32 = 120;
const PHOTO_ORIGIN: (i64, i64) = (400, 20);
const QR_ORIGIN: (i64, i64) = (400, 160);
const SIGNATURE_TEXT_OFFSET: i32 = 45;
const SIGNATURE_LINE_OFFSET: i32 = 30;
const SIGNATURE_LINE_INSET: i32 = 40;
const SIGNATURE_LINE_WIDTH: u32 = 2;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const SKY_BLUE: Rgba<u8> = Rgba([135, 206, 235, 255]);

/// Inputs for a single card render besides the holder details.
pub struct CardRenderOptions<'a> {
    pub fonts: &'a CardFonts,
    pub photo: Option<&'a DynamicImage>,
    pub watermark: Option<&'a DynamicImage>,
    pub watermark_opacity: f32,
}

impl<'a> CardRenderOptions<'a> {
    pub fn new(fonts: &'a CardFonts) -> Self {
        Self {
            fonts,
            photo: None,
            watermark: None,
            watermark_opacity: DEFAULT_WATERMARK_OPACITY,
        }
    }
}

/// Open a user-supplied image, tagging failures with what it was meant to be.
pub fn load_asset(path: &Path, kind: AssetKind) -> Result<DynamicImage, CardError> {
    let image = image::open(path).map_err(|source| CardError::Asset {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "loaded {kind} {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Compose the ID card: frame, bars, text, watermark, photo, QR code and signature.
pub fn render_id_card(
    details: &CardDetails,
    options: &CardRenderOptions<'_>,
) -> Result<DynamicImage, CardError> {
    let fonts = options.fonts;
    let mut card: RgbaImage = ImageBuffer::from_pixel(CARD_WIDTH, CARD_HEIGHT, WHITE);

    draw_rounded_outline_mut(
        &mut card,
        (0, 0),
        (CARD_WIDTH as i32, CARD_HEIGHT as i32),
        BORDER_RADIUS,
        BORDER_WIDTH,
        BLACK,
    );

    // Bars span the inclusive pixel range, hence the extra row.
    draw_filled_rect_mut(
        &mut card,
        Rect::at(0, 0).of_size(CARD_WIDTH, BAR_HEIGHT + 1),
        SKY_BLUE,
    );
    draw_filled_rect_mut(
        &mut card,
        Rect::at(0, (CARD_HEIGHT - BAR_HEIGHT) as i32).of_size(CARD_WIDTH, BAR_HEIGHT),
        SKY_BLUE,
    );

    fonts
        .typeface
        .draw(&mut card, TEXT_X, TITLE_Y, fonts.large, WHITE, &details.title);
    let lines = details.field_lines();
    for (idx, line) in lines.iter().enumerate() {
        let y = FIRST_LINE_Y + idx as i32 * LINE_STEP;
        fonts
            .typeface
            .draw(&mut card, TEXT_X, y, fonts.medium, BLACK, line);
    }
    debug!("drew header and {} detail lines", lines.len());

    if let Some(watermark) = options.watermark {
        let watermark = watermark
            .resize_exact(CARD_WIDTH, CARD_HEIGHT, FilterType::Lanczos3)
            .to_rgba8();
        blend_mut(&mut card, &watermark, options.watermark_opacity);
        debug!("blended watermark at opacity {}", options.watermark_opacity);
    }

    if let Some(photo) = options.photo {
        let thumb = photo
            .resize_exact(THUMB_SIZE, THUMB_SIZE, FilterType::CatmullRom)
            .to_rgba8();
        imageops::replace(&mut card, &thumb, PHOTO_ORIGIN.0, PHOTO_ORIGIN.1);
        debug!("pasted photo at {:?}", PHOTO_ORIGIN);
    }

    let qr = qr_code_image(&details.qr_payload())?;
    let qr = DynamicImage::ImageLuma8(qr)
        .resize_exact(THUMB_SIZE, THUMB_SIZE, FilterType::Nearest)
        .to_rgba8();
    imageops::replace(&mut card, &qr, QR_ORIGIN.0, QR_ORIGIN.1);
    debug!("pasted QR code at {:?}", QR_ORIGIN);

    let (text_width, _) = fonts.typeface.measure(fonts.medium, &details.signature);
    let signature_x = (CARD_WIDTH as i32 - text_width as i32) / 2;
    fonts.typeface.draw(
        &mut card,
        signature_x,
        CARD_HEIGHT as i32 - SIGNATURE_TEXT_OFFSET,
        fonts.medium,
        BLACK,
        &details.signature,
    );
    let line_y = CARD_HEIGHT as i32 - SIGNATURE_LINE_OFFSET;
    let line_len = (CARD_WIDTH as i32 - 2 * SIGNATURE_LINE_INSET) as u32;
    draw_filled_rect_mut(
        &mut card,
        Rect::at(SIGNATURE_LINE_INSET, line_y - SIGNATURE_LINE_WIDTH as i32 / 2)
            .of_size(line_len + 1, SIGNATURE_LINE_WIDTH),
        BLACK,
    );

    Ok(DynamicImage::ImageRgba8(card))
}

/// Stroke the outline of a rounded rectangle spanning `top_left..=bottom_right`.
///
/// A pixel is painted when its centre lies inside the outer shape but not inside
/// the shape inset by `width`. Parts outside the canvas are clipped.
pub fn draw_rounded_outline_mut(
    image: &mut RgbaImage,
    top_left: (i32, i32),
    bottom_right: (i32, i32),
    radius: u32,
    width: u32,
    color: Rgba<u8>,
) {
    let outer = RoundedRect::new(top_left, bottom_right, radius as f32);
    let inner = outer.inset(width as f32);
    let (img_w, img_h) = image.dimensions();
    let x_end = (bottom_right.0 + 1).clamp(0, img_w as i32);
    let y_end = (bottom_right.1 + 1).clamp(0, img_h as i32);
    for y in top_left.1.max(0)..y_end {
        for x in top_left.0.max(0)..x_end {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if outer.contains(px, py) && !inner.contains(px, py) {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

struct RoundedRect {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    radius: f32,
}

impl RoundedRect {
    fn new(top_left: (i32, i32), bottom_right: (i32, i32), radius: f32) -> Self {
        let left = top_left.0 as f32;
        let top = top_left.1 as f32;
        let right = bottom_right.0 as f32 + 1.0;
        let bottom = bottom_right.1 as f32 + 1.0;
        let max_radius = ((right - left).min(bottom - top) / 2.0).max(0.0);
        Self {
            left,
            top,
            right,
            bottom,
            radius: radius.min(max_radius),
        }
    }

    fn inset(&self, by: f32) -> Self {
        Self {
            left: self.left + by,
            top: self.top + by,
            right: self.right - by,
            bottom: self.bottom - by,
            radius: (self.radius - by).max(0.0),
        }
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        if x < self.left || x > self.right || y < self.top || y > self.bottom {
            return false;
        }
        let cx = x.clamp(self.left + self.radius, self.right - self.radius);
        let cy = y.clamp(self.top + self.radius, self.bottom - self.radius);
        let (dx, dy) = (x - cx, y - cy);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Blend `overlay` over `base` at `opacity`, weighted by the overlay's own alpha.
/// Channels are truncated after mixing and `base` keeps its alpha channel.
/// A non-finite `opacity` falls back to [`DEFAULT_WATERMARK_OPACITY`].
pub fn blend_mut(base: &mut RgbaImage, overlay: &RgbaImage, opacity: f32) {
    let opacity = if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        DEFAULT_WATERMARK_OPACITY
    };
    if opacity == 0.0 {
        return;
    }
    for (x, y, pixel) in base.enumerate_pixels_mut() {
        if !overlay.in_bounds(x, y) {
            continue;
        }
        let top = overlay.get_pixel(x, y);
        let weight = opacity * top[3] as f32 / 255.0;
        for channel in 0..3 {
            let below = pixel[channel] as f32;
            let mixed = below + weight * (top[channel] as f32 - below);
            pixel[channel] = mixed.clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blend_mixes_opaque_overlay_linearly() {
        let mut base = RgbaImage::from_pixel(2, 2, WHITE);
        let overlay = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        blend_mut(&mut base, &overlay, 0.1);
        assert_eq!(*base.get_pixel(1, 1), Rgba([229, 229, 229, 255]));
    }

    #[test]
    fn blend_ignores_transparent_overlay_pixels() {
        let mut base = RgbaImage::from_pixel(1, 1, SKY_BLUE);
        let overlay = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        blend_mut(&mut base, &overlay, 0.5);
        assert_eq!(*base.get_pixel(0, 0), SKY_BLUE);
    }

    #[test]
    fn blend_clamps_opacity() {
        let mut base = RgbaImage::from_pixel(1, 1, WHITE);
        let overlay = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        blend_mut(&mut base, &overlay, 3.0);
        assert_eq!(*base.get_pixel(0, 0), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn blend_treats_nan_opacity_as_default() {
        let mut base = RgbaImage::from_pixel(1, 1, WHITE);
        let overlay = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        blend_mut(&mut base, &overlay, f32::NAN);
        assert_eq!(*base.get_pixel(0, 0), Rgba([229, 229, 229, 255]));

        let mut base = RgbaImage::from_pixel(1, 1, WHITE);
        blend_mut(&mut base, &overlay, f32::INFINITY);
        assert_eq!(*base.get_pixel(0, 0), Rgba([229, 229, 229, 255]));
    }

    #[test]
    fn nan_opacity_does_not_blacken_card() {
        let fonts = CardFonts::builtin();
        let watermark = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, WHITE));
        let mut options = CardRenderOptions::new(&fonts);
        options.watermark = Some(&watermark);
        options.watermark_opacity = f32::NAN;
        let card = render_id_card(&CardDetails::default(), &options)
            .unwrap()
            .to_rgba8();
        assert_eq!(*card.get_pixel(560, 300), WHITE);
    }

    #[test]
    fn text_lands_at_layout_origins() {
        let fonts = CardFonts::builtin();
        let options = CardRenderOptions::new(&fonts);
        let card = render_id_card(&CardDetails::default(), &options)
            .unwrap()
            .to_rgba8();

        // Title "PIAIC ID Card": top-left of 'P' is inked white on the header.
        assert_eq!(*card.get_pixel(40, 10), WHITE);
        assert_eq!(*card.get_pixel(39, 10), SKY_BLUE);

        // Every body line opens with a letter whose top-left cell is inked.
        for k in 0..6 {
            let y = (FIRST_LINE_Y + k * LINE_STEP) as u32;
            assert_eq!(*card.get_pixel(40, y), BLACK, "line {k}");
            assert_eq!(*card.get_pixel(39, y), WHITE, "line {k}");
            assert_eq!(*card.get_pixel(40, y - 1), WHITE, "line {k}");
        }

        // Signature ink, above the signature line, is centred on the card.
        let rows = (CARD_HEIGHT - SIGNATURE_TEXT_OFFSET as u32)..(CARD_HEIGHT - 31);
        let inked: Vec<u32> = (0..CARD_WIDTH)
            .filter(|&x| rows.clone().any(|y| *card.get_pixel(x, y) == BLACK))
            .collect();
        let (left, right) = (inked[0], inked[inked.len() - 1]);
        let (width, _) = fonts.typeface.measure(fonts.medium, "Authorized Signature");
        assert_eq!(left, (CARD_WIDTH - width) / 2);
        assert_eq!(right - left + 1, width);
        assert!(((left + right) as i32 - CARD_WIDTH as i32).abs() <= 2);
    }

    #[test]
    fn rounded_outline_leaves_corners_and_interior() {
        let mut image = RgbaImage::from_pixel(100, 60, WHITE);
        draw_rounded_outline_mut(&mut image, (0, 0), (99, 59), 20, 5, BLACK);
        // Corner pixel sits outside the arc.
        assert_eq!(*image.get_pixel(0, 0), WHITE);
        // Straight edges carry the stroke.
        assert_eq!(*image.get_pixel(50, 0), BLACK);
        assert_eq!(*image.get_pixel(50, 4), BLACK);
        assert_eq!(*image.get_pixel(50, 5), WHITE);
        assert_eq!(*image.get_pixel(0, 30), BLACK);
        assert_eq!(*image.get_pixel(99, 30), BLACK);
        assert_eq!(*image.get_pixel(50, 30), WHITE);
    }

    #[test]
    fn rounded_outline_clips_past_canvas() {
        let mut image = RgbaImage::from_pixel(40, 40, WHITE);
        draw_rounded_outline_mut(&mut image, (0, 0), (40, 40), 5, 5, BLACK);
        // Right stroke covers columns 36..=40, so only 36..=39 land on the canvas.
        assert_eq!(*image.get_pixel(39, 20), BLACK);
        assert_eq!(*image.get_pixel(36, 20), BLACK);
        assert_eq!(*image.get_pixel(35, 20), WHITE);
    }

    #[test]
    fn card_has_fixed_size_and_bars() {
        let fonts = CardFonts::builtin();
        let options = CardRenderOptions::new(&fonts);
        let card = render_id_card(&CardDetails::default(), &options)
            .unwrap()
            .to_rgba8();
        assert_eq!(card.dimensions(), (CARD_WIDTH, CARD_HEIGHT));
        assert_eq!(*card.get_pixel(500, 25), SKY_BLUE);
        assert_eq!(*card.get_pixel(500, 50), SKY_BLUE);
        assert_eq!(*card.get_pixel(500, 51), WHITE);
        // Left of the signature text, above the line.
        assert_eq!(*card.get_pixel(20, 360), SKY_BLUE);
        assert_eq!(*card.get_pixel(300, 370), BLACK);
        assert_eq!(*card.get_pixel(20, 370), SKY_BLUE);
    }

    #[test]
    fn photo_and_qr_land_in_their_slots() {
        let fonts = CardFonts::builtin();
        let photo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            37,
            53,
            Rgba([200, 10, 10, 255]),
        ));
        let mut options = CardRenderOptions::new(&fonts);
        options.photo = Some(&photo);
        let card = render_id_card(&CardDetails::default(), &options)
            .unwrap()
            .to_rgba8();
        assert_eq!(*card.get_pixel(400, 20), Rgba([200, 10, 10, 255]));
        assert_eq!(*card.get_pixel(519, 139), Rgba([200, 10, 10, 255]));
        assert_eq!(*card.get_pixel(520, 139), WHITE);
        // QR quiet zone is white, finder pattern is dark.
        assert_eq!(*card.get_pixel(401, 161), WHITE);
        let has_dark = (160..280).any(|y| (400..520).any(|x| card.get_pixel(x, y)[0] == 0));
        assert!(has_dark);
    }

    #[test]
    fn watermark_tints_the_card_but_keeps_signature() {
        let fonts = CardFonts::builtin();
        let watermark = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            60,
            40,
            Rgba([0, 0, 0, 255]),
        ));
        let mut options = CardRenderOptions::new(&fonts);
        options.watermark = Some(&watermark);
        let card = render_id_card(&CardDetails::default(), &options)
            .unwrap()
            .to_rgba8();
        assert_eq!(*card.get_pixel(560, 300), Rgba([229, 229, 229, 255]));
        assert_eq!(*card.get_pixel(300, 370), BLACK);
    }
}
