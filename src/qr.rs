//! QR rendering for payment URIs
//!
//! The payee side displays a built URI as a scannable code. SmartVerse embeds
//! codes in its pages as PNG data URIs; raw PNG bytes are also exposed for
//! contexts that serve the image directly.

use image::Luma;
use qrcode::QrCode;

use crate::{Error, PaymentUri, Result};

/// Pixel edge length used when no size is requested
pub const DEFAULT_QR_SIZE: u32 = 256;

/// Render a payment URI as PNG bytes.
///
/// `size` is the minimum edge length in pixels. The quiet zone around the
/// code is always kept so scanners can lock on against busy page backgrounds.
pub fn render_png(uri: &PaymentUri, size: u32) -> Result<Vec<u8>> {
    let code = QrCode::new(uri.to_uri_string().as_bytes())
        .map_err(|e| Error::QrEncoding(e.to_string()))?;
    let bitmap = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(size, size)
        .build();

    let mut out = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut out);
    image::ImageEncoder::write_image(
        encoder,
        bitmap.as_raw(),
        bitmap.width(),
        bitmap.height(),
        image::ExtendedColorType::L8,
    )
    .map_err(|e| Error::QrEncoding(e.to_string()))?;

    Ok(out)
}

/// Render a payment URI as a PNG data URI for embedding in a page
pub fn render_data_uri(uri: &PaymentUri) -> Result<String> {
    use base64::{engine::general_purpose::STANDARD, Engine};

    let png = render_png(uri, DEFAULT_QR_SIZE)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}
