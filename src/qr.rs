//! QR code rendering for the kiosk.

use std::io::Cursor;

use base64::Engine;
use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::AppError;

/// Pixel size of one QR module.
const MODULE_PX: u32 = 10;

/// Encode `data` as a grayscale PNG QR code (error correction level M).
pub fn qr_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PX, MODULE_PX)
        .quiet_zone(true)
        .build();

    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}

/// Same PNG as [`qr_png`], base64-encoded for a `data:` URI.
pub fn qr_png_base64(data: &str) -> Result<String, AppError> {
    Ok(base64::engine::general_purpose::STANDARD.encode(qr_png(data)?))
}
