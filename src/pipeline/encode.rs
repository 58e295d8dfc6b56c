//! Target encoding: serialise the drawing surface to PNG or JPEG bytes.
//!
//! PNG is lossless and carries the surface's alpha channel unchanged; the
//! quality setting is not applicable. JPEG is lossy: the request's (0, 1]
//! quality fraction maps onto the encoder's 1–100 scale. The JPEG path
//! expects an alpha-free surface — flattening happens in the render stage
//! before the surface reaches this one.

use crate::error::ImgConvError;
use crate::request::TargetFormat;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::debug;

/// Serialise the surface into the target format.
///
/// # Errors
/// [`ImgConvError::Encode`] when the platform encoder rejects the surface.
pub fn encode_surface(
    surface: &DynamicImage,
    target: TargetFormat,
    quality: f32,
) -> Result<Vec<u8>, ImgConvError> {
    let mut buf = Vec::new();
    match target {
        TargetFormat::Png => {
            surface
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
                .map_err(|e| ImgConvError::Encode {
                    format: target.to_string(),
                    detail: e.to_string(),
                })?;
        }
        TargetFormat::Jpg => {
            let mut cursor = Cursor::new(&mut buf);
            let encoder = JpegEncoder::new_with_quality(&mut cursor, jpeg_quality(quality));
            surface
                .write_with_encoder(encoder)
                .map_err(|e| ImgConvError::Encode {
                    format: target.to_string(),
                    detail: e.to_string(),
                })?;
        }
    }

    debug!("Encoded {} → {} bytes", target, buf.len());
    Ok(buf)
}

/// Map a (0, 1] quality fraction to the JPEG encoder's 1–100 scale.
fn jpeg_quality(fraction: f32) -> u8 {
    (fraction * 100.0).round().clamp(1.0, 100.0) as u8
}
