//! Source decoding: interpret the input bytes as a raster image.
//!
//! The decoder is selected by the *declared* media type, not by sniffing —
//! this is where a mislabeled or corrupt file is finally caught, since the
//! format guard trusts the label. WebP goes through the `image` crate's
//! built-in decoder; AVIF goes through `libavif-image`, which bundles the
//! AV1 codec and returns the same `DynamicImage` type.

use crate::error::ImgConvError;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

/// Decode source bytes according to their declared media type.
///
/// # Errors
/// [`ImgConvError::Decode`] when the bytes are not a valid image of the
/// declared format. Callers must run the format guard first; an unexpected
/// label here is an internal error, not a user-facing rejection.
pub fn decode_source(bytes: &[u8], media_type: &str) -> Result<DynamicImage, ImgConvError> {
    let decoded = match media_type {
        "image/webp" => image::load_from_memory_with_format(bytes, ImageFormat::WebP)
            .map_err(|e| ImgConvError::Decode {
                detail: format!("webp: {e}"),
            })?,
        "image/avif" => libavif_image::read(bytes).map_err(|e| ImgConvError::Decode {
            detail: format!("avif: {e:?}"),
        })?,
        other => {
            return Err(ImgConvError::Internal(format!(
                "decode called with unguarded media type '{other}'"
            )))
        }
    };

    debug!(
        "Decoded {} → {}x{} px",
        media_type,
        decoded.width(),
        decoded.height()
    );

    Ok(decoded)
}
