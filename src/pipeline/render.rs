//! Drawing surface: rasterise the decoded image and optionally flatten it.
//!
//! The surface is a fresh RGBA buffer sized exactly to the decoded image,
//! allocated per call and discarded after encoding — nothing is pooled or
//! reused. The decoded pixels are drawn at the origin, unscaled and
//! unmodified.
//!
//! ## Why flatten for JPEG?
//!
//! JPEG has no alpha channel. Naively dropping the channel would leave
//! formerly-transparent regions with whatever colour values the source
//! happened to store there (often black). Compositing opaque white *behind*
//! the drawn pixels reproduces what a browser canvas does with a
//! `destination-over` white fill: transparent areas come out white, partially
//! transparent pixels blend toward white.

use crate::error::ImgConvError;
use image::{imageops, DynamicImage, Rgb, RgbImage, RgbaImage};
use tracing::debug;

/// Longest edge the surface will accept. Decoded dimensions are trusted
/// otherwise, but a corrupt header claiming a multi-gigapixel image must not
/// turn into an allocation of that size.
const MAX_SURFACE_EDGE: u32 = 1 << 16;

/// Allocate a drawing surface matching the decoded image and draw the
/// decoded pixels onto it at the origin.
///
/// # Errors
/// [`ImgConvError::Render`] when a surface cannot be obtained: zero-sized
/// or implausibly large dimensions.
pub fn draw_to_surface(decoded: &DynamicImage) -> Result<RgbaImage, ImgConvError> {
    let (width, height) = (decoded.width(), decoded.height());

    if width == 0 || height == 0 {
        return Err(ImgConvError::Render {
            detail: format!("cannot allocate a {width}x{height} surface"),
        });
    }
    if width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE {
        return Err(ImgConvError::Render {
            detail: format!("surface {width}x{height} exceeds the {MAX_SURFACE_EDGE} px edge limit"),
        });
    }

    let mut surface = RgbaImage::new(width, height);
    imageops::replace(&mut surface, &decoded.to_rgba8(), 0, 0);

    debug!("Drew decoded image onto {}x{} surface", width, height);
    Ok(surface)
}

/// Composite opaque white behind the surface, producing an alpha-free image.
///
/// Straight-alpha blend per channel: `out = src·a + 255·(1−a)`, rounded.
/// Fully transparent pixels come out pure white regardless of their stored
/// colour values.
pub fn flatten_white(surface: &RgbaImage) -> RgbImage {
    let mut flat = RgbImage::new(surface.width(), surface.height());
    for (x, y, px) in surface.enumerate_pixels() {
        let a = px[3] as u32;
        let blend = |c: u8| -> u8 { ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8 };
        flat.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }
    flat
}
