//! Conversion entry points.
//!
//! [`convert`] is the primary API: guard check, then the four pipeline steps
//! (decode → render → flatten → encode) run inside one
//! `tokio::task::spawn_blocking` call. Codec work is CPU-bound and would
//! stall the async workers if run inline; pushing the whole pipeline into a
//! single blocking task also gives callers exactly one suspension point per
//! request, whatever the underlying encoders look like.
//!
//! The converter holds no state: every call allocates its own surface and
//! produces its own result, so independent requests can run concurrently
//! without coordination. There are no retries and no cancellation — a
//! failed conversion is reported once and the caller re-invokes with a new
//! request if desired.

use crate::error::ImgConvError;
use crate::guard;
use crate::output::ConversionResult;
use crate::pipeline::{decode, encode, input, render};
use crate::request::{ConversionRequest, SourceImage, TargetFormat};
use image::DynamicImage;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert a source image to the requested target format.
///
/// # Errors
/// - [`ImgConvError::UnsupportedInputType`] — declared media type is not
///   WebP or AVIF (checked before any pipeline work)
/// - [`ImgConvError::Decode`] / [`ImgConvError::Render`] /
///   [`ImgConvError::Encode`] — a pipeline step failed; no partial result
///   is produced
pub async fn convert(request: &ConversionRequest) -> Result<ConversionResult, ImgConvError> {
    let started = Instant::now();

    // ── Step 0: Format guard ─────────────────────────────────────────────
    let media_type = match request.source.media_type() {
        Some(label) if guard::accepts(Some(label)) => label.to_string(),
        other => {
            return Err(ImgConvError::UnsupportedInputType {
                media_type: other.map(str::to_string),
            })
        }
    };

    info!(
        "Starting conversion: {} ({} bytes) → {}",
        media_type,
        request.source.len(),
        request.target
    );

    let bytes = request.source.bytes().to_vec();
    let target = request.target;
    let quality = request.quality;

    let result =
        tokio::task::spawn_blocking(move || run_pipeline(&bytes, &media_type, target, quality))
            .await
            .map_err(|e| ImgConvError::Internal(format!("Conversion task panicked: {e}")))??;

    info!(
        "Conversion complete: {}x{} {} ({} bytes) in {}ms",
        result.width,
        result.height,
        result.format,
        result.len(),
        started.elapsed().as_millis()
    );

    Ok(result)
}

/// Blocking implementation of the pipeline. Steps run strictly in order;
/// the first failure aborts the run.
fn run_pipeline(
    bytes: &[u8],
    media_type: &str,
    target: TargetFormat,
    quality: f32,
) -> Result<ConversionResult, ImgConvError> {
    // ── Step 1: Decode ───────────────────────────────────────────────────
    let decoded = decode::decode_source(bytes, media_type)?;
    let (width, height) = (decoded.width(), decoded.height());

    // ── Step 2: Render ───────────────────────────────────────────────────
    let surface = render::draw_to_surface(&decoded)?;
    drop(decoded);

    // ── Step 3: Flatten (JPEG only) ──────────────────────────────────────
    let surface = match target {
        TargetFormat::Jpg => {
            debug!("Flattening alpha onto white for JPEG target");
            DynamicImage::ImageRgb8(render::flatten_white(&surface))
        }
        TargetFormat::Png => DynamicImage::ImageRgba8(surface),
    };

    // ── Step 4: Encode ───────────────────────────────────────────────────
    let encoded = encode::encode_surface(&surface, target, quality)?;

    Ok(ConversionResult {
        format: target,
        width,
        height,
        bytes: encoded,
    })
}

/// Convert a local image file, deriving the declared media type from its
/// extension.
///
/// Convenience wrapper over [`input::load_source`] + [`convert`], used by
/// the CLI.
pub async fn convert_path(
    path: impl AsRef<Path>,
    target: TargetFormat,
    quality: f32,
) -> Result<ConversionResult, ImgConvError> {
    let source = input::load_source(path).await?;
    let request = ConversionRequest::builder()
        .source(source)
        .target(target)
        .quality(quality)
        .build()?;
    convert(&request).await
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(request: &ConversionRequest) -> Result<ConversionResult, ImgConvError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ImgConvError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(request))
}

/// Convert raw bytes with an explicitly declared media type.
///
/// The recommended API when the image comes from an upload or an in-memory
/// buffer rather than a file on disk.
pub async fn convert_bytes(
    bytes: Vec<u8>,
    media_type: impl Into<String>,
    target: TargetFormat,
    quality: f32,
) -> Result<ConversionResult, ImgConvError> {
    let request = ConversionRequest::builder()
        .source(SourceImage::new(bytes, media_type))
        .target(target)
        .quality(quality)
        .build()?;
    convert(&request).await
}
