//! End-to-end tests for imgconv.
//!
//! WebP fixtures are generated in memory (the image crate's WebP encoder is
//! lossless, so pixel-exact assertions hold). AVIF tests need a real encoded
//! file and are gated on `tests/fixtures/` — they print a SKIP line and
//! return when the fixture is absent.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use imgconv::{
    convert, convert_bytes, convert_path, ConversionRequest, ConversionResult, SourceImage,
    TargetFormat,
};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::PathBuf;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// A 100x50 gradient with a fully transparent 10x10 top-left corner.
fn transparent_corner_rgba() -> RgbaImage {
    RgbaImage::from_fn(100, 50, |x, y| {
        if x < 10 && y < 10 {
            // Non-white stored colour under zero alpha, so flattening
            // mistakes would be visible.
            Rgba([200, 30, 30, 0])
        } else {
            Rgba([(x * 2) as u8, (y * 4) as u8, ((x + y) % 256) as u8, 255])
        }
    })
}

fn encode_webp(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP)
        .expect("webp encode");
    buf
}

fn request(bytes: Vec<u8>, media_type: &str, target: TargetFormat, quality: f32) -> ConversionRequest {
    ConversionRequest::builder()
        .source(SourceImage::new(bytes, media_type))
        .target(target)
        .quality(quality)
        .build()
        .expect("valid request")
}

fn assert_result_shape(result: &ConversionResult, width: u32, height: u32, target: TargetFormat) {
    assert_eq!(result.format, target);
    assert_eq!((result.width, result.height), (width, height));
    assert!(!result.is_empty(), "encoded payload must not be empty");
}

// ── Scenario A: WebP → PNG, pixel-identical ──────────────────────────────────

#[tokio::test]
async fn webp_to_png_preserves_dimensions_and_pixels() {
    let source = transparent_corner_rgba();
    let req = request(encode_webp(&source), "image/webp", TargetFormat::Png, 0.9);

    let result = convert(&req).await.expect("conversion should succeed");
    assert_result_shape(&result, 100, 50, TargetFormat::Png);

    let back = image::load_from_memory_with_format(&result.bytes, ImageFormat::Png)
        .expect("result must decode as PNG")
        .to_rgba8();
    assert_eq!(back.dimensions(), (100, 50));
    // Lossless in, lossless out: every pixel, including alpha, survives.
    assert_eq!(back, source);
}

// ── Scenario B: transparent source → JPEG, flattened onto white ──────────────

#[tokio::test]
async fn transparent_webp_to_jpeg_flattens_onto_white() {
    let source = transparent_corner_rgba();
    let req = request(encode_webp(&source), "image/webp", TargetFormat::Jpg, 0.9);

    let result = convert(&req).await.expect("conversion should succeed");
    assert_result_shape(&result, 100, 50, TargetFormat::Jpg);

    let back = image::load_from_memory_with_format(&result.bytes, ImageFormat::Jpeg)
        .expect("result must decode as JPEG");
    // JPEG decodes alpha-free.
    assert!(matches!(back, DynamicImage::ImageRgb8(_)), "no alpha channel");

    // The transparent corner must render white (lossy tolerance; sampled
    // pixels sit inside the corner's first 8x8 block, away from boundary
    // ringing).
    let rgb = back.to_rgb8();
    for (x, y) in [(0u32, 0u32), (4, 4), (7, 7)] {
        let px = rgb.get_pixel(x, y);
        assert!(
            px[0] >= 240 && px[1] >= 240 && px[2] >= 240,
            "pixel ({x},{y}) should be white, got {px:?}"
        );
    }
}

#[tokio::test]
async fn same_source_to_png_keeps_transparency_exact() {
    let source = transparent_corner_rgba();
    let req = request(encode_webp(&source), "image/webp", TargetFormat::Png, 0.9);

    let result = convert(&req).await.expect("conversion should succeed");
    let back = image::load_from_memory_with_format(&result.bytes, ImageFormat::Png)
        .expect("png decode")
        .to_rgba8();
    assert_eq!(back.get_pixel(5, 5)[3], 0, "corner alpha must survive");
    assert_eq!(back.get_pixel(50, 25)[3], 255);
}

// ── Scenario C: guard rejection before any decode ────────────────────────────

#[tokio::test]
async fn png_labeled_input_is_rejected_by_the_guard() {
    // Valid PNG bytes with a truthful label: only the label matters.
    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])))
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .expect("png encode");

    let req = request(png_bytes, "image/png", TargetFormat::Png, 0.9);
    let err = convert(&req).await.unwrap_err();
    assert!(
        matches!(err, imgconv::ImgConvError::UnsupportedInputType { .. }),
        "guard must reject before decode, got: {err}"
    );
}

// ── P4: JPEG quality monotonicity ────────────────────────────────────────────

#[tokio::test]
async fn higher_jpeg_quality_never_produces_smaller_output() {
    let bytes = encode_webp(&transparent_corner_rgba());

    let high = convert_bytes(bytes.clone(), "image/webp", TargetFormat::Jpg, 0.95)
        .await
        .expect("q=0.95");
    let low = convert_bytes(bytes, "image/webp", TargetFormat::Jpg, 0.30)
        .await
        .expect("q=0.30");

    assert!(
        high.len() >= low.len(),
        "expected {} >= {}",
        high.len(),
        low.len()
    );
}

// ── P5: failure isolation ────────────────────────────────────────────────────

#[tokio::test]
async fn corrupt_bytes_fail_at_decode_with_no_partial_result() {
    let req = request(
        b"RIFF....WEBPVP8 garbage".to_vec(),
        "image/webp",
        TargetFormat::Png,
        0.9,
    );
    let err = convert(&req).await.unwrap_err();
    assert!(
        matches!(err, imgconv::ImgConvError::Decode { .. }),
        "got: {err}"
    );
}

// ── Concurrency: independent requests, no coordination ───────────────────────

#[tokio::test]
async fn concurrent_conversions_are_independent() {
    let bytes = encode_webp(&transparent_corner_rgba());

    let (a, b, c) = tokio::join!(
        convert_bytes(bytes.clone(), "image/webp", TargetFormat::Png, 0.9),
        convert_bytes(bytes.clone(), "image/webp", TargetFormat::Jpg, 0.5),
        convert_bytes(bytes.clone(), "image/webp", TargetFormat::Jpg, 0.9),
    );

    let (a, b, c) = (a.expect("png"), b.expect("jpg q=0.5"), c.expect("jpg q=0.9"));
    assert_eq!(a.format, TargetFormat::Png);
    assert_eq!(b.format, TargetFormat::Jpg);
    assert_eq!((c.width, c.height), (100, 50));
}

// ── Output contract: data URL and file write ─────────────────────────────────

#[tokio::test]
async fn data_url_is_displayable_and_round_trips() {
    let bytes = encode_webp(&transparent_corner_rgba());
    let result = convert_bytes(bytes, "image/webp", TargetFormat::Png, 0.9)
        .await
        .expect("conversion");

    let url = result.to_data_url();
    assert!(url.starts_with("data:image/png;base64,"));

    use base64::{engine::general_purpose::STANDARD, Engine as _};
    let payload = STANDARD
        .decode(url.split(',').nth(1).unwrap())
        .expect("valid base64");
    assert_eq!(payload, result.bytes);
    assert_eq!(result.suggested_filename(), "converted.png");
}

#[tokio::test]
async fn convert_path_reads_label_from_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let in_path = dir.path().join("fixture.webp");
    std::fs::write(&in_path, encode_webp(&transparent_corner_rgba())).expect("write fixture");

    let result = convert_path(&in_path, TargetFormat::Jpg, 0.9)
        .await
        .expect("conversion from path");
    assert_result_shape(&result, 100, 50, TargetFormat::Jpg);

    let out_path = dir.path().join("out.jpg");
    std::fs::write(&out_path, &result.bytes).expect("write output");
    let back = image::open(&out_path).expect("written file must open as an image");
    assert_eq!((back.width(), back.height()), (100, 50));
}

#[tokio::test]
async fn convert_path_with_unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let in_path = dir.path().join("mystery.bin");
    std::fs::write(&in_path, encode_webp(&transparent_corner_rgba())).expect("write fixture");

    // Perfectly good WebP bytes, but no declared label: the guard rejects.
    let err = convert_path(&in_path, TargetFormat::Png, 0.9)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        imgconv::ImgConvError::UnsupportedInputType { media_type: None }
    ));
}

// ── AVIF scenarios (gated on a real fixture file) ────────────────────────────

#[tokio::test]
async fn avif_to_png_preserves_dimensions() {
    let path = fixtures_dir().join("sample.avif");
    if !path.exists() {
        println!("SKIP — fixture not found: {}", path.display());
        return;
    }

    let result = convert_path(&path, TargetFormat::Png, 0.9)
        .await
        .expect("avif conversion should succeed");
    assert_eq!(result.format, TargetFormat::Png);
    assert!(result.width > 0 && result.height > 0);

    let back = image::load_from_memory_with_format(&result.bytes, ImageFormat::Png)
        .expect("result must decode as PNG");
    assert_eq!((back.width(), back.height()), (result.width, result.height));
}

#[tokio::test]
async fn avif_to_jpeg_has_no_alpha_channel() {
    let path = fixtures_dir().join("sample.avif");
    if !path.exists() {
        println!("SKIP — fixture not found: {}", path.display());
        return;
    }

    let result = convert_path(&path, TargetFormat::Jpg, 0.9)
        .await
        .expect("avif conversion should succeed");
    let back = image::load_from_memory_with_format(&result.bytes, ImageFormat::Jpeg)
        .expect("result must decode as JPEG");
    assert!(matches!(back, DynamicImage::ImageRgb8(_)));
}
