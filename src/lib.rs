//! # imgconv
//!
//! Convert WebP and AVIF images to PNG or JPEG, in process, with no
//! external tools.
//!
//! ## Pipeline Overview
//!
//! ```text
//! WebP / AVIF bytes
//!  │
//!  ├─ 1. Guard    accept/reject the declared media type (no byte sniffing)
//!  ├─ 2. Decode   webp via the image crate, avif via libavif
//!  ├─ 3. Render   draw onto a fresh RGBA surface at the decoded size
//!  ├─ 4. Flatten  JPEG only: composite opaque white behind the pixels
//!  └─ 5. Encode   lossless PNG, or JPEG at the requested quality
//! ```
//!
//! The pipeline either completes fully and yields a [`ConversionResult`], or
//! fails at one step and yields nothing — there is no partial output. Each
//! call is stateless and independent; run as many concurrently as you like.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imgconv::{convert, ConversionRequest, SourceImage, TargetFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("photo.webp")?;
//!     let request = ConversionRequest::builder()
//!         .source(SourceImage::new(bytes, "image/webp"))
//!         .target(TargetFormat::Jpg)
//!         .quality(0.9)
//!         .build()?;
//!     let result = convert(&request).await?;
//!     std::fs::write(result.suggested_filename(), &result.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `imgconv` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! imgconv = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod convert;
pub mod error;
pub mod guard;
pub mod output;
pub mod pipeline;
pub mod request;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use convert::{convert, convert_bytes, convert_path, convert_sync};
pub use error::ImgConvError;
pub use output::ConversionResult;
pub use request::{
    ConversionRequest, ConversionRequestBuilder, SourceImage, TargetFormat, DEFAULT_QUALITY,
};
