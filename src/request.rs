//! Request types: the caller-owned inputs to a conversion.
//!
//! The original tool kept the chosen file, format, and quality as per-session
//! UI state. Here they are modelled as an explicit [`ConversionRequest`]
//! passed into [`crate::convert::convert`] so the converter itself stays
//! stateless and reentrant. A request is constructed fresh per attempt and
//! never mutated afterwards.

use crate::error::ImgConvError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default JPEG quality fraction when the caller does not set one.
pub const DEFAULT_QUALITY: f32 = 0.9;

/// A source image: an opaque binary blob plus its declared media type.
///
/// The media type is whatever the caller declares — typically derived from a
/// file extension or an upload's Content-Type — and is *not* verified
/// against the bytes (see [`crate::guard`]).
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Vec<u8>,
    media_type: Option<String>,
}

impl SourceImage {
    /// Create a source image with a declared media type.
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: Some(media_type.into()),
        }
    }

    /// Create a source image with no declared media type.
    ///
    /// The guard rejects these; the constructor exists so callers can model
    /// "file with unknown extension" without inventing a label.
    pub fn unlabeled(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            media_type: None,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Output format for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    /// Lossless PNG; the quality setting is ignored.
    #[default]
    Png,
    /// Lossy JPEG; encoded at the request's quality fraction. JPEG has no
    /// alpha channel, so transparent sources are flattened onto white.
    Jpg,
}

impl TargetFormat {
    /// The media type of the encoded output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            TargetFormat::Png => "image/png",
            TargetFormat::Jpg => "image/jpeg",
        }
    }

    /// The conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Png => "png",
            TargetFormat::Jpg => "jpg",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One conversion attempt: a source image, a target format, and a quality
/// fraction.
///
/// Built via [`ConversionRequest::builder`]:
///
/// ```rust
/// use imgconv::{ConversionRequest, SourceImage, TargetFormat};
///
/// let source = SourceImage::new(vec![0u8; 4], "image/webp");
/// let request = ConversionRequest::builder()
///     .source(source)
///     .target(TargetFormat::Jpg)
///     .quality(0.85)
///     .build()
///     .unwrap();
/// assert_eq!(request.target, TargetFormat::Jpg);
/// ```
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// The image to convert. Borrowed by the converter for the duration of
    /// one call; never retained.
    pub source: SourceImage,

    /// Output format. Default: [`TargetFormat::Png`].
    pub target: TargetFormat,

    /// Lossy-compression quality fraction in (0, 1]. Default: 0.9.
    ///
    /// Meaningful only for JPEG; ignored for PNG. The UI-facing integer
    /// percent (1–100) is converted to this fraction at the caller boundary,
    /// keeping the core independent of presentation units.
    pub quality: f32,
}

impl ConversionRequest {
    /// Create a new builder.
    pub fn builder() -> ConversionRequestBuilder {
        ConversionRequestBuilder {
            source: None,
            target: TargetFormat::default(),
            quality: DEFAULT_QUALITY,
        }
    }

    /// Shorthand for a request with the default quality.
    pub fn new(source: SourceImage, target: TargetFormat) -> Self {
        Self {
            source,
            target,
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Builder for [`ConversionRequest`].
#[derive(Debug)]
pub struct ConversionRequestBuilder {
    source: Option<SourceImage>,
    target: TargetFormat,
    quality: f32,
}

impl ConversionRequestBuilder {
    pub fn source(mut self, source: SourceImage) -> Self {
        self.source = Some(source);
        self
    }

    pub fn target(mut self, target: TargetFormat) -> Self {
        self.target = target;
        self
    }

    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Build the request, validating constraints.
    pub fn build(self) -> Result<ConversionRequest, ImgConvError> {
        let source = self
            .source
            .ok_or_else(|| ImgConvError::InvalidRequest("source image is required".into()))?;

        if !(self.quality > 0.0 && self.quality <= 1.0) {
            return Err(ImgConvError::InvalidRequest(format!(
                "quality must be a fraction in (0, 1], got {}",
                self.quality
            )));
        }

        Ok(ConversionRequest {
            source,
            target: self.target,
            quality: self.quality,
        })
    }
}
