//! Error types for the imgconv library.
//!
//! A single fatal enum covers every way a conversion can go wrong: the
//! format guard rejecting the declared media type, one of the three pipeline
//! stages failing, or the surrounding I/O (input resolution, output write).
//!
//! The pipeline variants ([`ImgConvError::Decode`], [`ImgConvError::Render`],
//! [`ImgConvError::Encode`]) keep their distinct internal cause for
//! diagnostic logging, but [`ImgConvError::user_message`] deliberately
//! collapses them into one generic "conversion failed" string — from the
//! end user's point of view there is nothing actionable in the difference
//! between a corrupt bitstream and an encoder failure.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the imgconv library.
#[derive(Debug, Error)]
pub enum ImgConvError {
    // ── Guard errors ──────────────────────────────────────────────────────
    /// The declared media type is not one of the accepted input types.
    #[error("Unsupported input type: {}\nAccepted types: image/webp, image/avif", media_type.as_deref().unwrap_or("<none>"))]
    UnsupportedInputType { media_type: Option<String> },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Image file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Pipeline errors ───────────────────────────────────────────────────
    /// The source bytes could not be decoded as a raster image of the
    /// declared format. Mislabeled and corrupt files both land here since
    /// the guard trusts the label instead of inspecting bytes.
    #[error("Failed to decode source image: {detail}")]
    Decode { detail: String },

    /// A drawing surface could not be allocated for the decoded image.
    #[error("Failed to allocate drawing surface: {detail}")]
    Render { detail: String },

    /// The drawing surface could not be serialised to the target format.
    #[error("Failed to encode {format} output: {detail}")]
    Encode { format: String, detail: String },

    // ── Request errors ────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ImgConvError {
    /// True for failures raised by one of the pipeline stages
    /// (decode, render, encode).
    pub fn is_pipeline_failure(&self) -> bool {
        matches!(
            self,
            ImgConvError::Decode { .. } | ImgConvError::Render { .. } | ImgConvError::Encode { .. }
        )
    }

    /// The message to show an end user.
    ///
    /// Pipeline failures all read the same ("conversion failed, try again");
    /// the specific cause stays available through `Display` for logs.
    /// Everything else keeps its own message since the user can act on it
    /// (pick a different file, fix the path, adjust the request).
    pub fn user_message(&self) -> String {
        if self.is_pipeline_failure() {
            "Error converting image. Please try again.".to_string()
        } else {
            self.to_string()
        }
    }
}
