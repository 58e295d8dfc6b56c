//! Pipeline stages for WebP/AVIF-to-PNG/JPEG conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different AVIF decoder) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ decode ──▶ render ──▶ encode
//! (path)  (webp/avif)  (surface   (png/jpeg
//!                       + flatten)  bytes)
//! ```
//!
//! 1. [`input`]  — resolve a local path to bytes + a declared media type
//! 2. [`decode`] — interpret the bytes as a raster image using the decoder
//!    the declared label selects
//! 3. [`render`] — draw the decoded pixels onto a fresh RGBA surface;
//!    flatten onto white when the target has no alpha channel
//! 4. [`encode`] — serialise the surface to PNG or quality-controlled JPEG
//!
//! Stages run strictly in order; a failure at any stage aborts the run with
//! no partial result.

pub mod decode;
pub mod encode;
pub mod input;
pub mod render;
