//! Output types: the encoded-image result handed back to the caller.
//!
//! A [`ConversionResult`] is self-contained — it embeds both the encoded
//! bytes and the format, so it can be written to a file, rendered as a
//! base64 data URL (the original tool's display/download contract), or
//! serialised to JSON. The converter keeps no reference to it; ownership
//! passes entirely to the caller.

use crate::request::TargetFormat;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A successfully converted image.
///
/// Never partially formed: the pipeline either completes all four steps and
/// produces one of these, or returns an error and produces nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// The format the bytes are encoded in.
    pub format: TargetFormat,
    /// Pixel width, equal to the decoded source's width.
    pub width: u32,
    /// Pixel height, equal to the decoded source's height.
    pub height: u32,
    /// The encoded image payload. Serialised as base64 in JSON.
    #[serde(
        serialize_with = "serialize_base64",
        deserialize_with = "deserialize_base64"
    )]
    pub bytes: Vec<u8>,
}

impl ConversionResult {
    /// Render the result as a `data:` URL, directly usable as an image
    /// source or a download href.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }

    /// Suggested download filename: `converted.png` / `converted.jpg`.
    pub fn suggested_filename(&self) -> String {
        format!("converted.{}", self.format.extension())
    }

    /// Size of the encoded payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn serialize_base64<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&STANDARD.encode(bytes))
}

fn deserialize_base64<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(d)?;
    STANDARD.decode(&encoded).map_err(serde::de::Error::custom)
}
