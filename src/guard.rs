//! Format guard: validate a declared media type before any conversion work.
//!
//! The check is purely declarative — it matches the caller-declared label
//! against the fixed accept list and never inspects bytes. A file mislabeled
//! as `image/webp` passes the guard and fails later at the decode stage,
//! which produces the more useful error anyway (the decoder knows *why* the
//! bytes are unusable; a magic-number check would only know that they are).

/// Media types accepted as conversion input, matched exactly and
/// case-sensitively.
pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = ["image/webp", "image/avif"];

/// True iff `media_type` exactly matches one of [`ACCEPTED_MEDIA_TYPES`].
///
/// Total over all inputs: an absent, empty, or malformed label is simply
/// not accepted. No side effects, no errors.
pub fn accepts(media_type: Option<&str>) -> bool {
    match media_type {
        Some(label) => ACCEPTED_MEDIA_TYPES.contains(&label),
        None => false,
    }
}
