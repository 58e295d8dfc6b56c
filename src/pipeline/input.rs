//! Input resolution: load a local file as a [`SourceImage`].
//!
//! The declared media type comes from the file extension — this is a
//! declaration, not byte sniffing. The format guard decides acceptance from
//! the label alone, so a `.webp` file full of garbage is loaded here,
//! accepted by the guard, and rejected at the decode stage, exactly as a
//! browser would treat a mislabeled upload.

use crate::error::ImgConvError;
use crate::request::SourceImage;
use std::path::Path;
use tracing::debug;

/// Map a file extension to its conventional media-type label.
///
/// Known non-input image extensions map to their real labels (so the guard
/// can name them in its rejection); unknown extensions map to `None`.
pub fn declared_media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "webp" => Some("image/webp"),
        "avif" => Some("image/avif"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Read a local file into a [`SourceImage`] with its extension-derived label.
///
/// # Errors
/// [`ImgConvError::FileNotFound`] / [`ImgConvError::PermissionDenied`] when
/// the file cannot be read.
pub async fn load_source(path: impl AsRef<Path>) -> Result<SourceImage, ImgConvError> {
    let path = path.as_ref();

    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ImgConvError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ImgConvError::FileNotFound {
            path: path.to_path_buf(),
        },
    })?;

    debug!("Loaded {} ({} bytes)", path.display(), bytes.len());

    Ok(match declared_media_type(path) {
        Some(label) => SourceImage::new(bytes, label),
        None => SourceImage::unlabeled(bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn known_extensions_map_to_labels() {
        assert_eq!(
            declared_media_type(Path::new("photo.webp")),
            Some("image/webp")
        );
        assert_eq!(
            declared_media_type(Path::new("photo.AVIF")),
            Some("image/avif")
        );
        assert_eq!(
            declared_media_type(Path::new("photo.png")),
            Some("image/png")
        );
        assert_eq!(
            declared_media_type(Path::new("photo.jpeg")),
            Some("image/jpeg")
        );
    }

    #[test]
    fn unknown_or_missing_extensions_have_no_label() {
        assert_eq!(declared_media_type(Path::new("archive.zip")), None);
        assert_eq!(declared_media_type(Path::new("noextension")), None);
    }

    #[tokio::test]
    async fn missing_file_is_file_not_found() {
        let err = load_source(PathBuf::from("/definitely/not/here.webp"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImgConvError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn loads_bytes_and_label_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tiny.webp");
        std::fs::write(&path, b"not really webp").expect("write");

        let source = load_source(&path).await.expect("load");
        assert_eq!(source.media_type(), Some("image/webp"));
        assert_eq!(source.bytes(), b"not really webp");
    }
}
