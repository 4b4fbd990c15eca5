//! MIME type handling for reference images.
//!
//! The declared type on an inline-data part must match the actual bytes,
//! so the type is sniffed from content and cross-checked against the file
//! extension before a request is built.

use std::path::Path;

use crate::{Error, Result};

/// Identify an image format from its magic bytes.
pub fn sniff(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

/// Map a file extension to an image MIME type.
pub fn from_extension(path: &Path) -> Option<&'static str> {
    match path
        .extension()?
        .to_str()?
        .to_ascii_lowercase()
        .as_str()
    {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Determine the MIME type to declare for a reference image.
///
/// Content sniffing wins; an extension that contradicts the sniffed type is
/// a validation error, caught before any request is submitted. Files whose
/// format cannot be identified either way are rejected.
pub fn reference_mime(path: &Path, bytes: &[u8]) -> Result<&'static str> {
    let sniffed = sniff(bytes);
    let by_extension = from_extension(path);

    match (sniffed, by_extension) {
        (Some(content_type), Some(ext_type)) if content_type != ext_type => {
            Err(Error::InvalidReference(format!(
                "{} looks like {} but its extension says {}",
                path.display(),
                content_type,
                ext_type
            )))
        }
        (Some(content_type), _) => Ok(content_type),
        (None, Some(ext_type)) => {
            tracing::warn!(
                "Could not sniff format of {} (first 4 bytes: {:02X?}), trusting extension {}",
                path.display(),
                &bytes[..bytes.len().min(4)],
                ext_type
            );
            Ok(ext_type)
        }
        (None, None) => Err(Error::InvalidReference(format!(
            "{} is not a recognized image format",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_png() {
        assert_eq!(sniff(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]), Some("image/png"));
    }

    #[test]
    fn test_sniff_jpeg() {
        assert_eq!(sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
    }

    #[test]
    fn test_sniff_gif() {
        assert_eq!(sniff(b"GIF89a"), Some("image/gif"));
    }

    #[test]
    fn test_sniff_webp() {
        assert_eq!(
            sniff(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            Some("image/webp")
        );
    }

    #[test]
    fn test_sniff_unknown() {
        assert_eq!(sniff(&[0x00, 0x01, 0x02, 0x03]), None);
        assert_eq!(sniff(&[]), None);
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert_eq!(from_extension(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(from_extension(Path::new("a.JpEg")), Some("image/jpeg"));
    }

    #[test]
    fn test_extension_unknown() {
        assert_eq!(from_extension(Path::new("a.bmp")), None);
        assert_eq!(from_extension(Path::new("noext")), None);
    }

    #[test]
    fn test_reference_mime_sniffed_wins_over_missing_extension() {
        let mime = reference_mime(Path::new("image"), &[0x89, 0x50, 0x4E, 0x47]).unwrap();
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn test_reference_mime_rejects_mismatch() {
        let err = reference_mime(Path::new("photo.png"), &[0xFF, 0xD8, 0xFF, 0xE0]).unwrap_err();
        assert!(matches!(err, Error::InvalidReference(_)));
        assert!(err.to_string().contains("image/jpeg"));
    }

    #[test]
    fn test_reference_mime_trusts_extension_when_unsniffable() {
        let mime = reference_mime(Path::new("odd.webp"), &[0x00, 0x01]).unwrap();
        assert_eq!(mime, "image/webp");
    }

    #[test]
    fn test_reference_mime_rejects_unidentifiable() {
        let err = reference_mime(Path::new("blob.bin"), &[0x00, 0x01]).unwrap_err();
        assert!(matches!(err, Error::InvalidReference(_)));
    }
}
