//! Validation of uploaded meal photos.
//!
//! The photo is the only user input that reaches the model, so format
//! validation happens here, before any network call is made.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use crate::error::ImageError;

/// Allowed formats for meal photos.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png];

/// Maximum file size for an uploaded photo (8MB). Bounds the base64 payload
/// sent to the model endpoint.
pub const MAX_FILE_SIZE: usize = 8 * 1024 * 1024;

/// An uploaded photo that passed validation.
///
/// Immutable once created; dropped with the session that owns it.
#[derive(Debug, Clone)]
pub struct MealPhoto {
    /// The raw image bytes as uploaded.
    pub data: Vec<u8>,
    /// The detected content type (e.g., "image/jpeg").
    pub content_type: String,
}

/// Validate uploaded bytes: check the size cap and that the bytes are a
/// decodable JPEG or PNG.
///
/// Returns a [`MealPhoto`] ready to attach to an outbound model request.
pub fn validate_photo(data: Vec<u8>) -> Result<MealPhoto, ImageError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(ImageError::TooLarge {
            size: data.len(),
            limit: MAX_FILE_SIZE,
        });
    }

    let reader = ImageReader::new(Cursor::new(&data))
        .with_guessed_format()
        .map_err(|e| ImageError::Unreadable(e.to_string()))?;

    let format = reader.format().ok_or(ImageError::UnknownFormat)?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(ImageError::UnsupportedFormat(format!("{:?}", format)));
    }

    Ok(MealPhoto {
        content_type: format.to_mime_type().to_string(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 8-byte PNG signature; enough for format detection without a full decode.
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_validate_png() {
        let photo = validate_photo(PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(photo.content_type, "image/png");
        assert_eq!(photo.data, PNG_MAGIC);
    }

    #[test]
    fn test_validate_not_an_image() {
        let result = validate_photo(b"not an image".to_vec());
        assert!(matches!(result, Err(ImageError::UnknownFormat)));
    }

    #[test]
    fn test_validate_unsupported_format() {
        // GIF is a real image format but not one we accept
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00".to_vec();
        let result = validate_photo(gif);
        assert!(matches!(result, Err(ImageError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validate_too_large() {
        let oversized = vec![0u8; MAX_FILE_SIZE + 1];
        let result = validate_photo(oversized);
        assert!(matches!(result, Err(ImageError::TooLarge { .. })));
    }
}
