//! Image decoding, resizing, and base64 encoding for model attachments.
//!
//! Training images are resized to at most 1024px on the longest edge so that
//! six attachments per analysis stay within provider payload limits.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::info;

use crate::ai::ImageAttachment;
use crate::error::StyleError;

/// Maximum dimension (width or height) for images sent to vision APIs.
pub const MAX_IMAGE_DIMENSION: u32 = 1024;

/// JPEG-encoded, size-bounded image ready for an API payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub base64: String,
}

impl PreparedImage {
    pub fn into_attachment(self, label: impl Into<String>) -> ImageAttachment {
        ImageAttachment {
            label: Some(label.into()),
            media_type: image_media_type().to_string(),
            data_base64: self.base64,
        }
    }
}

/// Prepare an image for a vision API: load, resize, encode.
///
/// # Errors
/// `StyleError::InvalidImage` when the bytes cannot be decoded or encoded.
pub fn prepare_image(image_bytes: &[u8]) -> Result<PreparedImage, StyleError> {
    let img = image::load_from_memory(image_bytes).map_err(|e| {
        StyleError::InvalidImage(format!(
            "Failed to load image: {}. Ensure it's a valid JPEG/PNG/WebP.",
            e
        ))
    })?;

    let resized = resize_if_needed(img, MAX_IMAGE_DIMENSION);
    let jpeg_bytes = encode_to_jpeg(&resized)?;
    info!(
        "Prepared image {}x{} ({} JPEG bytes)",
        resized.width(),
        resized.height(),
        jpeg_bytes.len()
    );

    Ok(PreparedImage {
        width: resized.width(),
        height: resized.height(),
        base64: STANDARD.encode(&jpeg_bytes),
    })
}

/// Decode a base64 payload coming over IPC. Accepts bare base64 or a
/// `data:<mime>;base64,` URL.
pub fn decode_base64_image(payload: &str) -> Result<Vec<u8>, StyleError> {
    let data = match payload.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => payload,
    };
    STANDARD
        .decode(data.trim())
        .map_err(|e| StyleError::InvalidImage(format!("Invalid base64 image data: {}", e)))
}

/// Resize image if either dimension exceeds max, maintaining aspect ratio.
fn resize_if_needed(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());

    if width <= max_dimension && height <= max_dimension {
        return img;
    }

    let scale = max_dimension as f32 / width.max(height) as f32;
    let new_width = ((width as f32 * scale) as u32).max(1);
    let new_height = ((height as f32 * scale) as u32).max(1);

    img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
}

/// Encode to JPEG bytes. JPEG has no alpha, so flatten to RGB first.
fn encode_to_jpeg(img: &DynamicImage) -> Result<Vec<u8>, StyleError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| StyleError::InvalidImage(format!("Failed to encode image to JPEG: {}", e)))?;
    Ok(buffer.into_inner())
}

/// Get the media type for vision API payloads.
pub fn image_media_type() -> &'static str {
    "image/jpeg"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgba8(w, h);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_prepare_image_rejects_invalid() {
        let result = prepare_image(b"not an image");
        match result {
            Err(StyleError::InvalidImage(msg)) => assert!(msg.contains("Failed to load")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_resize_if_needed_no_resize() {
        let img = DynamicImage::new_rgb8(500, 300);
        let resized = resize_if_needed(img, 1024);
        assert_eq!((resized.width(), resized.height()), (500, 300));
    }

    #[test]
    fn test_resize_if_needed_resize_width() {
        let img = DynamicImage::new_rgb8(2000, 1000);
        let resized = resize_if_needed(img, 1024);
        assert_eq!((resized.width(), resized.height()), (1024, 512));
    }

    #[test]
    fn test_resize_if_needed_resize_height() {
        let img = DynamicImage::new_rgb8(1000, 2000);
        let resized = resize_if_needed(img, 1024);
        assert_eq!((resized.width(), resized.height()), (512, 1024));
    }

    #[test]
    fn test_prepare_image_flattens_alpha_to_jpeg() {
        let prepared = prepare_image(&png_bytes(64, 48)).unwrap();
        assert_eq!((prepared.width, prepared.height), (64, 48));

        let jpeg = STANDARD.decode(&prepared.base64).unwrap();
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[test]
    fn test_into_attachment_carries_label() {
        let attachment = prepare_image(&png_bytes(8, 8))
            .unwrap()
            .into_attachment("Pair 1 (raw)");
        assert_eq!(attachment.label.as_deref(), Some("Pair 1 (raw)"));
        assert_eq!(attachment.media_type, "image/jpeg");
    }

    #[test]
    fn test_decode_base64_accepts_data_urls() {
        let raw = png_bytes(4, 4);
        let bare = STANDARD.encode(&raw);
        let url = format!("data:image/png;base64,{}", bare);
        assert_eq!(decode_base64_image(&bare).unwrap(), raw);
        assert_eq!(decode_base64_image(&url).unwrap(), raw);
        assert!(decode_base64_image("!!!").is_err());
    }
}
