//! Re-applies a style profile to an image.
//!
//! Pure and deterministic: the same image and instructions always yield the
//! same pixels. Rows are processed in parallel with rayon; alpha is kept.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat, RgbaImage};
use rayon::prelude::*;
use tracing::{info, warn};

use super::filter::FilterChain;
use super::instructions::EditingInstructions;
use crate::error::StyleError;

/// Render `image` through the filter chain derived from `instructions`.
pub fn render_with_instructions(
    image: &DynamicImage,
    instructions: &EditingInstructions,
) -> RgbaImage {
    let out_of_range = instructions.out_of_range_fields();
    if !out_of_range.is_empty() {
        warn!("Clamping out-of-range instructions before render: {:?}", out_of_range);
    }
    let chain = FilterChain::from_instructions(instructions);
    apply_chain(&image.to_rgba8(), &chain)
}

/// Apply a filter chain to every pixel of an RGBA buffer.
pub fn apply_chain(src: &RgbaImage, chain: &FilterChain) -> RgbaImage {
    let (w, h) = src.dimensions();
    if w == 0 || h == 0 || chain.is_identity() {
        return src.clone();
    }

    let stride = w as usize * 4;
    let src_raw = src.as_raw();
    let mut dst_raw = vec![0u8; src_raw.len()];

    dst_raw
        .par_chunks_mut(stride)
        .zip(src_raw.par_chunks(stride))
        .for_each(|(row_out, row_in)| {
            for (px_out, px_in) in row_out.chunks_exact_mut(4).zip(row_in.chunks_exact(4)) {
                let rgb = [
                    px_in[0] as f32 / 255.0,
                    px_in[1] as f32 / 255.0,
                    px_in[2] as f32 / 255.0,
                ];
                let [r, g, b] = chain.apply_rgb(rgb);
                px_out[0] = to_u8(r);
                px_out[1] = to_u8(g);
                px_out[2] = to_u8(b);
                px_out[3] = px_in[3];
            }
        });

    RgbaImage::from_raw(w, h, dst_raw).unwrap_or_else(|| src.clone())
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Decode, render and PNG-encode. Returns the PNG as base64.
pub fn render_base64(
    image_bytes: &[u8],
    instructions: &EditingInstructions,
) -> Result<String, StyleError> {
    let img = image::load_from_memory(image_bytes)
        .map_err(|e| StyleError::InvalidImage(format!("Failed to load image: {}", e)))?;
    info!("Rendering style onto {}x{} image", img.width(), img.height());

    let rendered = render_with_instructions(&img, instructions);

    let mut buffer = Cursor::new(Vec::new());
    rendered
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| StyleError::InvalidImage(format!("Failed to encode PNG: {}", e)))?;
    Ok(STANDARD.encode(buffer.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(w: u32, h: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(w, h, |x, y| {
            Rgba([(x * 255 / w.max(1)) as u8, (y * 255 / h.max(1)) as u8, 128, 200])
        });
        DynamicImage::ImageRgba8(img)
    }

    fn warm_edit() -> EditingInstructions {
        EditingInstructions {
            brightness: 115.0,
            contrast: 110.0,
            saturation: 130.0,
            sepia: 20.0,
            hue_rotate: 10.0,
            ..EditingInstructions::neutral()
        }
    }

    #[test]
    fn test_neutral_render_is_unchanged() {
        let img = gradient(16, 8);
        let out = render_with_instructions(&img, &EditingInstructions::neutral());
        assert_eq!(out, img.to_rgba8());
    }

    #[test]
    fn test_render_is_deterministic() {
        let img = gradient(33, 17);
        let a = render_with_instructions(&img, &warm_edit());
        let b = render_with_instructions(&img, &warm_edit());
        assert_eq!(a, b);
        assert_ne!(a, img.to_rgba8());
    }

    #[test]
    fn test_render_preserves_alpha_and_dimensions() {
        let img = gradient(10, 6);
        let out = render_with_instructions(&img, &warm_edit());
        assert_eq!(out.dimensions(), (10, 6));
        assert!(out.pixels().all(|p| p[3] == 200));
    }

    #[test]
    fn test_brighter_profile_raises_mean_luma() {
        let img = gradient(20, 20);
        let mean = |buf: &RgbaImage| {
            buf.pixels().map(|p| p[0] as u64 + p[1] as u64 + p[2] as u64).sum::<u64>()
        };
        let brighter = EditingInstructions {
            brightness: 140.0,
            ..EditingInstructions::neutral()
        };
        let out = render_with_instructions(&img, &brighter);
        assert!(mean(&out) > mean(&img.to_rgba8()));
    }

    #[test]
    fn test_render_base64_rejects_invalid_bytes() {
        let err = render_base64(b"definitely not a png", &warm_edit()).unwrap_err();
        assert!(matches!(err, StyleError::InvalidImage(_)));
    }

    #[test]
    fn test_render_base64_produces_png() {
        let mut buffer = Cursor::new(Vec::new());
        gradient(8, 8).write_to(&mut buffer, ImageFormat::Png).unwrap();

        let encoded = render_base64(&buffer.into_inner(), &warm_edit()).unwrap();
        let bytes = STANDARD.decode(encoded).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
