//! Reading user-picked image files into base64 payloads.

use wasm_bindgen::JsCast;

/// An uploaded image: binary payload for the back end, data URL for display.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub name: String,
    pub base64: String,
    pub preview: String,
}

impl UploadedImage {
    pub fn new(name: impl Into<String>, media_type: &str, base64: String) -> Self {
        let media_type = if media_type.is_empty() { "image/jpeg" } else { media_type };
        Self {
            name: name.into(),
            preview: format!("data:{};base64,{}", media_type, base64),
            base64,
        }
    }
}

/// Read every file in a `FileList`, in order.
pub async fn read_file_list(files: web_sys::FileList) -> Result<Vec<UploadedImage>, String> {
    let mut images = Vec::with_capacity(files.length() as usize);
    for idx in 0..files.length() {
        if let Some(file) = files.get(idx) {
            images.push(read_image(file).await?);
        }
    }
    Ok(images)
}

pub async fn read_image(file: web_sys::File) -> Result<UploadedImage, String> {
    let name = file.name();
    let media_type = file.type_();
    let base64 = read_file_as_base64(file).await?;
    Ok(UploadedImage::new(name, &media_type, base64))
}

/// Read a File as base64 string.
async fn read_file_as_base64(file: web_sys::File) -> Result<String, String> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen_futures::JsFuture;

    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Failed to convert to ArrayBuffer")?;

    let bytes = Uint8Array::new(&array_buffer).to_vec();
    Ok(base64_encode(&bytes))
}

/// Standard base64 with padding, kept local to stay dependency-free in WASM.
pub fn base64_encode(bytes: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut result = String::with_capacity(bytes.len().div_ceil(3) * 4);

    for chunk in bytes.chunks(3) {
        let b0 = chunk[0] as usize;
        let b1 = chunk.get(1).copied().unwrap_or(0) as usize;
        let b2 = chunk.get(2).copied().unwrap_or(0) as usize;

        result.push(ALPHABET[b0 >> 2] as char);
        result.push(ALPHABET[((b0 & 0x03) << 4) | (b1 >> 4)] as char);
        result.push(if chunk.len() > 1 {
            ALPHABET[((b1 & 0x0f) << 2) | (b2 >> 6)] as char
        } else {
            '='
        });
        result.push(if chunk.len() > 2 {
            ALPHABET[b2 & 0x3f] as char
        } else {
            '='
        });
    }

    result
}
