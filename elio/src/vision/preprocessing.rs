use crate::error::{ElioError, Result};

/// Check that an upload looks like an image the Vision API accepts.
///
/// Returns the detected MIME type. Rejects empty bodies, bodies over
/// `max_bytes`, and anything whose magic bytes are not an image format.
pub fn validate_image(bytes: &[u8], max_bytes: usize) -> Result<&'static str> {
    if bytes.is_empty() {
        return Err(ElioError::Validation("Image is empty".to_string()));
    }

    if bytes.len() > max_bytes {
        return Err(ElioError::Validation(format!(
            "Image too large: {} bytes (max {} bytes)",
            bytes.len(),
            max_bytes
        )));
    }

    match infer::get(bytes) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => Ok(kind.mime_type()),
        Some(kind) => Err(ElioError::Validation(format!(
            "Unsupported file type: {}",
            kind.mime_type()
        ))),
        None => Err(ElioError::Validation(
            "Unrecognized file type, expected an image".to_string(),
        )),
    }
}
