use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::Error;

pub fn bytes_to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode a base64 request field. Failures are input errors naming the field.
pub fn base64_to_bytes(field: &str, s: &str) -> Result<Vec<u8>, Error> {
    BASE64
        .decode(s.trim())
        .map_err(|e| Error::invalid_input(format!("{} is not valid base64: {}", field, e)))
}

/// Render bytes as UTF-8 when they are printable text, base64 otherwise.
pub fn bytes_to_display(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) if !s.chars().any(char::is_control) => s.to_string(),
        _ => bytes_to_base64(bytes),
    }
}
