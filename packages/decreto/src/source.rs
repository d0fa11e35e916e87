//! Loading decree text from disk.

use std::fs;
use std::path::Path;

use crate::error::{DecretoError, Result};

/// Decode file bytes as UTF-8, falling back to Latin-1.
///
/// Every byte is a valid Latin-1 code point, so the fallback never fails.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                valid_up_to = err.utf8_error().valid_up_to(),
                "Input is not valid UTF-8, decoding as Latin-1"
            );
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Read a file as text with the UTF-8 → Latin-1 fallback.
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| DecretoError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    Ok(decode_text(bytes))
}

/// Extract the decree text stored under `key` in a JSON document.
pub fn decree_from_json(json: &str, key: &str, origin: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    value
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| DecretoError::MissingContentKey {
            key: key.to_string(),
            path: origin.to_string(),
        })
}

/// Load raw decree text from `path`.
///
/// `.json` files must hold the text under `content_key`; any other file is
/// read as plain text.
pub fn load_decree(path: &Path, content_key: &str) -> Result<String> {
    let text = read_text_file(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        decree_from_json(&text, content_key, &path.display().to_string())
    } else {
        Ok(text)
    }
}
