//! Image input resolution and decoding
//!
//! Callers hand the analyzer whatever they have: raw encoded bytes, a path
//! to an image file, or a base64 string (optionally wrapped in a `data:` URL).
//! [`ImageInput`] resolves those to bytes and [`decode`] turns the bytes into
//! an RGB [`PixelBuffer`].
//!
//! Text inputs are tried as a file path first and as base64 second.

use base64::{engine::general_purpose, Engine as _};
use image::RgbImage;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AnalysisError, Result};

/// 2-D grid of RGB triples
pub type PixelBuffer = RgbImage;

/// Image data in any of the accepted shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// Raw encoded image bytes, used as-is
    Bytes(Vec<u8>),
    /// File path or base64 payload
    Text(String),
    /// Explicit file path
    Path(PathBuf),
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        ImageInput::Bytes(bytes)
    }
}

impl From<&[u8]> for ImageInput {
    fn from(bytes: &[u8]) -> Self {
        ImageInput::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ImageInput {
    fn from(bytes: &[u8; N]) -> Self {
        ImageInput::Bytes(bytes.to_vec())
    }
}

impl From<String> for ImageInput {
    fn from(text: String) -> Self {
        ImageInput::Text(text)
    }
}

impl From<&str> for ImageInput {
    fn from(text: &str) -> Self {
        ImageInput::Text(text.to_string())
    }
}

impl From<&Path> for ImageInput {
    fn from(path: &Path) -> Self {
        ImageInput::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::Path(path)
    }
}

impl TryFrom<Value> for ImageInput {
    type Error = AnalysisError;

    /// Map a loosely typed tool argument onto an input.
    ///
    /// Strings become text input and arrays of integers in 0-255 become raw
    /// bytes. Anything else is rejected.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(ImageInput::Text(text)),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(|| {
                            AnalysisError::unsupported(format!(
                                "byte arrays must contain integers 0-255, found {}",
                                item
                            ))
                        })
                })
                .collect::<Result<Vec<u8>>>()
                .map(ImageInput::Bytes),
            other => Err(AnalysisError::unsupported(format!(
                "expected bytes, a file path or a base64 string, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ImageInput {
    /// Resolve the input to encoded image bytes
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedInputError` when a text input is neither a readable
    /// file nor valid base64, or when an explicit path cannot be read.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            ImageInput::Bytes(bytes) => Ok(bytes),
            ImageInput::Path(path) => std::fs::read(&path).map_err(|e| {
                AnalysisError::unsupported(format!("cannot read {}: {}", path.display(), e))
            }),
            ImageInput::Text(text) => resolve_text(&text),
        }
    }
}

fn resolve_text(text: &str) -> Result<Vec<u8>> {
    if text.trim().is_empty() {
        return Err(AnalysisError::unsupported("empty string"));
    }

    match std::fs::read(Path::new(text)) {
        Ok(bytes) => {
            debug!(path = text, bytes = bytes.len(), "read image from file");
            return Ok(bytes);
        }
        Err(e) => debug!(error = %e, "text input is not a readable file, trying base64"),
    }

    let payload = strip_data_url(text);
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    general_purpose::STANDARD.decode(compact.as_bytes()).map_err(|e| {
        AnalysisError::unsupported(format!(
            "input is neither a readable file path nor valid base64 ({})",
            e
        ))
    })
}

/// Strip a `data:<mime>;base64,` prefix if present
fn strip_data_url(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with("data:") {
        if let Some((header, payload)) = trimmed.split_once(',') {
            if header.ends_with(";base64") {
                return payload;
            }
        }
    }
    trimmed
}

/// Decode encoded image bytes into an RGB pixel buffer
///
/// Any format enabled in the `image` crate is accepted; alpha is dropped.
///
/// # Errors
///
/// Returns `DecodeError` if the bytes do not parse as an image.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer> {
    let format = image::guess_format(bytes)
        .map_err(|e| AnalysisError::decode("unrecognized image format", e))?;

    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AnalysisError::decode(format!("failed to decode {:?} data", format), e))?;

    let buffer = image.to_rgb8();
    debug!(
        ?format,
        width = buffer.width(),
        height = buffer.height(),
        "decoded image"
    );
    Ok(buffer)
}
