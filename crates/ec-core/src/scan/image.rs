use std::path::PathBuf;

use bytes::Bytes;
use thiserror::Error;

/// Encodings accepted for a captured still image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMime {
    Jpeg,
    Png,
    Webp,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
            ImageMime::Webp => "image/webp",
        }
    }
}

/// Where a capture comes from: a picked file or bytes already held by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Memory(Bytes),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("image is empty")]
    Empty,
    #[error("unsupported image encoding")]
    UnsupportedFormat,
    #[error("failed to read image: {0}")]
    Io(String),
}

/// Encoded still image held in memory for one scan. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    bytes: Bytes,
    mime: ImageMime,
}

impl CapturedImage {
    pub fn new(bytes: impl Into<Bytes>, mime: ImageMime) -> Result<Self, CaptureError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CaptureError::Empty);
        }
        Ok(Self { bytes, mime })
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Content digest (blake3, hex), stable across captures of identical bytes.
    pub fn digest(&self) -> String {
        blake3::hash(&self.bytes).to_hex().to_string()
    }
}
