use async_trait::async_trait;
use bytes::Bytes;
use image::ImageFormat;
use tracing::debug;

use ec_core::ports::ImageSourcePort;
use ec_core::scan::{CaptureError, CapturedImage, ImageMime, ImageSource};

/// Reads picked files from disk and sniffs their encoding.
///
/// The format is detected from the magic bytes, never from the extension.
#[derive(Debug, Default)]
pub struct FsImageSource;

impl FsImageSource {
    pub fn new() -> Self {
        Self
    }
}

fn detect_mime(bytes: &[u8]) -> Result<ImageMime, CaptureError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => Ok(ImageMime::Jpeg),
        Ok(ImageFormat::Png) => Ok(ImageMime::Png),
        Ok(ImageFormat::WebP) => Ok(ImageMime::Webp),
        _ => Err(CaptureError::UnsupportedFormat),
    }
}

#[async_trait]
impl ImageSourcePort for FsImageSource {
    async fn load(&self, source: ImageSource) -> Result<CapturedImage, CaptureError> {
        let bytes = match source {
            ImageSource::File(path) => {
                let data = tokio::fs::read(&path)
                    .await
                    .map_err(|e| CaptureError::Io(format!("{}: {e}", path.display())))?;
                debug!(path = %path.display(), bytes = data.len(), "image file read");
                Bytes::from(data)
            }
            ImageSource::Memory(bytes) => bytes,
        };
        if bytes.is_empty() {
            return Err(CaptureError::Empty);
        }
        let mime = detect_mime(&bytes)?;
        CapturedImage::new(bytes, mime)
    }
}
