use async_trait::async_trait;

use crate::scan::{CaptureError, CapturedImage, ImageSource};

/// Reads a still image into memory and detects its format.
#[async_trait]
pub trait ImageSourcePort: Send + Sync {
    async fn load(&self, source: ImageSource) -> Result<CapturedImage, CaptureError>;
}
