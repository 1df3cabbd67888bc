// CaptionGenerator trait - backend-agnostic caption suggestion interface

use async_trait::async_trait;

use crate::media::ImageFile;

/// Suggests a caption for an image
///
/// The upload form calls this trait, never a concrete implementation, so a
/// real vision model can replace the canned generator without touching it.
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// Produce a caption for `image`. Err only when the image cannot be read.
    async fn generate(&self, image: &ImageFile) -> Result<String, String>;
}
