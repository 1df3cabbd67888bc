// MockCaptionGenerator - canned captions with simulated model latency

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

use super::provider::CaptionGenerator;
use crate::media::ImageFile;

/// Simulated model latency
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// Canned captions. One entry is listed twice, so it comes up twice as often.
pub const CANNED_CAPTIONS: &[&str] = &[
    "Beautiful moment captured in time ✨",
    "Living my best life! 🌟",
    "Another day, another adventure 🌍",
    "Grateful for moments like these 🙏",
    "Making memories that last forever 📸",
    "Sunshine and good vibes only ☀️",
    "Life is beautiful when you look around 🌸",
    "Capturing the magic of everyday life ✨",
    "Simple pleasures, big smiles 😊",
    "Every picture tells a story 📖",
    "Finding beauty in the ordinary 🌿",
    "Moments like these make life special 💫",
    "Life is a journey, enjoy the ride 🚗",
    "The best moments are the ones that take us by surprise 🤩",
    "Life is a beautiful journey, enjoy the ride 🚗",
    "The best moments are the ones that take us by surprise 🤩",
];

/// Stand-in for a captioning model
///
/// Reads the whole image (so unreadable files fail like they would with a
/// real upload), waits `delay`, then picks a caption uniformly from the pool.
pub struct MockCaptionGenerator {
    captions: Vec<String>,
    delay: Duration,
}

impl MockCaptionGenerator {
    pub fn new(delay: Duration) -> Self {
        Self::with_captions(CANNED_CAPTIONS.iter().map(|c| c.to_string()).collect(), delay)
    }

    /// Custom pool. An empty pool falls back to the canned captions.
    pub fn with_captions(captions: Vec<String>, delay: Duration) -> Self {
        let captions = if captions.is_empty() {
            CANNED_CAPTIONS.iter().map(|c| c.to_string()).collect()
        } else {
            captions
        };
        Self { captions, delay }
    }
}

impl Default for MockCaptionGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl CaptionGenerator for MockCaptionGenerator {
    async fn generate(&self, image: &ImageFile) -> Result<String, String> {
        let encoded = image.read_data_uri().await.map_err(|e| e.to_string())?;
        tracing::debug!(file = image.name(), encoded_len = encoded.len(), "Caption: image read");

        tokio::time::sleep(self.delay).await;

        let index = rand::rng().random_range(0..self.captions.len());
        Ok(self.captions[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageFile {
        ImageFile::from_bytes("a.jpg", "image/jpeg", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_caption_comes_from_pool() {
        let generator = MockCaptionGenerator::new(Duration::ZERO);
        for _ in 0..20 {
            let caption = generator.generate(&image()).await.unwrap();
            assert!(CANNED_CAPTIONS.contains(&caption.as_str()), "unexpected caption {}", caption);
        }
    }

    #[tokio::test]
    async fn test_single_caption_pool_is_deterministic() {
        let generator = MockCaptionGenerator::with_captions(vec!["Only one".to_string()], Duration::ZERO);
        assert_eq!(generator.generate(&image()).await.unwrap(), "Only one");
    }

    #[tokio::test]
    async fn test_empty_pool_uses_canned_captions() {
        let generator = MockCaptionGenerator::with_captions(Vec::new(), Duration::ZERO);
        let caption = generator.generate(&image()).await.unwrap();
        assert!(CANNED_CAPTIONS.contains(&caption.as_str()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_simulated_latency() {
        let generator = MockCaptionGenerator::default();
        let started = tokio::time::Instant::now();

        generator.generate(&image()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_unreadable_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ImageFile::from_path(dir.path().join("gone.jpg"));

        let err = MockCaptionGenerator::new(Duration::ZERO)
            .generate(&missing)
            .await
            .unwrap_err();

        assert!(err.contains("gone.jpg"), "unexpected error: {}", err);
    }

    #[test]
    fn test_pool_contains_duplicates() {
        assert_eq!(CANNED_CAPTIONS.len(), 16);
        let unique: std::collections::HashSet<_> = CANNED_CAPTIONS.iter().collect();
        assert_eq!(unique.len(), 15);
    }
}
