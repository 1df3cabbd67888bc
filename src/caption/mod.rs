// Caption module - caption suggestions for uploaded images

pub mod mock_provider;
pub mod provider;

pub use mock_provider::{MockCaptionGenerator, CANNED_CAPTIONS};
pub use provider::CaptionGenerator;
