// Location - one-shot geolocation behind a device trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Combine nullable halves; None unless both are present
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }
}

/// Options for a single position request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Prefer GPS-grade accuracy over speed
    pub high_accuracy: bool,
    /// Give up after this long
    pub timeout: Duration,
    /// Accept a cached fix at most this old
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(10_000),
            maximum_age: Duration::from_millis(300_000),
        }
    }
}

/// Platform geolocation service
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether this platform can locate the device at all
    fn is_supported(&self) -> bool;

    /// Request the current position once. Err on denial, timeout or no fix.
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates, String>;
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use std::sync::Mutex;

    pub struct FakeLocation {
        pub supported: bool,
        pub result: Result<Coordinates, String>,
        pub delay: Duration,
        pub requests: Mutex<Vec<PositionOptions>>,
    }

    impl FakeLocation {
        pub fn at(lat: f64, lng: f64) -> Self {
            Self {
                supported: true,
                result: Ok(Coordinates::new(lat, lng)),
                delay: Duration::ZERO,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                result: Err(message.to_string()),
                ..Self::at(0.0, 0.0)
            }
        }

        pub fn unsupported() -> Self {
            Self {
                supported: false,
                ..Self::at(0.0, 0.0)
            }
        }
    }

    #[async_trait]
    impl LocationProvider for FakeLocation {
        fn is_supported(&self) -> bool {
            self.supported
        }

        async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates, String> {
            self.requests.lock().unwrap().push(*options);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.result.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_both_halves() {
        assert_eq!(Coordinates::from_parts(Some(1.0), Some(2.0)), Some(Coordinates::new(1.0, 2.0)));
        assert_eq!(Coordinates::from_parts(None, Some(2.0)), None);
        assert_eq!(Coordinates::from_parts(Some(1.0), None), None);
        assert_eq!(Coordinates::from_parts(None, None), None);
    }

    #[test]
    fn test_default_position_options() {
        let options = PositionOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::from_secs(300));
    }
}
