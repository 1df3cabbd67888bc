// Camera capture - live stream acquisition and single-frame capture

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::image::{to_data_uri, ImageFile};

/// File name given to photos taken with the camera
pub const CAPTURE_FILE_NAME: &str = "camera-capture.jpg";

/// Which camera to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front camera
    User,
    /// Rear camera
    Environment,
}

/// A single frozen video frame, JPEG-encoded by the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

/// Camera hardware (or the platform's media-devices API)
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Request a live video stream. Err when permission is denied or no camera exists.
    async fn open(&self, facing: FacingMode) -> Result<Box<dyn MediaStream>, String>;
}

/// A live video stream made of one or more tracks
pub trait MediaStream: Send {
    /// Freeze the current frame
    fn capture_frame(&mut self) -> Result<Frame, String>;

    /// Stop every track. Must be idempotent.
    fn stop_all_tracks(&mut self);

    /// Number of tracks still running
    fn active_tracks(&self) -> usize;
}

/// A captured photo in both forms the upload form needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// `data:image/jpeg;base64,...` for preview and submission
    pub data_uri: String,
    /// The same bytes as a file, for caption generation
    pub file: ImageFile,
}

impl From<Frame> for CapturedPhoto {
    fn from(frame: Frame) -> Self {
        Self {
            data_uri: to_data_uri("image/jpeg", &frame.jpeg),
            file: ImageFile::from_bytes(CAPTURE_FILE_NAME, "image/jpeg", frame.jpeg),
        }
    }
}

/// Owns an open stream and guarantees its tracks get stopped
///
/// Tracks are stopped on `stop`, after `capture`, and on drop.
pub struct CameraSession {
    stream: Option<Box<dyn MediaStream>>,
}

impl CameraSession {
    pub fn new(stream: Box<dyn MediaStream>) -> Self {
        Self { stream: Some(stream) }
    }

    pub fn is_live(&self) -> bool {
        self.stream.as_ref().map_or(false, |s| s.active_tracks() > 0)
    }

    /// Freeze a frame and release the camera, whether or not the frame was usable
    pub fn capture(mut self) -> Result<CapturedPhoto, String> {
        let frame = match self.stream.as_mut() {
            Some(stream) => stream.capture_frame(),
            None => Err("Camera stream already stopped".to_string()),
        };
        self.stop();
        frame.map(CapturedPhoto::from)
    }

    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_all_tracks();
            tracing::debug!("Camera: all tracks stopped");
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Shared view of how many tracks a fake stream still has running
    #[derive(Clone, Default)]
    pub struct TrackCounter(pub Arc<AtomicUsize>);

    impl TrackCounter {
        pub fn active(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    pub struct FakeStream {
        pub tracks: TrackCounter,
        pub frame: Result<Frame, String>,
    }

    impl MediaStream for FakeStream {
        fn capture_frame(&mut self) -> Result<Frame, String> {
            self.frame.clone()
        }

        fn stop_all_tracks(&mut self) {
            self.tracks.0.store(0, Ordering::SeqCst);
        }

        fn active_tracks(&self) -> usize {
            self.tracks.active()
        }
    }

    pub struct FakeCamera {
        pub deny: bool,
        pub tracks: TrackCounter,
        pub frame: Result<Frame, String>,
        pub opened_with: std::sync::Mutex<Vec<FacingMode>>,
    }

    impl FakeCamera {
        pub fn granting(frame: Result<Frame, String>) -> Self {
            Self {
                deny: false,
                tracks: TrackCounter::default(),
                frame,
                opened_with: std::sync::Mutex::new(Vec::new()),
            }
        }

        pub fn denying() -> Self {
            Self {
                deny: true,
                ..Self::granting(Err("unused".to_string()))
            }
        }
    }

    #[async_trait]
    impl CameraDevice for FakeCamera {
        async fn open(&self, facing: FacingMode) -> Result<Box<dyn MediaStream>, String> {
            self.opened_with.lock().unwrap().push(facing);
            if self.deny {
                return Err("NotAllowedError: Permission denied".to_string());
            }
            self.tracks.0.store(1, Ordering::SeqCst);
            Ok(Box::new(FakeStream {
                tracks: self.tracks.clone(),
                frame: self.frame.clone(),
            }))
        }
    }

    pub fn jpeg_frame() -> Frame {
        Frame {
            width: 4,
            height: 3,
            jpeg: vec![0xff, 0xd8, 0xff, 0xe0],
        }
    }
}
