// UploadForm - image, location and caption acquisition for a new post

use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::notifier::Notifier;
use crate::caption::CaptionGenerator;
use crate::error::AppError;
use crate::feed::NewPost;
use crate::media::{
    CameraDevice, CameraSession, Coordinates, FacingMode, ImageFile, LocationProvider,
    PositionOptions,
};
use crate::poi::{PoiResolver, PoiState};

pub const CAMERA_ERROR_MESSAGE: &str = "Unable to access camera. Please check permissions.";
pub const LOCATION_UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported by this browser.";
pub const LOCATION_ERROR_MESSAGE: &str = "Unable to get your location. Please try again.";

/// Where the form is in its lifecycle
///
/// Location and caption are optional extras on top of an acquired image, so
/// they are exposed as flags on `FormSnapshot` rather than as phases.
/// A successful `submit` returns the form to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormPhase {
    /// No image yet
    Idle,
    /// Camera is open (or opening) and no image has been taken
    Capturing,
    /// Image present, caption blank
    ImageAcquired,
    /// Image present and caption non-blank
    Submittable,
}

/// Read-only copy of the form state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub phase: FormPhase,
    pub image: Option<String>,
    pub caption: String,
    pub coordinates: Option<Coordinates>,
    pub picked_path: Option<PathBuf>,
    pub is_capturing: bool,
    pub getting_location: bool,
    pub caption_loading: bool,
    pub caption_error: Option<String>,
}

#[derive(Default)]
struct FormState {
    /// Data URI used for preview and submission
    image: Option<String>,
    /// The same image as a file, for caption generation
    file: Option<ImageFile>,
    caption: String,
    coordinates: Option<Coordinates>,
    /// Path shown by the file picker; cleared on reset and on camera capture
    picked_path: Option<PathBuf>,
    is_capturing: bool,
    camera: Option<CameraSession>,
    getting_location: bool,
    caption_loading: bool,
    caption_error: Option<String>,
}

impl FormState {
    fn phase(&self) -> FormPhase {
        match &self.image {
            None if self.is_capturing => FormPhase::Capturing,
            None => FormPhase::Idle,
            Some(_) if self.caption.trim().is_empty() => FormPhase::ImageAcquired,
            Some(_) => FormPhase::Submittable,
        }
    }

    fn stop_camera(&mut self) {
        if let Some(mut session) = self.camera.take() {
            session.stop();
        }
        self.is_capturing = false;
    }
}

/// Collects an image, an optional location and a caption, then emits a `NewPost`
///
/// All methods take `&self`; state lives behind a mutex that is never held
/// across an await, so flags such as `getting_location` are observable
/// while the corresponding device call is in flight.
///
/// `submit` and `reset` start a new session. File reads, camera opens,
/// caption requests and location requests that were started in an earlier
/// session drop their results when they complete.
pub struct UploadForm {
    camera: Arc<dyn CameraDevice>,
    location: Arc<dyn LocationProvider>,
    resolver: Arc<PoiResolver>,
    captions: Arc<dyn CaptionGenerator>,
    notifier: Arc<dyn Notifier>,
    position_options: PositionOptions,
    state: Mutex<FormState>,
    /// Bumped under the state lock by `submit` and `reset`
    session: AtomicU64,
}

impl UploadForm {
    pub fn new(
        camera: Arc<dyn CameraDevice>,
        location: Arc<dyn LocationProvider>,
        resolver: Arc<PoiResolver>,
        captions: Arc<dyn CaptionGenerator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            camera,
            location,
            resolver,
            captions,
            notifier,
            position_options: PositionOptions::default(),
            state: Mutex::new(FormState::default()),
            session: AtomicU64::new(0),
        }
    }

    pub fn with_position_options(mut self, options: PositionOptions) -> Self {
        self.position_options = options;
        self
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn current_session(&self) -> u64 {
        self.session.load(Ordering::SeqCst)
    }

    /// Clear all state and start a new session. Caller holds the state lock.
    fn start_new_session(&self, state: &mut FormState) {
        state.stop_camera();
        *state = FormState::default();
        self.session.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let state = self.lock();
        FormSnapshot {
            phase: state.phase(),
            image: state.image.clone(),
            caption: state.caption.clone(),
            coordinates: state.coordinates,
            picked_path: state.picked_path.clone(),
            is_capturing: state.is_capturing,
            getting_location: state.getting_location,
            caption_loading: state.caption_loading,
            caption_error: state.caption_error.clone(),
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.lock().phase()
    }

    /// Image present and caption non-blank
    pub fn can_submit(&self) -> bool {
        self.phase() == FormPhase::Submittable
    }

    /// Current resolver state for the form's coordinates
    pub fn poi_state(&self) -> PoiState {
        self.resolver.state()
    }

    // --- image ---

    /// Use a file from disk as the post image
    pub async fn pick_file(&self, path: impl Into<PathBuf>) -> Result<(), AppError> {
        self.select_file(ImageFile::from_path(path)).await
    }

    /// Use `file` as the post image
    ///
    /// The file is read in full up front. On failure the previous image stays.
    pub async fn select_file(&self, file: ImageFile) -> Result<(), AppError> {
        let session = self.current_session();
        let data_uri = file.read_data_uri().await?;

        let mut state = self.lock();
        if self.current_session() != session {
            tracing::debug!("Form: discarding file read from a previous session");
            return Ok(());
        }
        state.picked_path = file.path().map(|p| p.to_path_buf());
        state.image = Some(data_uri);
        state.file = Some(file);
        tracing::debug!(picked = ?state.picked_path, "Form: image selected");
        Ok(())
    }

    /// Open the rear camera
    ///
    /// On failure the user is alerted, capturing is cleared, and
    /// `PermissionDenied` is returned. Calling this while the camera is
    /// already open does nothing.
    pub async fn start_camera(&self) -> Result<(), AppError> {
        let session = {
            let mut state = self.lock();
            if state.is_capturing {
                return Ok(());
            }
            state.is_capturing = true;
            self.current_session()
        };

        match self.camera.open(FacingMode::Environment).await {
            Ok(stream) => {
                let mut camera = CameraSession::new(stream);
                let mut state = self.lock();
                if !state.is_capturing || self.current_session() != session {
                    // Cancelled while the device was opening
                    camera.stop();
                    return Ok(());
                }
                state.camera = Some(camera);
                tracing::debug!("Form: camera started");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Form: camera unavailable");
                {
                    let mut state = self.lock();
                    if self.current_session() == session {
                        state.is_capturing = false;
                    }
                }
                self.notifier.alert(CAMERA_ERROR_MESSAGE);
                Err(AppError::PermissionDenied(e))
            }
        }
    }

    /// Freeze the current camera frame as the post image
    ///
    /// The camera is released whether or not the frame could be read.
    pub fn capture_photo(&self) -> Result<(), AppError> {
        let mut state = self.lock();
        let session = state
            .camera
            .take()
            .ok_or_else(|| AppError::DeviceUnavailable("Camera is not running".to_string()))?;
        state.is_capturing = false;

        let photo = session.capture().map_err(|e| {
            tracing::warn!(error = %e, "Form: frame capture failed");
            AppError::DeviceUnavailable(e)
        })?;

        state.image = Some(photo.data_uri);
        state.file = Some(photo.file);
        state.picked_path = None;
        tracing::debug!("Form: photo captured");
        Ok(())
    }

    /// Close the camera without taking a photo
    pub fn stop_camera(&self) {
        self.lock().stop_camera();
    }

    // --- caption ---

    pub fn set_caption(&self, caption: impl Into<String>) {
        self.lock().caption = caption.into();
    }

    /// Ask the caption generator for a caption and put it in the caption field
    ///
    /// Returns `Ok(None)` without calling the generator when there is no
    /// image file yet, and when the form was submitted or reset while the
    /// caption was being generated.
    pub async fn generate_caption(&self) -> Result<Option<String>, AppError> {
        let (file, session) = {
            let mut state = self.lock();
            let Some(file) = state.file.clone() else {
                return Ok(None);
            };
            state.caption_loading = true;
            state.caption_error = None;
            (file, self.current_session())
        };

        let result = self.captions.generate(&file).await;

        let mut state = self.lock();
        if self.current_session() != session {
            tracing::debug!("Form: discarding caption from a previous session");
            return Ok(None);
        }
        state.caption_loading = false;
        match result {
            Ok(caption) => {
                state.caption = caption.clone();
                Ok(Some(caption))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Form: caption generation failed");
                state.caption_error = Some(e.clone());
                Err(AppError::Caption(e))
            }
        }
    }

    // --- location ---

    /// Locate the device once and resolve the place label for it
    ///
    /// Unsupported platforms and failed or timed-out requests alert the user
    /// and leave the previous coordinates in place. A fix that arrives after
    /// the form was submitted or reset is dropped.
    pub async fn acquire_location(&self) -> Result<PoiState, AppError> {
        if !self.location.is_supported() {
            self.notifier.alert(LOCATION_UNSUPPORTED_MESSAGE);
            return Err(AppError::DeviceUnavailable("geolocation".to_string()));
        }

        let session = {
            let mut state = self.lock();
            state.getting_location = true;
            self.current_session()
        };

        let options = self.position_options;
        let result = tokio::time::timeout(options.timeout, self.location.current_position(&options)).await;

        let coordinates = {
            let mut state = self.lock();
            if self.current_session() != session {
                tracing::debug!("Form: discarding location from a previous session");
                return Ok(self.resolver.state());
            }
            state.getting_location = false;
            match result {
                Ok(Ok(coordinates)) => {
                    state.coordinates = Some(coordinates);
                    coordinates
                }
                Ok(Err(e)) => {
                    drop(state);
                    tracing::warn!(error = %e, "Form: location request failed");
                    self.notifier.alert(LOCATION_ERROR_MESSAGE);
                    return Err(AppError::PermissionDenied(e));
                }
                Err(_) => {
                    drop(state);
                    tracing::warn!(timeout = ?options.timeout, "Form: location request timed out");
                    self.notifier.alert(LOCATION_ERROR_MESSAGE);
                    return Err(AppError::DeviceUnavailable("location request timed out".to_string()));
                }
            }
        };

        tracing::debug!(lat = coordinates.lat, lng = coordinates.lng, "Form: location acquired");
        let resolved = self.resolver.set_coordinates(Some(coordinates)).await;

        if self.current_session() != session {
            // Submitted or reset while resolving; follow the form's own coordinates
            let current = self.lock().coordinates;
            return Ok(self.resolver.set_coordinates(current).await);
        }
        Ok(resolved)
    }

    /// Drop the location and its label
    pub async fn clear_location(&self) -> PoiState {
        self.lock().coordinates = None;
        self.resolver.clear().await
    }

    // --- submit ---

    /// Emit the post and reset the form
    ///
    /// Returns `None` and changes nothing unless the form is submittable.
    /// The caption is trimmed; the place label is whatever the resolver last
    /// produced.
    pub async fn submit(&self) -> Option<NewPost> {
        let new_post = {
            let mut state = self.lock();
            if state.phase() != FormPhase::Submittable {
                return None;
            }
            let image = state.image.take()?;
            let new_post = NewPost {
                image,
                caption: state.caption.trim().to_string(),
                poi: self.resolver.poi(),
            };
            self.start_new_session(&mut state);
            new_post
        };

        self.resolver.clear().await;
        tracing::debug!(has_poi = new_post.poi.is_some(), "Form: submitted");
        Some(new_post)
    }

    /// Discard everything, including any open camera
    pub async fn reset(&self) {
        {
            let mut state = self.lock();
            self.start_new_session(&mut state);
        }
        self.resolver.clear().await;
    }
}
