use thiserror::Error;

/// Application error types for Vistagram
///
/// The Display text of each variant is what the user sees when the error
/// is surfaced (alert, command error string).
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing the durable key-value store failed
    #[error("Storage operation failed: {0}")]
    Storage(String),

    /// Reverse geocoding request failed or returned garbage
    #[error("Failed to detect location: {0}")]
    Geocoding(String),

    /// Caption generation failed (image could not be read)
    #[error("Failed to generate caption: {0}")]
    Caption(String),

    /// Permission denied (camera or geolocation access)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A device capability is missing on this platform
    #[error("Not supported on this device: {0}")]
    DeviceUnavailable(String),

    /// File I/O operation failed (read, write, delete)
    #[error("File operation failed: {0}")]
    FileIo(String),

    /// A post could not be built from the given fields
    #[error("Invalid post: {0}")]
    InvalidPost(String),

    /// Settings failed validation or could not be persisted
    #[error("Settings error: {0}")]
    Settings(String),

    /// JSON encoding or decoding failed
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}
