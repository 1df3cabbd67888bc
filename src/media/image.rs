use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Guess an image MIME type from a file extension
pub fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Encode raw bytes as a `data:` URI
pub fn to_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Contents {
    /// Bytes already in memory (camera capture, upload from a webview)
    Memory(Vec<u8>),
    /// File on disk, read on demand
    Disk(PathBuf),
}

/// An image picked by the user or captured from the camera
///
/// Disk-backed files are not read until their bytes are needed, so a file
/// that disappears after being picked fails at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    name: String,
    mime_type: String,
    contents: Contents,
}

impl ImageFile {
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            contents: Contents::Memory(bytes),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            mime_type: mime_from_extension(&path).to_string(),
            contents: Contents::Disk(path),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URI
    pub fn from_data_uri(name: impl Into<String>, uri: &str) -> Result<Self, AppError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| AppError::FileIo("Not a data URI".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| AppError::FileIo("Data URI has no payload".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| AppError::FileIo("Only base64 data URIs are supported".to_string()))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| AppError::FileIo(format!("Invalid base64 payload: {}", e)))?;

        let mime_type = if mime_type.is_empty() { "application/octet-stream" } else { mime_type };
        Ok(Self::from_bytes(name, mime_type, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Path on disk, if this file was picked from the filesystem
    pub fn path(&self) -> Option<&Path> {
        match &self.contents {
            Contents::Disk(path) => Some(path),
            Contents::Memory(_) => None,
        }
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>, AppError> {
        match &self.contents {
            Contents::Memory(bytes) => Ok(bytes.clone()),
            Contents::Disk(path) => tokio::fs::read(path)
                .await
                .map_err(|e| AppError::FileIo(format!("Failed to read {}: {}", path.display(), e))),
        }
    }

    /// Read the whole file and encode it as a data URI
    pub async fn read_data_uri(&self) -> Result<String, AppError> {
        let bytes = self.read_bytes().await?;
        Ok(to_data_uri(&self.mime_type, &bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension(Path::new("a/b/photo.JPG")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("shot.png")), "image/png");
        assert_eq!(mime_from_extension(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_in_memory_data_uri() {
        let file = ImageFile::from_bytes("camera-capture.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff]);
        assert_eq!(file.read_data_uri().await.unwrap(), "data:image/jpeg;base64,/9j/");
        assert!(file.path().is_none());
    }

    #[tokio::test]
    async fn test_disk_file_is_read_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beach.png");
        std::fs::write(&path, b"png-bytes").unwrap();

        let file = ImageFile::from_path(&path);
        assert_eq!(file.name(), "beach.png");
        assert_eq!(file.mime_type(), "image/png");
        assert_eq!(file.read_bytes().await.unwrap(), b"png-bytes");

        std::fs::remove_file(&path).unwrap();
        let err = file.read_bytes().await.unwrap_err();
        assert!(matches!(err, AppError::FileIo(_)));
    }

    #[test]
    fn test_parse_data_uri() {
        let file = ImageFile::from_data_uri("upload", "data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(file.mime_type(), "image/png");
        assert_eq!(file.contents, Contents::Memory(b"hello".to_vec()));
    }

    #[test]
    fn test_reject_malformed_data_uris() {
        assert!(ImageFile::from_data_uri("x", "https://example.com/a.png").is_err());
        assert!(ImageFile::from_data_uri("x", "data:image/png;base64").is_err());
        assert!(ImageFile::from_data_uri("x", "data:text/plain,hello").is_err());
        assert!(ImageFile::from_data_uri("x", "data:image/png;base64,***").is_err());
    }
}
