//! Simulated video uploads.
//!
//! Nothing is transferred. A file is validated, a progress value is stepped
//! on a timer until it reaches 100, and the caller gets an [`ObjectUrl`] to
//! hand to a player.

pub mod progress;
pub mod simulator;
pub mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notify::{Toast, ToastVariant};

pub use progress::{UploadMachine, UploadState, next_progress};
pub use simulator::{UploadConfig, UploadListener, UploadSimulator};
pub use validate::{MAX_UPLOAD_BYTES, validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UploadError {
    #[error("Invalid file type: {media_type:?} is not a video")]
    InvalidFileType { media_type: String },

    #[error("File too large: {size_bytes} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size_bytes: u64, limit: u64 },
}

impl UploadError {
    pub fn toast(&self) -> Toast {
        match self {
            UploadError::InvalidFileType { .. } => Toast::new(
                "Invalid File Type",
                "Please upload a video file (MP4, MOV, AVI, etc.)",
            ),
            UploadError::FileTooLarge { .. } => Toast::new(
                "File Too Large",
                "Please upload a video smaller than 100MB",
            ),
        }
        .with_variant(ToastVariant::Destructive)
    }
}

pub fn success_toast() -> Toast {
    Toast::new(
        "Upload Successful!",
        "Your video is ready for AI-powered analysis",
    )
}

/// Formats shown next to the picker.
pub const SUPPORTED_FORMATS: [&str; 5] = ["MP4", "MOV", "AVI", "WMV", "FLV"];

/// What a picker or drop zone hands over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFile {
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub path: Option<PathBuf>,
}

impl VideoFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
            path: None,
        }
    }

    /// Describes a file on disk. The media type is guessed from the
    /// extension; unknown extensions get an empty type and fail validation.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();

        Ok(Self {
            name,
            media_type,
            size_bytes: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }
}

/// Opaque local reference to an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new() -> Self {
        Self(format!("blob:videotag/{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ObjectUrl {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_path_guesses_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, vec![0u8; 1024]).unwrap();

        let file = VideoFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "clip.mp4");
        assert_eq!(file.media_type, "video/mp4");
        assert_eq!(file.size_bytes, 1024);
        assert_eq!(file.path.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_from_path_unknown_extension_has_no_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.unknownext");
        std::fs::write(&path, b"x").unwrap();

        let file = VideoFile::from_path(&path).await.unwrap();
        assert_eq!(file.media_type, "");
    }

    #[tokio::test]
    async fn test_from_path_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(VideoFile::from_path(dir.path()).await.is_err());
    }

    #[test]
    fn test_object_urls_are_unique() {
        let a = ObjectUrl::new();
        let b = ObjectUrl::new();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("blob:videotag/"));
    }

    #[test]
    fn test_rejection_toasts_differ() {
        let invalid = UploadError::InvalidFileType {
            media_type: "image/png".into(),
        }
        .toast();
        let large = UploadError::FileTooLarge {
            size_bytes: MAX_UPLOAD_BYTES + 1,
            limit: MAX_UPLOAD_BYTES,
        }
        .toast();

        assert_ne!(invalid.title, large.title);
        assert!(invalid.is_destructive());
        assert!(large.is_destructive());
    }
}
