use crate::upload::{UploadError, VideoFile};

/// 100 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Type first, then size.
pub fn validate(file: &VideoFile, max_bytes: u64) -> Result<(), UploadError> {
    if !file.media_type.contains("video/") {
        return Err(UploadError::InvalidFileType {
            media_type: file.media_type.clone(),
        });
    }

    if file.size_bytes > max_bytes {
        return Err(UploadError::FileTooLarge {
            size_bytes: file.size_bytes,
            limit: max_bytes,
        });
    }

    Ok(())
}
