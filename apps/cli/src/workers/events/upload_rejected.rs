use uuid::Uuid;
use videotag_core::{events::EventHeader, upload::UploadError};

use crate::workers::events::impl_event;

#[derive(serde::Serialize)]
pub struct UploadRejected {
    pub header: EventHeader,
    pub file_name: String,
    pub error: UploadError,
}

impl UploadRejected {
    pub const EVENT_TYPE: &'static str = "upload.rejected";

    pub fn new(parent_event_id: Uuid, file_name: String, error: UploadError) -> Self {
        Self {
            header: EventHeader::child_of(parent_event_id),
            file_name,
            error,
        }
    }
}

impl_event!(UploadRejected);
