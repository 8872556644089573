use uuid::Uuid;
use videotag_core::events::EventHeader;

use crate::workers::events::impl_event;

#[derive(serde::Serialize)]
pub struct UploadProgressed {
    pub header: EventHeader,
    pub file_name: String,
    pub percent: u8,
}

impl UploadProgressed {
    pub const EVENT_TYPE: &'static str = "upload.progressed";

    pub fn new(parent_event_id: Uuid, file_name: String, percent: u8) -> Self {
        Self {
            header: EventHeader::child_of(parent_event_id),
            file_name,
            percent,
        }
    }
}

impl_event!(UploadProgressed);
