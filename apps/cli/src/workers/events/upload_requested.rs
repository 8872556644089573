use videotag_core::{events::EventHeader, upload::VideoFile};

use crate::workers::events::impl_event;

#[derive(serde::Serialize)]
pub struct UploadRequested {
    pub header: EventHeader,
    pub file: VideoFile,
}

impl UploadRequested {
    pub const EVENT_TYPE: &'static str = "upload.requested";

    pub fn new(file: VideoFile) -> Self {
        Self {
            header: EventHeader::root(),
            file,
        }
    }
}

impl_event!(UploadRequested);
