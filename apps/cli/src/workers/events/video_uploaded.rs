use uuid::Uuid;
use videotag_core::{
    events::EventHeader,
    upload::{ObjectUrl, VideoFile},
};

use crate::workers::events::impl_event;

#[derive(serde::Serialize)]
pub struct VideoUploaded {
    pub header: EventHeader,
    pub file: VideoFile,
    pub url: ObjectUrl,
}

impl VideoUploaded {
    pub const EVENT_TYPE: &'static str = "upload.completed";

    pub fn new(parent_event_id: Uuid, file: VideoFile, url: ObjectUrl) -> Self {
        Self {
            header: EventHeader::child_of(parent_event_id),
            file,
            url,
        }
    }
}

impl_event!(VideoUploaded);
