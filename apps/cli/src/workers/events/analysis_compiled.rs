use uuid::Uuid;
use videotag_core::{
    analysis::AnalysisReport,
    events::EventHeader,
    upload::{ObjectUrl, VideoFile},
};

use crate::workers::events::impl_event;

#[derive(Clone, serde::Serialize)]
pub struct AnalysisCompiled {
    pub header: EventHeader,
    pub file: VideoFile,
    pub url: ObjectUrl,
    pub report: AnalysisReport,
}

impl AnalysisCompiled {
    pub const EVENT_TYPE: &'static str = "analysis.compiled";

    pub fn new(
        parent_event_id: Uuid,
        file: VideoFile,
        url: ObjectUrl,
        report: AnalysisReport,
    ) -> Self {
        Self {
            header: EventHeader::child_of(parent_event_id),
            file,
            url,
            report,
        }
    }
}

impl_event!(AnalysisCompiled);
