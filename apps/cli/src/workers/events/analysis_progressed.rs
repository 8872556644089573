use uuid::Uuid;
use videotag_core::events::EventHeader;

use crate::workers::events::impl_event;

#[derive(serde::Serialize)]
pub struct AnalysisProgressed {
    pub header: EventHeader,
    pub stage: &'static str,
    pub percent: u8,
}

impl AnalysisProgressed {
    pub const EVENT_TYPE: &'static str = "analysis.progressed";

    pub fn new(parent_event_id: Uuid, stage: &'static str, percent: u8) -> Self {
        Self {
            header: EventHeader::child_of(parent_event_id),
            stage,
            percent,
        }
    }
}

impl_event!(AnalysisProgressed);
