use std::{any::Any, sync::Arc, time::SystemTime};

use serde::Serialize;
use uuid::Uuid;

use crate::events::{Event, EventHeader};

#[derive(Clone, Debug, Serialize)]
pub struct PipelineFailed {
    pub header: EventHeader,
    pub stage: &'static str,
    pub failed_event_type: &'static str,
    pub message: String,
}

impl PipelineFailed {
    pub const EVENT_TYPE: &'static str = "pipeline.failed";

    pub fn new(failed: &Arc<dyn Event>, stage: &'static str, message: String) -> Self {
        Self {
            header: EventHeader::child_of(failed.event_id()),
            stage,
            failed_event_type: failed.event_type(),
            message,
        }
    }
}

impl Event for PipelineFailed {
    fn event_id(&self) -> Uuid {
        self.header.event_id
    }

    fn parent_ids(&self) -> &[Uuid] {
        &self.header.parent_ids
    }

    fn event_type(&self) -> &'static str {
        Self::EVENT_TYPE
    }

    fn timestamp(&self) -> SystemTime {
        self.header.timestamp
    }

    fn as_any(&self) -> &dyn Any {
        self as &dyn Any
    }
}
