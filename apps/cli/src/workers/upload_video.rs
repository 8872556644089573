use std::sync::Arc;

use uuid::Uuid;
use videotag_core::{
    events::{Envelope, EventBus, expect},
    queues::QueueKind,
    upload::{ObjectUrl, UploadConfig, UploadListener, UploadSimulator, VideoFile},
    workers::{InputSpec, SubscriptionSpec, Worker},
};

use crate::workers::events::{UploadProgressed, UploadRejected, UploadRequested, VideoUploaded};

pub struct UploadVideoWorker {
    simulator: UploadSimulator,
}

impl UploadVideoWorker {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            simulator: UploadSimulator::new(config),
        }
    }
}

/// Turns simulator callbacks into bus events.
struct BusListener<'a> {
    bus: &'a EventBus,
    parent: Uuid,
    file_name: &'a str,
}

impl UploadListener for BusListener<'_> {
    fn on_progress(&mut self, percent: u8) {
        self.bus.publish(Arc::new(UploadProgressed::new(
            self.parent,
            self.file_name.to_string(),
            percent,
        )));
    }

    fn on_complete(&mut self, file: &VideoFile, url: &ObjectUrl) {
        self.bus.publish(Arc::new(VideoUploaded::new(
            self.parent,
            file.clone(),
            url.clone(),
        )));
    }
}

impl Worker for UploadVideoWorker {
    const SUBSCRIBER_ID: &'static str = "upload.simulate";

    fn subscription() -> SubscriptionSpec {
        SubscriptionSpec {
            subscriber_id: Self::SUBSCRIBER_ID,
            inputs: vec![InputSpec {
                event_type: UploadRequested::EVENT_TYPE,
                queue_kind: QueueKind::DropOldest { capacity: 4 },
            }],
        }
    }

    async fn handle(&mut self, envelope: Arc<Envelope>, bus: &EventBus) -> anyhow::Result<()> {
        let req = expect::<UploadRequested>(&envelope.event, UploadRequested::EVENT_TYPE)?;
        let parent = envelope.event.event_id();

        let mut listener = BusListener {
            bus,
            parent,
            file_name: &req.file.name,
        };
        if let Err(error) = self.simulator.upload(req.file.clone(), &mut listener).await {
            bus.publish(Arc::new(UploadRejected::new(
                parent,
                req.file.name.clone(),
                error,
            )));
        }

        Ok(())
    }
}
