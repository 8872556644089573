use std::sync::Arc;

use indicatif::ProgressBar;
use videotag_core::{
    events::{Envelope, EventBus, downcast_ref},
    queues::QueueKind,
    workers::{InputSpec, SubscriptionSpec, Worker},
};

use crate::workers::events::{AnalysisProgressed, UploadProgressed};

/// Mirrors upload and analysis progress onto a terminal bar. Only the newest
/// value of each matters, so both inputs are latest-value slots.
pub struct ProgressDisplayWorker {
    bar: ProgressBar,
}

impl ProgressDisplayWorker {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl Worker for ProgressDisplayWorker {
    const SUBSCRIBER_ID: &'static str = "cli.progress_display";

    fn subscription() -> SubscriptionSpec {
        SubscriptionSpec {
            subscriber_id: Self::SUBSCRIBER_ID,
            inputs: vec![
                InputSpec {
                    event_type: UploadProgressed::EVENT_TYPE,
                    queue_kind: QueueKind::Latest,
                },
                InputSpec {
                    event_type: AnalysisProgressed::EVENT_TYPE,
                    queue_kind: QueueKind::Latest,
                },
            ],
        }
    }

    async fn handle(&mut self, envelope: Arc<Envelope>, _bus: &EventBus) -> anyhow::Result<()> {
        if let Some(progress) = downcast_ref::<UploadProgressed>(&envelope.event) {
            self.bar.set_message(format!("Uploading {}", progress.file_name));
            self.bar.set_position(u64::from(progress.percent));
        }

        if let Some(progress) = downcast_ref::<AnalysisProgressed>(&envelope.event) {
            self.bar.set_message(progress.stage);
            self.bar.set_position(u64::from(progress.percent));
        }

        Ok(())
    }
}
