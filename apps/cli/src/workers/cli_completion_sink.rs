use std::sync::Arc;

use tokio::sync::oneshot;
use videotag_core::{
    events::{Envelope, EventBus, downcast_ref},
    queues::QueueKind,
    upload::UploadError,
    workers::{InputSpec, PipelineFailed, SubscriptionSpec, Worker},
};

use crate::workers::events::{AnalysisCompiled, UploadRejected};

pub enum PipelineOutcome {
    Analyzed(Box<AnalysisCompiled>),
    Rejected(UploadError),
    Failed(PipelineFailed),
}

pub struct CliCompletionSinkWorker {
    done: Option<oneshot::Sender<PipelineOutcome>>,
}

impl CliCompletionSinkWorker {
    pub fn new(done: oneshot::Sender<PipelineOutcome>) -> Self {
        Self { done: Some(done) }
    }

    fn finish(&mut self, outcome: PipelineOutcome) {
        if let Some(done) = self.done.take() {
            // receiver gone means the CLI already gave up waiting
            let _ = done.send(outcome);
        }
    }
}

impl Worker for CliCompletionSinkWorker {
    const SUBSCRIBER_ID: &'static str = "cli.completion_sink";

    fn subscription() -> SubscriptionSpec {
        SubscriptionSpec {
            subscriber_id: Self::SUBSCRIBER_ID,
            inputs: vec![
                InputSpec {
                    event_type: AnalysisCompiled::EVENT_TYPE,
                    queue_kind: QueueKind::DropOldest { capacity: 4 },
                },
                InputSpec {
                    event_type: UploadRejected::EVENT_TYPE,
                    queue_kind: QueueKind::DropOldest { capacity: 4 },
                },
                InputSpec {
                    event_type: PipelineFailed::EVENT_TYPE,
                    queue_kind: QueueKind::DropOldest { capacity: 4 },
                },
            ],
        }
    }

    async fn handle(&mut self, envelope: Arc<Envelope>, _bus: &EventBus) -> anyhow::Result<()> {
        if let Some(compiled) = downcast_ref::<AnalysisCompiled>(&envelope.event) {
            self.finish(PipelineOutcome::Analyzed(Box::new(compiled.clone())));
        }

        if let Some(rejected) = downcast_ref::<UploadRejected>(&envelope.event) {
            self.finish(PipelineOutcome::Rejected(rejected.error.clone()));
        }

        if let Some(failed) = downcast_ref::<PipelineFailed>(&envelope.event) {
            self.finish(PipelineOutcome::Failed(failed.clone()));
        }

        Ok(())
    }
}
