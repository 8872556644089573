use std::{sync::Arc, time::Duration};

use videotag_core::{
    analysis::{AnalysisReport, AnalysisStage},
    events::{Envelope, EventBus, expect},
    queues::QueueKind,
    workers::{InputSpec, SubscriptionSpec, Worker},
};

use crate::workers::events::{AnalysisCompiled, AnalysisProgressed, VideoUploaded};

/// Walks through the analysis stages and emits the placeholder report.
pub struct AnalyzeVideoWorker {
    stage_delay: Duration,
}

impl AnalyzeVideoWorker {
    pub fn new(stage_delay: Duration) -> Self {
        Self { stage_delay }
    }
}

impl Worker for AnalyzeVideoWorker {
    const SUBSCRIBER_ID: &'static str = "analysis.compile";

    fn subscription() -> SubscriptionSpec {
        SubscriptionSpec {
            subscriber_id: Self::SUBSCRIBER_ID,
            inputs: vec![InputSpec {
                event_type: VideoUploaded::EVENT_TYPE,
                queue_kind: QueueKind::DropOldest { capacity: 4 },
            }],
        }
    }

    async fn handle(&mut self, envelope: Arc<Envelope>, bus: &EventBus) -> anyhow::Result<()> {
        let uploaded = expect::<VideoUploaded>(&envelope.event, VideoUploaded::EVENT_TYPE)?;
        let parent = envelope.event.event_id();

        let stages = AnalysisStage::ALL.len();
        for (i, stage) in AnalysisStage::ALL.iter().enumerate() {
            let percent = (i * 100 / stages) as u8;
            tracing::info!(file = %uploaded.file.name, stage = stage.label(), "analysis stage");
            bus.publish(Arc::new(AnalysisProgressed::new(parent, stage.label(), percent)));
            tokio::time::sleep(self.stage_delay).await;
        }

        let report = AnalysisReport::placeholder(&uploaded.file.name);
        bus.publish(Arc::new(AnalysisCompiled::new(
            parent,
            uploaded.file.clone(),
            uploaded.url.clone(),
            report,
        )));

        Ok(())
    }
}
