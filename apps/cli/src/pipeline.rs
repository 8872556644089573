use std::{sync::Arc, time::Duration};

use indicatif::ProgressBar;
use tokio::{
    sync::{broadcast, oneshot},
    task::JoinHandle,
};
use videotag_core::{
    events::{BusConfig, EventBus, EventBusBuilder},
    upload::{UploadConfig, VideoFile},
    workers::Worker,
};

use crate::workers::{
    analyze_video::AnalyzeVideoWorker,
    cli_completion_sink::{CliCompletionSinkWorker, PipelineOutcome},
    events::UploadRequested,
    progress_display::ProgressDisplayWorker,
    upload_video::UploadVideoWorker,
};

pub struct PipelineConfig {
    pub upload: UploadConfig,
    pub analysis_stage_delay: Duration,
}

pub struct PipelineHandle {
    pub bus: Arc<EventBus>,
    pub shutdown_tx: broadcast::Sender<()>,
    pub done_rx: oneshot::Receiver<PipelineOutcome>,
    tasks: Vec<JoinHandle<anyhow::Result<()>>>,
}

impl PipelineHandle {
    pub fn submit(&self, file: VideoFile) {
        self.bus.publish(Arc::new(UploadRequested::new(file)));
    }

    /// Signals every worker to stop and waits for them.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        // no receivers left just means every worker already exited
        let _ = self.shutdown_tx.send(());
        for task in self.tasks {
            task.await??;
        }
        Ok(())
    }
}

pub async fn start_pipeline(
    config: PipelineConfig,
    progress: ProgressBar,
) -> anyhow::Result<PipelineHandle> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let (done_tx, done_rx) = oneshot::channel::<PipelineOutcome>();

    let (bus, mut wiring) = EventBusBuilder::new(BusConfig::default())
        .subscribe(UploadVideoWorker::subscription())
        .subscribe(AnalyzeVideoWorker::subscription())
        .subscribe(ProgressDisplayWorker::subscription())
        .subscribe(CliCompletionSinkWorker::subscription())
        .build()?;
    let bus = Arc::new(bus);
    tracing::debug!(run_id = %bus.run_id(), "event bus ready");

    // start workers BEFORE anything is submitted
    let tasks = vec![
        tokio::spawn(UploadVideoWorker::new(config.upload).run(
            wiring.take(UploadVideoWorker::SUBSCRIBER_ID)?,
            Arc::clone(&bus),
            shutdown_rx.resubscribe(),
        )),
        tokio::spawn(
            AnalyzeVideoWorker::new(config.analysis_stage_delay).run(
                wiring.take(AnalyzeVideoWorker::SUBSCRIBER_ID)?,
                Arc::clone(&bus),
                shutdown_rx.resubscribe(),
            ),
        ),
        tokio::spawn(ProgressDisplayWorker::new(progress).run(
            wiring.take(ProgressDisplayWorker::SUBSCRIBER_ID)?,
            Arc::clone(&bus),
            shutdown_rx.resubscribe(),
        )),
        tokio::spawn(CliCompletionSinkWorker::new(done_tx).run(
            wiring.take(CliCompletionSinkWorker::SUBSCRIBER_ID)?,
            Arc::clone(&bus),
            shutdown_rx,
        )),
    ];
    tracing::debug!(workers = tasks.len(), "workers started");

    Ok(PipelineHandle {
        bus,
        shutdown_tx,
        done_rx,
        tasks,
    })
}
