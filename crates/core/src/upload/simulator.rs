use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::upload::{
    ObjectUrl, UploadError, UploadMachine, UploadState, VideoFile, validate::MAX_UPLOAD_BYTES,
    validate::validate,
};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub tick_interval: Duration,
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

/// Receives progress while an upload runs and the result once it lands.
pub trait UploadListener: Send {
    fn on_progress(&mut self, _percent: u8) {}

    fn on_complete(&mut self, file: &VideoFile, url: &ObjectUrl);
}

pub struct UploadSimulator {
    config: UploadConfig,
    machine: UploadMachine,
}

impl UploadSimulator {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            config,
            machine: UploadMachine::new(),
        }
    }

    pub fn state(&self) -> &UploadState {
        self.machine.state()
    }

    pub fn progress(&self) -> u8 {
        self.machine.progress()
    }

    /// Validates `file`, then steps progress once per tick until it reaches
    /// 100. The listener's `on_complete` runs exactly once on success and
    /// never on rejection. Progress is back at 0 when this returns.
    ///
    /// The ticker belongs to this future; dropping it mid-upload stops the
    /// ticks, though the machine is then left in `Uploading`.
    pub async fn upload(
        &mut self,
        file: VideoFile,
        listener: &mut dyn UploadListener,
    ) -> Result<ObjectUrl, UploadError> {
        if self.machine.is_busy() {
            // an abandoned run never reached reset
            self.machine.reset();
        }
        self.machine
            .begin()
            .expect("machine is idle or finished after reset");

        let outcome = validate(&file, self.config.max_bytes);
        self.machine
            .validated(outcome.clone())
            .expect("machine is validating");

        if let Err(e) = outcome {
            tracing::info!(file = %file.name, error = %e, "upload rejected");
            return Err(e);
        }

        tracing::info!(
            file = %file.name,
            media_type = %file.media_type,
            size_bytes = file.size_bytes,
            "upload started"
        );

        let period = self.config.tick_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while matches!(self.machine.state(), UploadState::Uploading(_)) {
            ticker.tick().await;
            let percent = self.machine.tick().expect("machine is uploading");
            tracing::trace!(file = %file.name, percent, "upload progress");
            listener.on_progress(percent);
        }

        let url = ObjectUrl::new();
        tracing::info!(file = %file.name, %url, "upload complete");
        listener.on_complete(&file, &url);
        self.machine.reset();

        Ok(url)
    }
}

impl Default for UploadSimulator {
    fn default() -> Self {
        Self::new(UploadConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        progress: Vec<u8>,
        completions: Vec<(VideoFile, ObjectUrl)>,
    }

    impl UploadListener for Recorder {
        fn on_progress(&mut self, percent: u8) {
            self.progress.push(percent);
        }

        fn on_complete(&mut self, file: &VideoFile, url: &ObjectUrl) {
            self.completions.push((file.clone(), url.clone()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_upload_completes_once() {
        let mut simulator = UploadSimulator::default();
        let mut recorder = Recorder::default();
        let file = VideoFile::new("launch.mp4", "video/mp4", 5 * 1024 * 1024);

        let started = Instant::now();
        let url = simulator.upload(file.clone(), &mut recorder).await.unwrap();

        assert_eq!(started.elapsed(), DEFAULT_TICK_INTERVAL * 34);
        assert_eq!(recorder.progress.len(), 34);
        assert_eq!(recorder.progress.first(), Some(&2));
        assert_eq!(recorder.progress.last(), Some(&100));
        assert!(recorder.progress.windows(2).all(|w| w[0] <= w[1]));

        assert_eq!(recorder.completions, vec![(file, url)]);
        assert_eq!(simulator.progress(), 0);
        assert_eq!(simulator.state(), &UploadState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_upload_never_ticks() {
        let mut simulator = UploadSimulator::default();
        let mut recorder = Recorder::default();

        let started = Instant::now();
        let err = simulator
            .upload(VideoFile::new("notes.txt", "text/plain", 10), &mut recorder)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::InvalidFileType { .. }));
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert!(recorder.progress.is_empty());
        assert!(recorder.completions.is_empty());
        assert!(matches!(simulator.state(), UploadState::Rejected(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_video_rejected() {
        let mut simulator = UploadSimulator::default();
        let mut recorder = Recorder::default();

        let err = simulator
            .upload(
                VideoFile::new("huge.mov", "video/quicktime", MAX_UPLOAD_BYTES + 1),
                &mut recorder,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::FileTooLarge { .. }));
        assert!(recorder.completions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulator_is_reusable_after_rejection() {
        let mut simulator = UploadSimulator::default();
        let mut recorder = Recorder::default();

        let _ = simulator
            .upload(VideoFile::new("a.png", "image/png", 1), &mut recorder)
            .await;
        simulator
            .upload(VideoFile::new("b.mp4", "video/mp4", 1), &mut recorder)
            .await
            .unwrap();

        assert_eq!(recorder.completions.len(), 1);
        assert_eq!(recorder.completions[0].0.name, "b.mp4");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_upload_can_restart() {
        let mut simulator = UploadSimulator::default();
        let mut recorder = Recorder::default();

        let file = VideoFile::new("c.mp4", "video/mp4", 1);
        let _ = tokio::time::timeout(
            Duration::from_millis(500),
            simulator.upload(file.clone(), &mut recorder),
        )
        .await;
        assert!(recorder.completions.is_empty());

        simulator.upload(file, &mut recorder).await.unwrap();
        assert_eq!(recorder.completions.len(), 1);
    }
}
