use crate::upload::UploadError;

/// One tick of the progress curve: slow start, fast middle, slow finish.
pub fn next_progress(current: u8) -> u8 {
    let step = match current {
        0..20 => 2,
        20..80 => 8,
        _ => 1,
    };
    current.saturating_add(step).min(100)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Validating,
    Uploading(u8),
    Done,
    Rejected(UploadError),
}

impl UploadState {
    fn name(&self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::Validating => "validating",
            UploadState::Uploading(_) => "uploading",
            UploadState::Done => "done",
            UploadState::Rejected(_) => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} while {state}")]
pub struct InvalidTransition {
    pub state: &'static str,
    pub action: &'static str,
}

/// `Idle → Validating → Uploading(pct) → Done | Rejected`.
///
/// `Done` is entered by the tick that brings progress to 100, never by a
/// separate timer.
#[derive(Debug, Clone)]
pub struct UploadMachine {
    state: UploadState,
}

impl Default for UploadMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadMachine {
    pub fn new() -> Self {
        Self {
            state: UploadState::Idle,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn progress(&self) -> u8 {
        match self.state {
            UploadState::Uploading(pct) => pct,
            UploadState::Done => 100,
            _ => 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            UploadState::Validating | UploadState::Uploading(_)
        )
    }

    fn invalid(&self, action: &'static str) -> InvalidTransition {
        InvalidTransition {
            state: self.state.name(),
            action,
        }
    }

    pub fn begin(&mut self) -> Result<(), InvalidTransition> {
        if self.is_busy() {
            return Err(self.invalid("begin"));
        }
        self.state = UploadState::Validating;
        Ok(())
    }

    pub fn validated(&mut self, outcome: Result<(), UploadError>) -> Result<(), InvalidTransition> {
        if self.state != UploadState::Validating {
            return Err(self.invalid("finish validation"));
        }
        self.state = match outcome {
            Ok(()) => UploadState::Uploading(0),
            Err(e) => UploadState::Rejected(e),
        };
        Ok(())
    }

    /// Advances an upload in flight and returns the new percentage.
    pub fn tick(&mut self) -> Result<u8, InvalidTransition> {
        let UploadState::Uploading(current) = self.state else {
            return Err(self.invalid("tick"));
        };

        let next = next_progress(current);
        self.state = if next >= 100 {
            UploadState::Done
        } else {
            UploadState::Uploading(next)
        };
        Ok(next)
    }

    pub fn reset(&mut self) {
        self.state = UploadState::Idle;
    }
}
