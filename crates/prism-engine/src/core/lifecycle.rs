use anyhow::Result;

/// Program-wide phase.
///
/// ```text
/// Uninitialized -> Initialized -> Running -> ShuttingDown -> Terminated
///        \______________\____________________^  (setup failure)
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Uninitialized,
    Initialized,
    Running,
    ShuttingDown,
    Terminated,
}

/// Tracks the current [`Phase`] and the first failure that ended the run.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    failure: Option<anyhow::Error>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            failure: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whether the loop should stop (shutting down or already terminated).
    #[inline]
    pub fn should_exit(&self) -> bool {
        matches!(self.phase, Phase::ShuttingDown | Phase::Terminated)
    }

    #[inline]
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Device and window are up.
    pub fn initialized(&mut self) -> bool {
        self.advance(&[Phase::Uninitialized], Phase::Initialized)
    }

    /// Scene is built; the frame loop may start.
    pub fn running(&mut self) -> bool {
        self.advance(&[Phase::Initialized], Phase::Running)
    }

    /// User quit (close request or quit key).
    pub fn shutdown(&mut self) -> bool {
        self.advance(
            &[Phase::Uninitialized, Phase::Initialized, Phase::Running],
            Phase::ShuttingDown,
        )
    }

    /// Records a failure and short-circuits to `ShuttingDown`.
    ///
    /// Only the first failure is kept.
    pub fn fail(&mut self, err: anyhow::Error) {
        log::debug!("lifecycle: {:?} failed: {err}", self.phase);
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        if !self.should_exit() {
            self.phase = Phase::ShuttingDown;
        }
    }

    /// Resources are released.
    pub fn terminate(&mut self) -> bool {
        self.advance(&[Phase::ShuttingDown], Phase::Terminated)
    }

    /// Consumes the lifecycle, yielding the recorded failure if any.
    pub fn finish(self) -> Result<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn advance(&mut self, from: &[Phase], to: Phase) -> bool {
        if from.contains(&self.phase) {
            log::debug!("lifecycle: {:?} -> {to:?}", self.phase);
            self.phase = to;
            true
        } else {
            log::warn!("lifecycle: ignoring {:?} -> {to:?}", self.phase);
            false
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
