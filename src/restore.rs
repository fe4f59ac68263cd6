//! Restore sequence: reattach a fresh output handle to the persisted
//! position and intent once the media data is available.
//!
//! ```text
//! Idle -> AwaitingData -> Resuming -> Ready
//!              |             |
//!              +-------------+--> Abandoned
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestorePhase {
    Idle,
    /// Source set, waiting for the first `loadeddata`
    AwaitingData,
    /// Resume play request in flight
    Resuming { generation: u64 },
    Ready,
    /// Cancelled, or the media failed before data arrived
    Abandoned,
}

#[derive(Debug, Clone)]
pub struct RestoreSequence {
    phase: RestorePhase,
}

impl Default for RestoreSequence {
    fn default() -> Self {
        Self {
            phase: RestorePhase::Idle,
        }
    }
}

impl RestoreSequence {
    pub fn phase(&self) -> RestorePhase {
        self.phase
    }

    pub fn begin(&mut self) {
        self.phase = RestorePhase::AwaitingData;
    }

    /// Consume the one-shot data-ready continuation. Returns `false` if it already ran
    /// or the sequence is not waiting for data.
    pub fn take_data_ready(&mut self) -> bool {
        if self.phase == RestorePhase::AwaitingData {
            self.phase = RestorePhase::Ready;
            true
        } else {
            false
        }
    }

    pub fn resuming(&mut self, generation: u64) {
        self.phase = RestorePhase::Resuming { generation };
    }

    /// Resume request resolved, successfully or not.
    pub fn settle(&mut self, generation: u64) {
        if self.phase == (RestorePhase::Resuming { generation }) {
            self.phase = RestorePhase::Ready;
        }
    }

    /// Cancel a pending sequence. Returns `true` if something was pending.
    pub fn cancel(&mut self) -> bool {
        match self.phase {
            RestorePhase::AwaitingData | RestorePhase::Resuming { .. } => {
                self.phase = RestorePhase::Abandoned;
                true
            }
            _ => false,
        }
    }
}
