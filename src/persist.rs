//! Write throttling for snapshot persistence.
//!
//! Operations that change intent (play, pause, seek, volume, track) write
//! straight away. Progress ticks arrive several times a second while playing,
//! so they go through [`PersistSchedule::due`] and leave a pending write
//! behind when they are too close to the previous one.

#[derive(Debug, Clone)]
pub struct PersistSchedule {
    interval_ms: f64,
    last_write_ms: Option<f64>,
    pending: bool,
}

impl PersistSchedule {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms as f64,
            last_write_ms: None,
            pending: false,
        }
    }

    /// Whether a throttled write may happen at `now_ms`. Marks a pending write otherwise.
    pub fn due(&mut self, now_ms: f64) -> bool {
        let due = match self.last_write_ms {
            Some(last) => now_ms - last >= self.interval_ms,
            None => true,
        };
        if !due {
            self.pending = true;
        }
        due
    }

    pub fn record_write(&mut self, now_ms: f64) {
        self.last_write_ms = Some(now_ms);
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
