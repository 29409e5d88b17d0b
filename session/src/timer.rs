//! Score timer that accumulates elapsed time in fixed quanta.

use std::time::Duration;

/// Quantum the score timer accumulates elapsed time in.
pub const TIMER_TICK: Duration = Duration::from_millis(10);

/// Elapsed-time accumulator gated by explicit start and stop.
#[derive(Debug)]
pub(crate) struct SessionTimer {
    running: bool,
    accumulator: Duration,
    elapsed: Duration,
}

impl SessionTimer {
    /// Creates a stopped timer with no accumulated time.
    pub(crate) fn new() -> Self {
        Self {
            running: false,
            accumulator: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Starts the timer. Starting a running timer is a no-op.
    pub(crate) fn start(&mut self) {
        self.running = true;
    }

    /// Stops the timer, freezing the elapsed value. Idempotent.
    pub(crate) fn stop(&mut self) {
        self.running = false;
    }

    /// Folds the provided delta into whole quanta while running.
    pub(crate) fn accumulate(&mut self, dt: Duration) {
        if !self.running {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        while self.accumulator >= TIMER_TICK {
            self.accumulator -= TIMER_TICK;
            self.elapsed = self.elapsed.saturating_add(TIMER_TICK);
        }
    }

    /// Quantized time accumulated so far.
    pub(crate) fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
