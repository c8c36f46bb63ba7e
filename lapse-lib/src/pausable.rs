//! A timer that can be paused and resumed.
//!
//! Completed pauses are excluded from the measured span. The correction is
//! applied lazily: [`PausableTimer::unpause`] only records how long the pause
//! lasted, and the start point is shifted by that amount on the next
//! [`pause`](PausableTimer::pause) or [`stop`](PausableTimer::stop).

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::clock::{Clock, MonotonicClock};
use crate::unit::TimeUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running { start: Instant },
    Paused { start: Instant, paused_at: Instant },
    /// Running again after a pause whose length is not yet folded into `start`.
    Resumed { start: Instant, idle: Duration },
    Stopped { start: Instant, end: Instant },
}

#[derive(Debug, Clone)]
pub struct PausableTimer<C: Clock = MonotonicClock> {
    clock: C,
    state: State,
}

impl PausableTimer {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl Default for PausableTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> PausableTimer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: State::Idle,
        }
    }

    /// Begin a new span, discarding whatever the timer was doing.
    pub fn start(&mut self) {
        self.state = State::Running {
            start: self.clock.now(),
        };
    }

    /// Suspend measuring. Does nothing unless the timer is running unpaused.
    pub fn pause(&mut self) {
        let now = self.clock.now();

        let start = match self.state {
            State::Running { start } => start,
            State::Resumed { start, idle } => start + idle,
            _ => {
                debug!("pausable timer: pause ignored, not running");
                return;
            }
        };
        self.state = State::Paused {
            start,
            paused_at: now,
        };
        trace!("pausable timer: paused");
    }

    /// Resume measuring. Does nothing unless the timer is paused.
    pub fn unpause(&mut self) {
        let State::Paused { start, paused_at } = self.state else {
            debug!("pausable timer: unpause ignored, not paused");
            return;
        };

        // Sample last; the start point is corrected at the next boundary.
        let now = self.clock.now();
        self.state = State::Resumed {
            start,
            idle: now.saturating_duration_since(paused_at),
        };
    }

    /// End measuring. Does nothing if the timer was never started or is
    /// already stopped.
    ///
    /// A pause that is still open when the timer stops counts toward the span.
    pub fn stop(&mut self) {
        let now = self.clock.now();

        let (start, end) = match self.state {
            State::Running { start } => (start, now),
            State::Resumed { start, idle } => (start + idle, now),
            State::Paused { start, .. } => (start, now),
            State::Idle | State::Stopped { .. } => {
                debug!("pausable timer: stop ignored, not running");
                return;
            }
        };
        self.state = State::Stopped { start, end };
        trace!(
            "pausable timer: stopped after {:?}",
            end.saturating_duration_since(start)
        );
    }

    /// Whole `unit`s in the measured span, or 0 if the timer is not stopped.
    pub fn get_time(&self, unit: TimeUnit) -> u128 {
        self.elapsed().map_or(0, |span| unit.count(span))
    }

    pub fn millis(&self) -> u128 {
        self.get_time(TimeUnit::default())
    }

    /// The measured span with pauses removed, once stopped.
    pub fn elapsed(&self) -> Option<Duration> {
        match self.state {
            State::Stopped { start, end } => Some(end.saturating_duration_since(start)),
            _ => None,
        }
    }

    /// True from `start` until `stop`, including while paused.
    pub fn is_running(&self) -> bool {
        matches!(
            self.state,
            State::Running { .. } | State::Paused { .. } | State::Resumed { .. }
        )
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, State::Paused { .. })
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.state, State::Stopped { .. })
    }

    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
