use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::clock::{Clock, MonotonicClock};
use crate::unit::TimeUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running { start: Instant },
    Stopped { start: Instant, end: Instant },
}

/// Measures a single span between [`start`](Timer::start) and
/// [`stop`](Timer::stop).
///
/// Queries made before the span is closed return the zero sentinel instead of
/// a partial reading.
#[derive(Debug, Clone)]
pub struct Timer<C: Clock = MonotonicClock> {
    clock: C,
    state: State,
}

impl Timer {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Timer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: State::Idle,
        }
    }

    /// Begin measuring. Does nothing if the timer is already running.
    ///
    /// A stopped timer starts a fresh span.
    pub fn start(&mut self) {
        if let State::Running { .. } = self.state {
            debug!("timer: start ignored, already running");
            return;
        }

        // Sample last so the branch above is not part of the span.
        self.state = State::Running {
            start: self.clock.now(),
        };
    }

    /// End measuring. Does nothing unless the timer is running.
    pub fn stop(&mut self) {
        // Sample first so the branch below is not part of the span.
        let now = self.clock.now();

        match self.state {
            State::Running { start } => {
                self.state = State::Stopped { start, end: now };
                trace!("timer: stopped after {:?}", now - start);
            }
            _ => debug!("timer: stop ignored, not running"),
        }
    }

    /// Whole `unit`s in the measured span, or 0 if the timer is not stopped.
    pub fn get_time(&self, unit: TimeUnit) -> u128 {
        self.elapsed().map_or(0, |span| unit.count(span))
    }

    /// [`get_time`](Timer::get_time) in milliseconds.
    pub fn millis(&self) -> u128 {
        self.get_time(TimeUnit::default())
    }

    /// The measured span, once stopped.
    pub fn elapsed(&self) -> Option<Duration> {
        match self.state {
            State::Stopped { start, end } => Some(end.saturating_duration_since(start)),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.state, State::Stopped { .. })
    }

    /// Forget any span and return to the freshly constructed state.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
