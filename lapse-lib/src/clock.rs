//! Time sources used by the timers.
//!
//! Every timer samples time through a [`Clock`]. Production code uses
//! [`MonotonicClock`], which reads `std::time::Instant`; tests and
//! deterministic callers can drive a timer with a [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A source of monotonic time points.
///
/// Implementations must never return an `Instant` earlier than one they
/// returned before.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The system monotonic clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// The clock is anchored at the instant it was created and only moves
/// forward from there. Its position lives in a `Cell`, so a shared reference
/// is enough to both advance the clock and hand it to a timer. Advancing past
/// the last representable `Instant` stops at that instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    anchor: Instant,
    current: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        let anchor = Instant::now();
        Self {
            anchor,
            current: Cell::new(anchor),
        }
    }

    /// Move the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut current = self.current.get();
        let mut remaining = step;
        let mut chunk = step;

        // Take the largest chunk that still fits, halving on overflow.
        while !remaining.is_zero() && !chunk.is_zero() {
            match current.checked_add(chunk) {
                Some(next) => {
                    current = next;
                    remaining -= chunk;
                    chunk = chunk.min(remaining);
                }
                None => chunk /= 2,
            }
        }
        self.current.set(current);
    }

    /// Put the clock at `offset` past its anchor.
    ///
    /// Offsets earlier than the current one are ignored.
    pub fn set(&self, offset: Duration) {
        let elapsed = self.elapsed();
        if offset > elapsed {
            self.advance(offset - elapsed);
        }
    }

    /// Time since the anchor.
    pub fn elapsed(&self) -> Duration {
        self.current.get() - self.anchor
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.current.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}
