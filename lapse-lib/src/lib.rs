//! # Lapse
//!
//! Elapsed-time measurement over a monotonic clock.
//!
//! [`Timer`] measures one span between `start` and `stop` and reports it in a
//! chosen [`TimeUnit`]. [`PausableTimer`] adds `pause`/`unpause` and leaves
//! paused time out of the span. Both read time through a [`Clock`], so tests
//! can substitute a [`ManualClock`].

pub mod clock;
pub mod pausable;
pub mod timer;
pub mod unit;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use pausable::PausableTimer;
pub use timer::Timer;
pub use unit::{ParseUnitError, TimeUnit};
