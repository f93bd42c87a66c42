//! Clock hooks for the latch gap.
//!
//! [`crate::Strip`] only needs to know how long the line has been idle since
//! its last frame. Implement these traits over whatever monotonic timer the
//! target already runs; the resolution must be microseconds or finer for the
//! 50 µs gap to mean anything.

/// A monotonic clock that timestamps the end of each frame.
pub trait TimeSource<I: TimeInstant> {
    /// The instant the line went idle, when called right after a frame.
    fn now(&self) -> I;
}

/// Idle time between frames.
pub trait TimeDuration: Copy + PartialEq {
    /// No idle time left to wait.
    const ZERO: Self;

    /// Whole microseconds, for error reports and logs.
    fn as_micros(&self) -> u64;

    /// Builds the latch gap from [`crate::LATCH_US`].
    fn from_micros(micros: u64) -> Self;

    /// Remaining gap; never negative.
    fn saturating_sub(self, other: Self) -> Self;
}

/// A timestamp on the [`TimeSource`]'s clock.
pub trait TimeInstant: Copy {
    /// Span between two timestamps.
    type Duration: TimeDuration;

    /// Idle time from `earlier` (the end of the last frame) to `self`.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}
