//! Latch-gap aware wrapper around an emitter.
//!
//! Provides [`Strip`], which owns a [`Cpu`] and a pin [`Layout`] and refuses to
//! start a frame before the LEDs have latched the previous one.

use crate::cpu::Cpu;
use crate::frame::Frame;
use crate::layout::Layout;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::timing::LATCH_US;

/// Errors that can occur during strip operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripError<D> {
    /// The previous frame has not been idle long enough to latch.
    LatchPending {
        /// Time left before the next frame may start.
        remaining: D,
    },
}

impl<D: TimeDuration> core::fmt::Display for StripError<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StripError::LatchPending { remaining } => {
                write!(
                    f,
                    "previous frame still latching, {} us remaining",
                    remaining.as_micros()
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl<D: TimeDuration + core::fmt::Debug> std::error::Error for StripError<D> {}

/// One LED strip (or `N` strips in lock-step) behind a latch-gap check.
///
/// The raw emitters leave the inter-frame idle time to the caller. A strip
/// remembers when its last frame ended and rejects a new frame until the
/// latch gap has passed.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `C` - Core the frames run on
/// * `L` - Pin layout, which selects the emitter
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `N` - Number of channels
pub struct Strip<'t, C, L, I, T, const N: usize>
where
    C: Cpu,
    L: Layout<C::Port, N>,
    I: TimeInstant,
    T: TimeSource<I>,
{
    cpu: C,
    layout: L,
    time_source: &'t T,
    latch: I::Duration,
    last_frame: Option<I>,
    frames_sent: u32,
}

impl<'t, C, L, I, T, const N: usize> Strip<'t, C, L, I, T, N>
where
    C: Cpu,
    L: Layout<C::Port, N>,
    I: TimeInstant,
    T: TimeSource<I>,
{
    /// Creates a strip with the default latch gap of [`LATCH_US`].
    pub fn new(cpu: C, layout: L, time_source: &'t T) -> Self {
        Self {
            cpu,
            layout,
            time_source,
            latch: I::Duration::from_micros(LATCH_US as u64),
            last_frame: None,
            frames_sent: 0,
        }
    }

    /// Replaces the latch gap, for parts that need longer than the default.
    pub fn with_latch(mut self, latch: I::Duration) -> Self {
        self.latch = latch;
        self
    }

    /// Time left before [`Strip::write`] will accept a frame.
    pub fn ready_in(&self) -> I::Duration {
        match self.last_frame {
            None => I::Duration::ZERO,
            Some(last) => {
                let elapsed = self.time_source.now().duration_since(last);
                self.latch.saturating_sub(elapsed)
            }
        }
    }

    /// Sends `frame` if the latch gap since the previous frame has passed.
    ///
    /// # Returns
    /// * `Ok(())` - Frame sent; the latch gap restarts now
    /// * `Err(StripError::LatchPending)` - Too early; nothing was sent
    pub fn write(&mut self, frame: &Frame<'_, N>) -> Result<(), StripError<I::Duration>> {
        let remaining = self.ready_in();
        if remaining != I::Duration::ZERO {
            debug!("frame rejected, latch pending for {=u64} us", remaining.as_micros());
            return Err(StripError::LatchPending { remaining });
        }

        self.layout.emit(&mut self.cpu, frame);
        self.last_frame = Some(self.time_source.now());
        self.frames_sent = self.frames_sent.wrapping_add(1);

        trace!(
            "frame {=u32} sent, {=u16} pixels on {=usize} channels",
            self.frames_sent,
            frame.pixel_count(),
            N
        );
        Ok(())
    }

    /// Number of frames sent so far.
    #[inline]
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    /// The pin layout.
    #[inline]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// The core frames run on.
    #[inline]
    pub fn cpu(&self) -> &C {
        &self.cpu
    }

    /// Mutable access to the core, e.g. to inspect a simulator.
    #[inline]
    pub fn cpu_mut(&mut self) -> &mut C {
        &mut self.cpu
    }

    /// Gives back the core and the layout.
    pub fn release(self) -> (C, L) {
        (self.cpu, self.layout)
    }
}
