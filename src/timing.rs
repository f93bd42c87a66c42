//! Cycle-budget table for the pulse encoding.
//!
//! Every emitter in this crate is scheduled against a fixed core clock. The
//! numbers here are the single source of truth for that schedule: how many
//! cycles each pulse phase lasts, what each modelled instruction class costs,
//! and how much work fits between two register writes.

/// Pulse shape of one data bit at a given core clock.
///
/// A zero bit is `short` high then `long` low; a one bit is `long` high then
/// `short` low. Both share the period `short + long`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    /// Core clock frequency in Hz.
    pub clock_hz: u32,
    /// Short phase in nanoseconds.
    pub short_ns: u32,
    /// Long phase in nanoseconds.
    pub long_ns: u32,
}

impl BitTiming {
    /// Converts nanoseconds to core-clock cycles, rounding to nearest.
    pub const fn cycles_for_ns(&self, ns: u32) -> u32 {
        let scaled = ns as u64 * self.clock_hz as u64;
        ((scaled + 500_000_000) / 1_000_000_000) as u32
    }

    /// Cycles in the short phase.
    pub const fn short_cycles(&self) -> u32 {
        self.cycles_for_ns(self.short_ns)
    }

    /// Cycles in the long phase.
    pub const fn long_cycles(&self) -> u32 {
        self.cycles_for_ns(self.long_ns)
    }

    /// Cycles in one bit window.
    pub const fn bit_cycles(&self) -> u32 {
        self.short_cycles() + self.long_cycles()
    }

    /// High time (in cycles) above which a pulse reads as a one bit.
    pub const fn threshold_cycles(&self) -> u32 {
        (self.short_cycles() + self.long_cycles()) / 2
    }

    /// Converts a cycle count back to nanoseconds, rounding down.
    pub const fn ns_for_cycles(&self, cycles: u64) -> u64 {
        cycles * 1_000_000_000 / self.clock_hz as u64
    }
}

/// The only supported cadence: 16 MHz core, 250 ns / 1000 ns pulses.
///
/// Changing this does not retarget the emitters. Their schedules are checked
/// against it at compile time and must be re-derived for another clock.
pub const WS2811: BitTiming = BitTiming {
    clock_hz: 16_000_000,
    short_ns: 250,
    long_ns: 1000,
};

/// Short phase in cycles (4).
pub const SHORT: u8 = WS2811.short_cycles() as u8;

/// Long phase in cycles (16).
pub const LONG: u8 = WS2811.long_cycles() as u8;

/// Bit window in cycles (20).
pub const BIT: u8 = WS2811.bit_cycles() as u8;

/// Minimum idle time, in microseconds, before LEDs latch a frame.
pub const LATCH_US: u32 = 50;

const _: () = assert!(SHORT as u32 == WS2811.short_cycles());
const _: () = assert!(LONG as u32 == WS2811.long_cycles());
const _: () = assert!(SHORT < LONG);

/// Cycle cost of each instruction class of the modelled core.
pub mod cost {
    /// Set one bit of an I/O register.
    pub const SBI: u8 = 2;
    /// Clear one bit of an I/O register.
    pub const CBI: u8 = 2;
    /// Write a whole I/O register.
    pub const OUT: u8 = 1;
    /// Read a whole I/O register.
    pub const IN: u8 = 1;
    /// Load a byte and post-increment the pointer.
    pub const LD: u8 = 2;
    /// Register arithmetic, move, bit copy, immediate load.
    pub const ALU: u8 = 1;
    /// Bit test that does not skip.
    pub const SKIP_NOT: u8 = 1;
    /// Bit test that skips a one-word instruction.
    pub const SKIP_TAKEN: u8 = 2;
    /// Relative jump.
    pub const RJMP: u8 = 2;
    /// Conditional branch, taken.
    pub const BRANCH_TAKEN: u8 = 2;
    /// Conditional branch, not taken.
    pub const BRANCH_NOT: u8 = 1;
    /// 16-bit immediate decrement.
    pub const SBIW: u8 = 2;
    /// No operation.
    pub const NOP: u8 = 1;
    /// Copy one bit between registers (`bst` + `bld`).
    pub const BIT_COPY: u8 = 2 * ALU;
}

/// Work cycles available in each phase of a bit window.
///
/// A register-write design issues `writes` back-to-back writes at each of
/// the three transitions (rise, data, fall). What remains of the short phase,
/// the middle and the tail is all the bookkeeping a bit may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseBudget {
    /// Between the rise writes and the data writes.
    pub short: u8,
    /// Between the data writes and the fall writes.
    pub middle: u8,
    /// Between the fall writes and the next rise.
    pub tail: u8,
}

impl PhaseBudget {
    /// Budget for a design that issues `writes` register writes per transition.
    pub const fn for_writes(writes: u8) -> Self {
        assert!(writes * cost::OUT < SHORT, "rise writes overrun the short phase");
        Self {
            short: SHORT - writes * cost::OUT,
            middle: LONG - SHORT - writes * cost::OUT,
            tail: BIT - LONG - writes * cost::OUT,
        }
    }

    /// Whether the given per-phase work fits.
    pub const fn fits(&self, short: u8, middle: u8, tail: u8) -> bool {
        short <= self.short && middle <= self.middle && tail <= self.tail
    }

    /// Work cycles in the whole window.
    pub const fn total(&self) -> u8 {
        self.short + self.middle + self.tail
    }
}
