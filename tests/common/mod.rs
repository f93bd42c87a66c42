//! Shared test infrastructure for ws2811-pulse integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use ws2811_pulse::sim::{Pulse, SimPort, Simulator};
use ws2811_pulse::{BIT, LONG, Pixel, SHORT, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps microseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_micros(&self) -> u64 {
        self.0
    }

    fn from_micros(micros: u64) -> Self {
        TestDuration(micros)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Simulation Helpers
// ============================================================================

/// Trace capacity large enough for every frame used in the tests
pub type Sim = Simulator<2048>;

pub const PORT_A: SimPort = SimPort(0);
pub const PORT_B: SimPort = SimPort(1);

/// Red, green and blue in that order
pub fn rgb_pixels() -> [Pixel; 3] {
    [
        Pixel::new(255, 0, 0),
        Pixel::new(0, 255, 0),
        Pixel::new(0, 0, 255),
    ]
}

/// Wire-order bytes of a pixel buffer
pub fn wire_bytes(pixels: &[Pixel]) -> heapless::Vec<u8, 64> {
    let mut bytes = heapless::Vec::new();
    for pixel in pixels {
        bytes.extend_from_slice(&pixel.wire_bytes()).unwrap();
    }
    bytes
}

/// Check that every pulse is a well-formed bit of `bytes`, MSB first
pub fn assert_pulses_encode(pulses: &[Pulse], bytes: &[u8]) {
    assert_eq!(pulses.len(), bytes.len() * 8, "one pulse per bit");

    for (i, pulse) in pulses.iter().enumerate() {
        let byte = bytes[i / 8];
        let one = byte & (0x80 >> (i % 8)) != 0;
        let expected = u64::from(if one { LONG } else { SHORT });
        assert_eq!(
            pulse.high(),
            expected,
            "bit {} of byte {} (0x{:02X})",
            i % 8,
            i / 8,
            byte
        );
    }
}

/// Check that consecutive rising edges are exactly one bit window apart
pub fn assert_even_periods(pulses: &[Pulse]) {
    for (i, pair) in pulses.windows(2).enumerate() {
        assert_eq!(
            pair[1].rise - pair[0].rise,
            BIT as u64,
            "window {} is off-period",
            i
        );
    }
}
