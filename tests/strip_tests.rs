//! Integration tests for Strip

mod common;
use common::*;

use ws2811_pulse::{
    Frame, LATCH_US, Layout, Pin, Pixel, SharedPins, SimPort, Strip, StripError, TimeDuration,
};

type SingleStrip<'t> = Strip<'t, Sim, Pin<SimPort>, TestInstant, MockTimeSource, 1>;

#[test]
fn first_frame_is_sent_immediately() {
    let timer = MockTimeSource::new();
    let mut strip: SingleStrip = Strip::new(Sim::new(), Pin::new(PORT_A, 0), &timer);

    assert_eq!(strip.ready_in(), TestDuration::ZERO);
    let pixels = rgb_pixels();
    strip.write(&Frame::single(&pixels).unwrap()).unwrap();

    assert_eq!(strip.frames_sent(), 1);
    assert_pulses_encode(&strip.cpu().pulses(PORT_A, 0), &wire_bytes(&pixels));
}

#[test]
fn back_to_back_frame_waits_for_latch() {
    let timer = MockTimeSource::new();
    let mut strip: SingleStrip = Strip::new(Sim::new(), Pin::new(PORT_A, 0), &timer);
    let pixels = [Pixel::OFF; 2];
    let frame = Frame::single(&pixels).unwrap();

    strip.write(&frame).unwrap();
    let cycles = strip.cpu().cycles();

    let result = strip.write(&frame);
    assert_eq!(
        result,
        Err(StripError::LatchPending {
            remaining: TestDuration(LATCH_US as u64)
        })
    );
    // nothing ran
    assert_eq!(strip.cpu().cycles(), cycles);
    assert_eq!(strip.frames_sent(), 1);

    timer.advance(TestDuration(49));
    assert_eq!(strip.ready_in(), TestDuration(1));
    assert!(strip.write(&frame).is_err());

    timer.advance(TestDuration(1));
    assert_eq!(strip.ready_in(), TestDuration::ZERO);
    assert!(strip.write(&frame).is_ok());
    assert_eq!(strip.frames_sent(), 2);
}

#[test]
fn custom_latch_gap() {
    let timer = MockTimeSource::new();
    let mut strip: SingleStrip =
        Strip::new(Sim::new(), Pin::new(PORT_A, 0), &timer).with_latch(TestDuration(300));
    let pixels = [Pixel::OFF];
    let frame = Frame::single(&pixels).unwrap();

    strip.write(&frame).unwrap();
    timer.advance(TestDuration(100));
    assert_eq!(
        strip.write(&frame),
        Err(StripError::LatchPending {
            remaining: TestDuration(200)
        })
    );

    timer.advance(TestDuration(250));
    assert!(strip.write(&frame).is_ok());
}

#[test]
fn latch_error_reports_microseconds() {
    let err = StripError::LatchPending {
        remaining: TestDuration(42),
    };
    assert_eq!(err.to_string(), "previous frame still latching, 42 us remaining");
}

#[test]
fn strip_drives_a_quad_layout() {
    let timer = MockTimeSource::new();
    let pins = SharedPins::new(PORT_B, [0, 1, 2, 3]);
    let mut strip = Strip::<_, _, TestInstant, _, 4>::new(Sim::new(), pins, &timer);

    let pixels = rgb_pixels();
    strip.write(&Frame::new([&pixels[..]; 4]).unwrap()).unwrap();

    let (sim, layout) = strip.release();
    assert_eq!(layout, pins);
    for bit in 0..4 {
        assert_pulses_encode(&sim.pulses(PORT_B, bit), &wire_bytes(&pixels));
    }
}

#[test]
fn layout_dispatches_by_pin_set() {
    let mut sim = Sim::new();
    let pins = [Pin::new(PORT_A, 1), Pin::new(PORT_B, 1)];
    let pixels = [Pixel::new(9, 8, 7)];

    pins.emit(&mut sim, &Frame::new([&pixels[..]; 2]).unwrap());

    assert_pulses_encode(&sim.pulses(PORT_A, 1), &wire_bytes(&pixels));
    assert_pulses_encode(&sim.pulses(PORT_B, 1), &wire_bytes(&pixels));
}
