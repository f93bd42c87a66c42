//! Integration tests for the three-pixel colour cycle

mod common;
use common::*;

use ws2811_pulse::demo::{INTRO_PAUSE_MS, STEP_MS, STEPS_PER_PHASE};
use ws2811_pulse::{ColorCycle, Frame, Pin, Pixel, emit_single};

const PHASE: usize = STEPS_PER_PHASE as usize;

#[test]
fn starts_with_a_dark_pause() {
    let first = ColorCycle::new().next().unwrap();
    assert_eq!(first.pixels, [Pixel::OFF; 3]);
    assert_eq!(first.hold_ms, INTRO_PAUSE_MS);
}

#[test]
fn intro_fades_up_to_red_green_blue() {
    let mut demo = ColorCycle::new().skip(1);

    let step = demo.next().unwrap();
    assert_eq!(
        step.pixels,
        [Pixel::new(1, 0, 0), Pixel::new(0, 1, 0), Pixel::new(0, 0, 1)]
    );
    assert_eq!(step.hold_ms, STEP_MS);

    let last = demo.nth(PHASE - 2).unwrap();
    assert_eq!(last.pixels, rgb_pixels());
}

#[test]
fn first_phase_ends_on_yellow_cyan_magenta() {
    let mut demo = ColorCycle::new();
    let step = demo.nth(2 * PHASE).unwrap();

    assert_eq!(
        step.pixels,
        [
            Pixel::new(255, 255, 0),
            Pixel::new(0, 255, 255),
            Pixel::new(255, 0, 255)
        ]
    );
    assert_eq!(demo.phase(), Some(1));
}

#[test]
fn rotation_repeats_every_eight_phases() {
    let mut demo = ColorCycle::new();
    let intro_end = demo.nth(PHASE).unwrap();
    assert_eq!(demo.phase(), Some(0));

    let full_turn = demo.nth(8 * PHASE - 1).unwrap();
    assert_eq!(full_turn.pixels, intro_end.pixels);
    assert_eq!(demo.phase(), Some(0));

    let two_turns = demo.nth(8 * PHASE - 1).unwrap();
    assert_eq!(two_turns.pixels, intro_end.pixels);
}

#[test]
fn every_pixel_is_dark_once_per_rotation() {
    let demo = ColorCycle::new().skip(PHASE + 1).take(8 * PHASE);
    let mut dark = [0u32; 3];

    for step in demo {
        assert_eq!(step.hold_ms, STEP_MS);
        for (count, pixel) in dark.iter_mut().zip(step.pixels) {
            if pixel == Pixel::OFF {
                *count += 1;
            }
        }
    }
    assert_eq!(dark, [1, 1, 1]);
}

#[test]
fn demo_frames_go_out_on_the_wire() {
    let mut sim = Sim::new();
    let pin = Pin::new(PORT_A, 0);

    for step in ColorCycle::new().skip(PHASE + 10).take(3) {
        sim.reset_trace();
        emit_single(&mut sim, pin, &Frame::single(&step.pixels).unwrap());
        assert_pulses_encode(&sim.pulses(PORT_A, 0), &wire_bytes(&step.pixels));
    }
}
