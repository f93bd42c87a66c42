//! Three-pixel colour cycle.
//!
//! Starts dark, fades the pixels up to red, green and blue, then rotates each
//! pixel through yellow, green, cyan, blue, magenta, white and off forever,
//! one channel step per frame.

use crate::pixel::Pixel;

/// Hold time of the initial dark frame.
pub const INTRO_PAUSE_MS: u32 = 1000;

/// Hold time of every fade step.
pub const STEP_MS: u32 = 10;

/// Fade steps per phase.
pub const STEPS_PER_PHASE: u16 = 255;

/// Per-pixel red, green, blue increments of one phase.
type Phase = [[i8; 3]; 3];

// off -> red, off -> green, off -> blue
const INTRO: Phase = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

const ROTATION: [Phase; 8] = [
    // red -> yellow, green -> cyan, blue -> magenta
    [[0, 1, 0], [0, 0, 1], [1, 0, 0]],
    // yellow -> green, cyan -> blue, magenta -> white
    [[-1, 0, 0], [0, -1, 0], [0, 1, 0]],
    // green -> cyan, blue -> magenta, white -> off
    [[0, 0, 1], [1, 0, 0], [-1, -1, -1]],
    // cyan -> blue, magenta -> white, off -> red
    [[0, -1, 0], [0, 1, 0], [1, 0, 0]],
    // blue -> magenta, white -> off, red -> yellow
    [[1, 0, 0], [-1, -1, -1], [0, 1, 0]],
    // magenta -> white, off -> red, yellow -> green
    [[0, 1, 0], [1, 0, 0], [-1, 0, 0]],
    // white -> off, red -> yellow, green -> cyan
    [[-1, -1, -1], [0, 1, 0], [0, 0, 1]],
    // off -> red, yellow -> green, cyan -> blue
    [[1, 0, 0], [-1, 0, 0], [0, -1, 0]],
];

/// One frame of the demo and how long to show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DemoStep {
    /// Pixels to send.
    pub pixels: [Pixel; 3],
    /// Milliseconds to hold the frame before the next one.
    pub hold_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Dark,
    Intro,
    Rotation(usize),
}

/// Endless iterator over the demo's frames.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    pixels: [Pixel; 3],
    stage: Stage,
    step: u16,
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorCycle {
    /// Starts at the dark frame.
    pub fn new() -> Self {
        Self {
            pixels: [Pixel::OFF; 3],
            stage: Stage::Dark,
            step: 0,
        }
    }

    /// Current rotation phase, if the intro is over.
    pub fn phase(&self) -> Option<usize> {
        match self.stage {
            Stage::Rotation(phase) => Some(phase),
            _ => None,
        }
    }

    fn apply(&mut self, phase: &Phase) {
        for (pixel, delta) in self.pixels.iter_mut().zip(phase) {
            pixel.r = pixel.r.wrapping_add_signed(delta[0]);
            pixel.g = pixel.g.wrapping_add_signed(delta[1]);
            pixel.b = pixel.b.wrapping_add_signed(delta[2]);
        }
    }

    fn advance(&mut self, next: Stage) {
        self.step += 1;
        if self.step == STEPS_PER_PHASE {
            self.step = 0;
            self.stage = next;
        }
    }
}

impl Iterator for ColorCycle {
    type Item = DemoStep;

    fn next(&mut self) -> Option<DemoStep> {
        let hold_ms = match self.stage {
            Stage::Dark => {
                self.stage = Stage::Intro;
                INTRO_PAUSE_MS
            }
            Stage::Intro => {
                self.apply(&INTRO);
                self.advance(Stage::Rotation(0));
                STEP_MS
            }
            Stage::Rotation(phase) => {
                self.apply(&ROTATION[phase]);
                self.advance(Stage::Rotation((phase + 1) % ROTATION.len()));
                STEP_MS
            }
        };

        Some(DemoStep {
            pixels: self.pixels,
            hold_ms,
        })
    }
}
