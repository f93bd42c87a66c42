#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Pixel`**: One LED's intensities, stored green, red, blue as the wire expects
//! - **`Frame`**: `N` equally long pixel buffers validated for transmission
//! - **`Pin`** / **`SharedPins`**: Where each channel's data line is wired
//! - **`Cpu`**: The modelled core the emitters drive, one call per instruction class
//! - **`emit_single`**, **`emit_dual`**, **`emit_triple`**, **`emit_quad`**: Cycle-budgeted
//!   routines sending one to four channels in lock-step
//! - **`Layout`**: Picks the right emitter for a pin set at compile time
//! - **`Strip`**: Owns a core and a layout and enforces the latch gap between frames
//! - **`Simulator`**: Host-side `Cpu` that records every edge with its cycle
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Every bit window is 20 cycles of a 16 MHz core: a zero is 4 cycles high then
//! 16 low, a one is 16 high then 4 low. Interrupts are masked for the whole
//! frame and every data pin is low when an emitter returns.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

#[macro_use]
mod fmt;

pub mod cpu;
pub mod demo;
pub mod dual;
pub mod frame;
pub mod hw;
pub mod layout;
pub mod pins;
pub mod pixel;
pub mod quad;
pub mod sim;
pub mod single;
pub mod snapshot;
pub mod strip;
pub mod time;
pub mod timing;
pub mod triple;

pub use cpu::{Cpu, InterruptGuard};
pub use demo::{ColorCycle, DemoStep};
pub use dual::emit_dual;
pub use frame::{Frame, FrameError, MAX_PIXELS};
pub use hw::{Mmio, MmioPort};
pub use layout::Layout;
pub use pins::{Pin, SharedPins};
pub use pixel::{Pixel, WireBytes};
pub use quad::emit_quad;
pub use sim::{Edge, Pulse, SimPort, Simulator};
pub use single::emit_single;
pub use strip::{Strip, StripError};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use timing::{BIT, BitTiming, LATCH_US, LONG, SHORT, WS2811};
pub use triple::emit_triple;
