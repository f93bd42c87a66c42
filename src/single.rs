//! Single-channel emitter.
//!
//! Drives one pin with single-bit set/clear, so the pin may share its
//! register with anything else. Each bit window is 20 cycles:
//!
//! ```text
//! cycle   0    2        6                  18   20
//!         SBI  |  test  |  pad, shift, dec  | CBI | branch
//! zero    ___/‾‾‾‾‾‾‾‾‾‾\____________________________
//! one     ___/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾\____
//! ```

use crate::cpu::{Cpu, InterruptGuard};
use crate::frame::Frame;
use crate::pins::Pin;
use crate::timing::{BIT, LONG, SHORT, cost};

// A zero skips the jump, clears, and skips the second jump. A one takes the
// first jump and the test, then pads where the zero path clears. The two
// paths must cost the same.
const ZERO_PATH: u8 = cost::SKIP_TAKEN + cost::CBI + cost::SKIP_TAKEN;
const ONE_WORK: u8 = cost::SKIP_NOT + cost::RJMP + cost::SKIP_NOT;
const ONE_PATH: u8 = ONE_WORK + cost::RJMP;
const _: () = assert!(ZERO_PATH == ONE_PATH);
const _: () = assert!(cost::SKIP_TAKEN + cost::CBI == SHORT);
const _: () = assert!(ONE_PATH - ONE_WORK == cost::CBI);

// Padding before the closing clear so a one stays high for the long phase.
const LOOP_PAD: u8 = LONG - ONE_PATH - 2 * cost::ALU - cost::CBI;
const EIGHTH_PAD: u8 = LONG - ONE_PATH - cost::LD - cost::SBIW - cost::CBI;

const _: () = assert!(
    cost::SBI + ONE_PATH + LOOP_PAD + 2 * cost::ALU + cost::CBI + cost::BRANCH_TAKEN == BIT
);
const _: () = assert!(
    cost::SBI + ONE_PATH + EIGHTH_PAD + cost::LD + cost::SBIW + cost::CBI + cost::BRANCH_TAKEN
        == BIT
);

/// Sends `frame` on `pin`, MSB first, and leaves the pin low.
///
/// Interrupts are masked for the whole frame and restored to their prior
/// state on return. The caller owns the latch gap before the next frame.
pub fn emit_single<C: Cpu>(cpu: &mut C, pin: Pin<C::Port>, frame: &Frame<'_, 1>) {
    let port = pin.port();
    let bit = pin.bit();
    let mut bytes = frame.wire_bytes(0);
    let mut remaining = frame.byte_len();

    let mut guard = InterruptGuard::new(cpu);
    let cpu = &mut *guard;

    // bit counter, length times three, jump to the first fetch
    cpu.work(6 * cost::ALU + cost::RJMP);

    let mut byte = bytes.fetch();
    cpu.work(cost::LD);

    loop {
        cpu.work(cost::SBIW);
        cpu.clear_bit(port, bit);
        if remaining == 0 {
            cpu.work(cost::BRANCH_NOT);
            break;
        }
        remaining -= 1;
        cpu.work(cost::BRANCH_TAKEN);

        for _ in 0..7 {
            open_bit(cpu, port, bit, byte);
            byte <<= 1;
            cpu.fill(2 * cost::ALU, LOOP_PAD + 2 * cost::ALU);
            cpu.clear_bit(port, bit);
            // taken branch, or fall-through plus counter reload after the 7th
            cpu.work(cost::BRANCH_TAKEN);
        }

        open_bit(cpu, port, bit, byte);
        cpu.stall(EIGHTH_PAD);
        byte = bytes.fetch();
        cpu.work(cost::LD);
    }
}

/// Raises the pin and ends a zero bit early. Costs the same either way.
#[inline(always)]
fn open_bit<C: Cpu>(cpu: &mut C, port: C::Port, bit: u8, byte: u8) {
    cpu.set_bit(port, bit);
    if byte & 0x80 == 0 {
        cpu.work(cost::SKIP_TAKEN);
        cpu.clear_bit(port, bit);
        cpu.work(cost::SKIP_TAKEN);
    } else {
        cpu.fill(ONE_WORK, ONE_PATH);
    }
}
