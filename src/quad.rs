//! Quad-channel emitter on one shared register.
//!
//! Four channels do not leave room for the triple emitter's layout. Shifting
//! four registers and placing four bits overflows the middle phase, so the
//! fourth channel's bit is placed in the next window's short phase. The
//! eighth bit cannot absorb four fetches either. Only bits 1-6 run in the
//! loop. Bit 7 reads bit 8 in place and starts fetching, and bit 8 finishes.
//!
//! ```text
//! phase cycles      short 3        middle 11                  tail 3
//! bits 1-6          dec, place 3   shift 4, place 0-2         branch
//! bit 7             place 3        place 0-2 (bit 6), fetch 0-1   fetch 2
//! bit 8             place 3, reload  fetch 3, place 0-2, count    branch
//! ```

use crate::cpu::{Cpu, InterruptGuard};
use crate::frame::Frame;
use crate::pins::SharedPins;
use crate::snapshot::PortSnapshot;
use crate::timing::{PhaseBudget, cost};

const BUDGET: PhaseBudget = PhaseBudget::for_writes(1);

const LOOP_SHORT: u8 = cost::ALU + cost::BIT_COPY;
const LOOP_MIDDLE: u8 = 4 * cost::ALU + 3 * cost::BIT_COPY;
const LOOP_TAIL: u8 = cost::BRANCH_TAKEN;

const SEVENTH_SHORT: u8 = cost::BIT_COPY;
const SEVENTH_MIDDLE: u8 = 3 * cost::BIT_COPY + 2 * cost::LD;
const SEVENTH_TAIL: u8 = cost::LD;

const EIGHTH_SHORT: u8 = cost::BIT_COPY + cost::ALU;
const EIGHTH_MIDDLE: u8 = cost::LD + 3 * cost::BIT_COPY + cost::SBIW;
const EIGHTH_TAIL: u8 = cost::BRANCH_TAKEN;

const EXIT_WORK: u8 = EIGHTH_TAIL - cost::BRANCH_TAKEN + cost::BRANCH_NOT;
const EXIT_TAIL: u8 = BUDGET.tail - cost::BRANCH_TAKEN + cost::BRANCH_NOT;

const _: () = assert!(BUDGET.fits(LOOP_SHORT, LOOP_MIDDLE, LOOP_TAIL));
const _: () = assert!(BUDGET.fits(SEVENTH_SHORT, SEVENTH_MIDDLE, SEVENTH_TAIL));
const _: () = assert!(BUDGET.fits(EIGHTH_SHORT, EIGHTH_MIDDLE, EIGHTH_TAIL));

// Looping seven bits would leave all four fetches to the eighth.
const _: () = assert!(!BUDGET.fits(
    cost::BIT_COPY + cost::ALU,
    4 * cost::LD + 3 * cost::BIT_COPY + cost::SBIW,
    cost::ALU + cost::BRANCH_TAKEN,
));

const MSB: u8 = 0x80;
const NEXT_TO_MSB: u8 = 0x40;

/// Sends the four channels of `frame` on `pins` and leaves them low.
///
/// Other pins of the shared register keep the level they had on entry.
pub fn emit_quad<C: Cpu>(cpu: &mut C, pins: SharedPins<C::Port, 4>, frame: &Frame<'_, 4>) {
    let port = pins.port();
    let mut bytes = [
        frame.wire_bytes(0),
        frame.wire_bytes(1),
        frame.wire_bytes(2),
        frame.wire_bytes(3),
    ];
    let mut remaining = frame.byte_len();

    let mut guard = InterruptGuard::new(cpu);
    let cpu = &mut *guard;

    let snap = PortSnapshot::capture(cpu.read(port), pins.masks());
    cpu.work(4 * cost::ALU);

    let mut regs = [
        bytes[0].fetch(),
        bytes[1].fetch(),
        bytes[2].fetch(),
        bytes[3].fetch(),
    ];
    let mut pattern = snap.pattern(&regs, MSB);
    cpu.work(4 * cost::LD + 3 * cost::BIT_COPY + cost::SBIW);

    loop {
        cpu.write(port, snap.low());
        if remaining == 0 {
            cpu.fill(EXIT_WORK, EXIT_TAIL);
            break;
        }
        remaining -= 1;
        cpu.fill(EIGHTH_TAIL, BUDGET.tail);

        for _ in 0..6 {
            cpu.write(port, snap.high());
            cpu.fill(LOOP_SHORT, BUDGET.short);
            cpu.write(port, pattern);
            for reg in regs.iter_mut() {
                *reg <<= 1;
            }
            pattern = snap.pattern(&regs, MSB);
            cpu.fill(LOOP_MIDDLE, BUDGET.middle);
            cpu.write(port, snap.low());
            cpu.fill(LOOP_TAIL, BUDGET.tail);
        }

        // bit 7
        cpu.write(port, snap.high());
        cpu.fill(SEVENTH_SHORT, BUDGET.short);
        cpu.write(port, pattern);
        pattern = snap.pattern(&regs, NEXT_TO_MSB);
        regs[0] = bytes[0].fetch();
        regs[1] = bytes[1].fetch();
        cpu.fill(SEVENTH_MIDDLE, BUDGET.middle);
        cpu.write(port, snap.low());
        regs[2] = bytes[2].fetch();
        cpu.fill(SEVENTH_TAIL, BUDGET.tail);

        // bit 8
        cpu.write(port, snap.high());
        cpu.fill(EIGHTH_SHORT, BUDGET.short);
        cpu.write(port, pattern);
        regs[3] = bytes[3].fetch();
        pattern = snap.pattern(&regs, MSB);
        cpu.fill(EIGHTH_MIDDLE, BUDGET.middle);
    }
}
