//! Triple-channel emitter on one shared register.
//!
//! Every transition is a single register write, so the three pins move on
//! the same cycle.

use crate::cpu::{Cpu, InterruptGuard};
use crate::frame::Frame;
use crate::pins::SharedPins;
use crate::snapshot::PortSnapshot;
use crate::timing::{PhaseBudget, cost};

const BUDGET: PhaseBudget = PhaseBudget::for_writes(1);

// Bits 1-7: decrement | shift three, next pattern | branch.
const LOOP_SHORT: u8 = cost::ALU;
const LOOP_MIDDLE: u8 = 3 * cost::ALU + 3 * cost::BIT_COPY;
const LOOP_TAIL: u8 = cost::BRANCH_TAKEN;

// Bit 8: the pattern is already out of the data registers, so the first
// fetch starts in the short phase.
// fetch 0, test 0 | place 0, fetch 1 and 2, place both, byte count | counter reload, branch
const LAST_SHORT: u8 = cost::LD + cost::ALU;
const LAST_MIDDLE: u8 = cost::ALU + 2 * cost::LD + 2 * cost::BIT_COPY + cost::SBIW;
const LAST_TAIL: u8 = cost::ALU + cost::BRANCH_TAKEN;

const EXIT_WORK: u8 = LAST_TAIL - cost::BRANCH_TAKEN + cost::BRANCH_NOT;
const EXIT_TAIL: u8 = BUDGET.tail - cost::BRANCH_TAKEN + cost::BRANCH_NOT;

const _: () = assert!(BUDGET.fits(LOOP_SHORT, LOOP_MIDDLE, LOOP_TAIL));
const _: () = assert!(BUDGET.fits(LAST_SHORT, LAST_MIDDLE, LAST_TAIL));

const MSB: u8 = 0x80;

/// Sends the three channels of `frame` on `pins` and leaves them low.
///
/// Other pins of the shared register keep the level they had on entry.
pub fn emit_triple<C: Cpu>(cpu: &mut C, pins: SharedPins<C::Port, 3>, frame: &Frame<'_, 3>) {
    let port = pins.port();
    let mut bytes = [frame.wire_bytes(0), frame.wire_bytes(1), frame.wire_bytes(2)];
    let mut remaining = frame.byte_len();

    let mut guard = InterruptGuard::new(cpu);
    let cpu = &mut *guard;

    let snap = PortSnapshot::capture(cpu.read(port), pins.masks());
    cpu.work(4 * cost::ALU);

    let mut regs = [bytes[0].fetch(), bytes[1].fetch(), bytes[2].fetch()];
    let mut pattern = snap.pattern(&regs, MSB);
    cpu.work(3 * cost::LD + 3 * cost::BIT_COPY + cost::SBIW);

    loop {
        cpu.write(port, snap.low());
        if remaining == 0 {
            cpu.fill(EXIT_WORK, EXIT_TAIL);
            break;
        }
        remaining -= 1;
        cpu.fill(LAST_TAIL, BUDGET.tail);

        for _ in 0..7 {
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

        cpu.write(port, snap.high());
        regs[0] = bytes[0].fetch();
        cpu.fill(LAST_SHORT, BUDGET.short);
        cpu.write(port, pattern);
        regs[1] = bytes[1].fetch();
        regs[2] = bytes[2].fetch();
        pattern = snap.pattern(&regs, MSB);
        cpu.fill(LAST_MIDDLE, BUDGET.middle);
    }
}
