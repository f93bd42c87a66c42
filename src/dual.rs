//! Dual-channel emitter.
//!
//! The two pins may sit on different registers, so every transition costs
//! two register writes, channel A first. Channel B trails A by one cycle.

use crate::cpu::{Cpu, InterruptGuard};
use crate::frame::Frame;
use crate::pins::Pin;
use crate::snapshot::PortSnapshot;
use crate::timing::{PhaseBudget, cost};

const BUDGET: PhaseBudget = PhaseBudget::for_writes(2);

// Bits 1-7: decrement | shift both, next patterns | branch.
const LOOP_SHORT: u8 = cost::ALU;
const LOOP_MIDDLE: u8 = 2 * cost::ALU + 2 * cost::BIT_COPY;
const LOOP_TAIL: u8 = cost::BRANCH_TAKEN;

// Bit 8: counter reload | fetch both, next patterns, byte count | branch.
const LAST_SHORT: u8 = cost::ALU;
const LAST_MIDDLE: u8 = 2 * cost::LD + 2 * cost::BIT_COPY + cost::SBIW;
const LAST_TAIL: u8 = cost::BRANCH_TAKEN;

// Leaving the frame: the branch falls through, then interrupts are restored.
const EXIT_WORK: u8 = LAST_TAIL - cost::BRANCH_TAKEN + cost::BRANCH_NOT;
const EXIT_TAIL: u8 = BUDGET.tail - cost::BRANCH_TAKEN + cost::BRANCH_NOT;

const _: () = assert!(BUDGET.fits(LOOP_SHORT, LOOP_MIDDLE, LOOP_TAIL));
const _: () = assert!(BUDGET.fits(LAST_SHORT, LAST_MIDDLE, LAST_TAIL));

const MSB: u8 = 0x80;

/// Sends both channels of `frame` in lock-step on `pins` and leaves them low.
///
/// The pins may share a register. In that case both snapshots carry both
/// pins and the second write of every pair repeats the first.
pub fn emit_dual<C: Cpu>(cpu: &mut C, pins: [Pin<C::Port>; 2], frame: &Frame<'_, 2>) {
    let [a, b] = pins;
    let shared = a.port() == b.port();
    let mut bytes = [frame.wire_bytes(0), frame.wire_bytes(1)];
    let mut remaining = frame.byte_len();

    let mut guard = InterruptGuard::new(cpu);
    let cpu = &mut *guard;

    let (foreign_a, foreign_b) = if shared { (b.mask(), a.mask()) } else { (0, 0) };
    let port_a = PortSnapshot::capture(cpu.read(a.port()), [a.mask(), foreign_a]);
    let port_b = PortSnapshot::capture(cpu.read(b.port()), [foreign_b, b.mask()]);
    // masks, complements, high and low values of both registers
    cpu.work(8 * cost::ALU);

    let mut regs = [bytes[0].fetch(), bytes[1].fetch()];
    let mut pattern = [port_a.pattern(&regs, MSB), port_b.pattern(&regs, MSB)];
    cpu.work(LAST_MIDDLE);

    loop {
        cpu.write(a.port(), port_a.low());
        cpu.write(b.port(), port_b.low());
        if remaining == 0 {
            cpu.fill(EXIT_WORK, EXIT_TAIL);
            break;
        }
        remaining -= 1;
        cpu.fill(LAST_TAIL, BUDGET.tail);

        for _ in 0..7 {
            cpu.write(a.port(), port_a.high());
            cpu.write(b.port(), port_b.high());
            cpu.fill(LOOP_SHORT, BUDGET.short);
            cpu.write(a.port(), pattern[0]);
            cpu.write(b.port(), pattern[1]);
            regs[0] <<= 1;
            regs[1] <<= 1;
            pattern = [port_a.pattern(&regs, MSB), port_b.pattern(&regs, MSB)];
            cpu.fill(LOOP_MIDDLE, BUDGET.middle);
            cpu.write(a.port(), port_a.low());
            cpu.write(b.port(), port_b.low());
            cpu.fill(LOOP_TAIL, BUDGET.tail);
        }

        cpu.write(a.port(), port_a.high());
        cpu.write(b.port(), port_b.high());
        cpu.fill(LAST_SHORT, BUDGET.short);
        cpu.write(a.port(), pattern[0]);
        cpu.write(b.port(), pattern[1]);
        regs = [bytes[0].fetch(), bytes[1].fetch()];
        pattern = [port_a.pattern(&regs, MSB), port_b.pattern(&regs, MSB)];
        cpu.fill(LAST_MIDDLE, BUDGET.middle);
    }
}
