//! Memory-mapped register backend.
//!
//! [`Mmio`] executes emitter operations as volatile register accesses and
//! masks interrupts through `critical-section`, so it works with whatever
//! critical-section implementation the target links in.
//!
//! The emitters' bookkeeping (fetches, shifts, counters, branches) runs as
//! ordinary code here, so [`Cpu::work`] costs nothing extra and only the
//! padding passed to [`Cpu::stall`] is spun. The padding a frame spins never
//! depends on the pixel data. The bit schedule is still only approximate:
//! how long the real bookkeeping takes is up to the compiler, and may differ
//! from the cost table, most visibly in the windows that fetch the next byte.
//! Measure the pulse widths on the target and tune `spins_per_cycle` before
//! trusting a new build.

use crate::cpu::Cpu;
use core::ptr;
use critical_section::RestoreState;

/// An 8-bit output register at a fixed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmioPort {
    addr: *mut u8,
}

impl MmioPort {
    /// Wraps the register at `addr`.
    ///
    /// # Safety
    /// `addr` must be a valid, writable 8-bit register (or memory location)
    /// for as long as any emitter uses this port, with no other writer while
    /// a frame is in flight.
    pub const unsafe fn new(addr: *mut u8) -> Self {
        Self { addr }
    }

    /// Register address.
    #[inline]
    pub fn addr(&self) -> *mut u8 {
        self.addr
    }
}

/// A [`Cpu`] over memory-mapped registers.
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    spins_per_cycle: u8,
}

impl Mmio {
    /// A backend whose `stall` spins `spins_per_cycle` times per cycle.
    pub const fn new(spins_per_cycle: u8) -> Self {
        Self { spins_per_cycle }
    }

    /// Spin-loop iterations issued for `cycles` of padding.
    #[inline(always)]
    pub const fn spins(&self, cycles: u8) -> u16 {
        cycles as u16 * self.spins_per_cycle as u16
    }
}

impl Cpu for Mmio {
    type Port = MmioPort;
    type IrqState = RestoreState;

    #[inline(always)]
    fn read(&mut self, port: MmioPort) -> u8 {
        // SAFETY: `MmioPort::new` requires a valid register address.
        unsafe { ptr::read_volatile(port.addr) }
    }

    #[inline(always)]
    fn write(&mut self, port: MmioPort, value: u8) {
        // SAFETY: as above.
        unsafe { ptr::write_volatile(port.addr, value) }
    }

    #[inline(always)]
    fn set_bit(&mut self, port: MmioPort, bit: u8) {
        let value = self.read(port) | (1 << bit);
        self.write(port, value);
    }

    #[inline(always)]
    fn clear_bit(&mut self, port: MmioPort, bit: u8) {
        let value = self.read(port) & !(1 << bit);
        self.write(port, value);
    }

    #[inline(always)]
    fn stall(&mut self, cycles: u8) {
        for _ in 0..self.spins(cycles) {
            core::hint::spin_loop();
        }
    }

    // the bookkeeping already ran on the core
    #[inline(always)]
    fn work(&mut self, _cycles: u8) {}

    #[inline(always)]
    fn mask_interrupts(&mut self) -> RestoreState {
        // SAFETY: every acquire is paired with exactly one release by
        // `InterruptGuard`, in nesting order.
        unsafe { critical_section::acquire() }
    }

    #[inline(always)]
    fn restore_interrupts(&mut self, state: RestoreState) {
        // SAFETY: `state` came from the matching `acquire`.
        unsafe { critical_section::release(state) }
    }
}
