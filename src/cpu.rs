//! The modelled core that emitters drive, and the scoped interrupt mask.
//!
//! Emitters never touch hardware directly. They go through [`Cpu`], whose
//! operations each stand for one instruction class of the `timing::cost`
//! table. A backend either executes them on real registers ([`crate::hw`])
//! or accounts them cycle by cycle ([`crate::sim`]).

use core::ops::{Deref, DerefMut};

/// Cycle-accounted access to output registers and the interrupt flag.
pub trait Cpu {
    /// Identifies one output register.
    type Port: Copy + PartialEq;

    /// Saved interrupt-enable state.
    type IrqState: Copy;

    /// Reads a whole register (`cost::IN`).
    fn read(&mut self, port: Self::Port) -> u8;

    /// Writes a whole register in one access (`cost::OUT`).
    fn write(&mut self, port: Self::Port, value: u8);

    /// Drives one pin high (`cost::SBI`).
    fn set_bit(&mut self, port: Self::Port, bit: u8);

    /// Drives one pin low (`cost::CBI`).
    fn clear_bit(&mut self, port: Self::Port, bit: u8);

    /// Pads with `cycles` idle core cycles.
    fn stall(&mut self, cycles: u8);

    /// Accounts `cycles` of bookkeeping the caller has just executed.
    ///
    /// Shifts, byte fetches, counters and loop branches are real code on
    /// every backend. A backend that runs that code on the core leaves this
    /// empty; a model that only counts cycles treats it as a stall.
    #[inline(always)]
    fn work(&mut self, cycles: u8) {
        self.stall(cycles);
    }

    /// Accounts `work` cycles of bookkeeping, then pads the phase out to
    /// `phase` cycles.
    #[inline(always)]
    fn fill(&mut self, work: u8, phase: u8) {
        self.work(work);
        self.stall(phase.saturating_sub(work));
    }

    /// Masks interrupt delivery and returns the state to restore.
    fn mask_interrupts(&mut self) -> Self::IrqState;

    /// Restores a state returned by [`Cpu::mask_interrupts`].
    fn restore_interrupts(&mut self, state: Self::IrqState);
}

/// Interrupts masked for as long as the guard lives.
///
/// Restores the state that was current at [`InterruptGuard::new`] when
/// dropped. If interrupts were already masked they stay masked.
pub struct InterruptGuard<'a, C: Cpu> {
    cpu: &'a mut C,
    saved: C::IrqState,
}

impl<'a, C: Cpu> InterruptGuard<'a, C> {
    /// Masks interrupts on `cpu`.
    pub fn new(cpu: &'a mut C) -> Self {
        let saved = cpu.mask_interrupts();
        Self { cpu, saved }
    }
}

impl<C: Cpu> Deref for InterruptGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.cpu
    }
}

impl<C: Cpu> DerefMut for InterruptGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.cpu
    }
}

impl<C: Cpu> Drop for InterruptGuard<'_, C> {
    fn drop(&mut self) {
        self.cpu.restore_interrupts(self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flag {
        enabled: bool,
        restores: u32,
    }

    impl Cpu for Flag {
        type Port = u8;
        type IrqState = bool;

        fn read(&mut self, _port: u8) -> u8 {
            0
        }
        fn write(&mut self, _port: u8, _value: u8) {}
        fn set_bit(&mut self, _port: u8, _bit: u8) {}
        fn clear_bit(&mut self, _port: u8, _bit: u8) {}
        fn stall(&mut self, _cycles: u8) {}

        fn mask_interrupts(&mut self) -> bool {
            let was = self.enabled;
            self.enabled = false;
            was
        }

        fn restore_interrupts(&mut self, state: bool) {
            self.enabled = state;
            self.restores += 1;
        }
    }

    #[test]
    fn guard_masks_then_restores_enabled() {
        let mut cpu = Flag {
            enabled: true,
            restores: 0,
        };
        {
            let guard = InterruptGuard::new(&mut cpu);
            assert!(!guard.enabled);
        }
        assert!(cpu.enabled);
        assert_eq!(cpu.restores, 1);
    }

    #[test]
    fn guard_keeps_masked_state_masked() {
        let mut cpu = Flag {
            enabled: false,
            restores: 0,
        };
        drop(InterruptGuard::new(&mut cpu));
        assert!(!cpu.enabled);
        assert_eq!(cpu.restores, 1);
    }
}
