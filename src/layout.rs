//! Uniform call surface over the four emitters.
//!
//! Each implementation forwards to its own hand-scheduled routine; the choice
//! is made by type at compile time.

use crate::cpu::Cpu;
use crate::dual::emit_dual;
use crate::frame::Frame;
use crate::pins::{Pin, SharedPins};
use crate::quad::emit_quad;
use crate::single::emit_single;
use crate::triple::emit_triple;

/// A set of `N` output pins that knows which emitter drives it.
pub trait Layout<P, const N: usize> {
    /// Sends `frame` on these pins.
    fn emit<C: Cpu<Port = P>>(&self, cpu: &mut C, frame: &Frame<'_, N>);
}

impl<P: Copy + PartialEq> Layout<P, 1> for Pin<P> {
    #[inline]
    fn emit<C: Cpu<Port = P>>(&self, cpu: &mut C, frame: &Frame<'_, 1>) {
        emit_single(cpu, *self, frame);
    }
}

impl<P: Copy + PartialEq> Layout<P, 2> for [Pin<P>; 2] {
    #[inline]
    fn emit<C: Cpu<Port = P>>(&self, cpu: &mut C, frame: &Frame<'_, 2>) {
        emit_dual(cpu, *self, frame);
    }
}

impl<P: Copy + PartialEq> Layout<P, 3> for SharedPins<P, 3> {
    #[inline]
    fn emit<C: Cpu<Port = P>>(&self, cpu: &mut C, frame: &Frame<'_, 3>) {
        emit_triple(cpu, *self, frame);
    }
}

impl<P: Copy + PartialEq> Layout<P, 4> for SharedPins<P, 4> {
    #[inline]
    fn emit<C: Cpu<Port = P>>(&self, cpu: &mut C, frame: &Frame<'_, 4>) {
        emit_quad(cpu, *self, frame);
    }
}
