//! Cycle-counting simulation with a logic-analyzer view of the pins.
//!
//! [`Simulator`] implements [`Cpu`] by charging the `timing::cost` table and
//! recording every register write with the cycle on which it lands. The
//! capture helpers then turn that trace into per-pin pulses and decode them
//! back into bytes the way an LED would.

use crate::cpu::Cpu;
use crate::timing::{BitTiming, cost};
use heapless::Vec;

/// Number of simulated output registers.
pub const PORT_COUNT: usize = 4;

/// A simulated output register, by index below [`PORT_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimPort(pub u8);

/// A register write as the outside world sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edge {
    /// Cycle on which the new value is visible.
    pub cycle: u64,
    /// Register written.
    pub port: SimPort,
    /// Value after the write.
    pub value: u8,
}

/// One high pulse on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulse {
    /// Cycle the pin went high.
    pub rise: u64,
    /// Cycle the pin went low.
    pub fall: u64,
}

impl Pulse {
    /// High time in cycles.
    #[inline]
    pub fn high(&self) -> u64 {
        self.fall - self.rise
    }
}

/// A [`Cpu`] that runs on the host and records up to `CAP` writes.
pub struct Simulator<const CAP: usize> {
    cycle: u64,
    ports: [u8; PORT_COUNT],
    initial: [u8; PORT_COUNT],
    interrupts_enabled: bool,
    masked_at: u64,
    mask_window: Option<(u64, u64)>,
    trace: Vec<Edge, CAP>,
    dropped: usize,
}

impl<const CAP: usize> Default for Simulator<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> Simulator<CAP> {
    /// All registers zero, interrupts enabled, cycle zero.
    pub fn new() -> Self {
        Self {
            cycle: 0,
            ports: [0; PORT_COUNT],
            initial: [0; PORT_COUNT],
            interrupts_enabled: true,
            masked_at: 0,
            mask_window: None,
            trace: Vec::new(),
            dropped: 0,
        }
    }

    /// Sets a register from outside the core, without recording an edge.
    pub fn set_port(&mut self, port: SimPort, value: u8) {
        self.ports[port.0 as usize] = value;
        self.initial[port.0 as usize] = value;
    }

    /// Sets the interrupt-enable flag from outside the core.
    pub fn set_interrupts_enabled(&mut self, enabled: bool) {
        self.interrupts_enabled = enabled;
    }

    /// Forgets recorded edges; pulses are measured from the current levels.
    pub fn reset_trace(&mut self) {
        self.trace.clear();
        self.dropped = 0;
        self.initial = self.ports;
        self.mask_window = None;
    }

    /// Cycles elapsed since creation.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    /// Current value of a register.
    #[inline]
    pub fn port(&self, port: SimPort) -> u8 {
        self.ports[port.0 as usize]
    }

    /// Current level of one pin.
    #[inline]
    pub fn level(&self, port: SimPort, bit: u8) -> bool {
        self.port(port) & (1 << bit) != 0
    }

    /// Whether interrupts are currently enabled.
    #[inline]
    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    /// Cycles at which interrupts were last masked and restored.
    #[inline]
    pub fn mask_window(&self) -> Option<(u64, u64)> {
        self.mask_window
    }

    /// Recorded writes, oldest first.
    #[inline]
    pub fn trace(&self) -> &[Edge] {
        &self.trace
    }

    /// Writes that did not fit in the trace.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// High pulses seen on one pin since the trace was last reset.
    ///
    /// A pin that starts high contributes no pulse until its first rise.
    pub fn pulses(&self, port: SimPort, bit: u8) -> Vec<Pulse, CAP> {
        let mask = 1 << bit;
        let mut pulses = Vec::new();
        let mut rise = None;
        let mut high = self.initial[port.0 as usize] & mask != 0;

        for edge in self.trace.iter().filter(|e| e.port == port) {
            let now_high = edge.value & mask != 0;
            match (high, now_high) {
                (false, true) => rise = Some(edge.cycle),
                (true, false) => {
                    if let Some(rise) = rise.take() {
                        let _ = pulses.push(Pulse {
                            rise,
                            fall: edge.cycle,
                        });
                    }
                }
                _ => {}
            }
            high = now_high;
        }
        pulses
    }

    fn record(&mut self, port: SimPort) {
        let edge = Edge {
            cycle: self.cycle,
            port,
            value: self.ports[port.0 as usize],
        };
        if self.trace.push(edge).is_err() {
            self.dropped += 1;
        }
    }
}

impl<const CAP: usize> Cpu for Simulator<CAP> {
    type Port = SimPort;
    type IrqState = bool;

    fn read(&mut self, port: SimPort) -> u8 {
        self.cycle += cost::IN as u64;
        self.ports[port.0 as usize]
    }

    fn write(&mut self, port: SimPort, value: u8) {
        self.cycle += cost::OUT as u64;
        self.ports[port.0 as usize] = value;
        self.record(port);
    }

    fn set_bit(&mut self, port: SimPort, bit: u8) {
        self.cycle += cost::SBI as u64;
        self.ports[port.0 as usize] |= 1 << bit;
        self.record(port);
    }

    fn clear_bit(&mut self, port: SimPort, bit: u8) {
        self.cycle += cost::CBI as u64;
        self.ports[port.0 as usize] &= !(1 << bit);
        self.record(port);
    }

    fn stall(&mut self, cycles: u8) {
        self.cycle += cycles as u64;
    }

    fn mask_interrupts(&mut self) -> bool {
        // save the status register, clear the enable flag
        self.cycle += (cost::IN + cost::ALU) as u64;
        let was = self.interrupts_enabled;
        self.interrupts_enabled = false;
        self.masked_at = self.cycle;
        was
    }

    fn restore_interrupts(&mut self, state: bool) {
        self.cycle += cost::OUT as u64;
        self.interrupts_enabled = state;
        self.mask_window = Some((self.masked_at, self.cycle));
    }
}

/// Decodes pulses into bytes, eight pulses per byte, MSB first.
///
/// A pulse reads as a one when its high time exceeds the timing's threshold.
/// A trailing partial byte is ignored.
pub fn decode<const B: usize>(pulses: &[Pulse], timing: &BitTiming) -> Vec<u8, B> {
    let threshold = timing.threshold_cycles() as u64;
    let mut bytes = Vec::new();
    for chunk in pulses.chunks_exact(8) {
        let byte = chunk
            .iter()
            .fold(0u8, |acc, pulse| (acc << 1) | (pulse.high() > threshold) as u8);
        if bytes.push(byte).is_err() {
            break;
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::WS2811;

    const P: SimPort = SimPort(1);

    #[test]
    fn writes_are_stamped_after_their_cost() {
        let mut sim = Simulator::<8>::new();
        sim.stall(3);
        sim.write(P, 0x01);
        sim.set_bit(P, 1);
        assert_eq!(
            sim.trace(),
            &[
                Edge { cycle: 4, port: P, value: 0x01 },
                Edge { cycle: 6, port: P, value: 0x03 },
            ]
        );
    }

    #[test]
    fn work_is_charged_like_padding() {
        let mut sim = Simulator::<4>::new();
        sim.work(3);
        sim.fill(2, 5);
        sim.write(P, 0x01);
        assert_eq!(sim.cycles(), 9);
        assert_eq!(sim.trace()[0].cycle, 9);
    }

    #[test]
    fn pulses_pair_rises_with_falls() {
        let mut sim = Simulator::<16>::new();
        sim.set_bit(P, 0);
        sim.stall(2);
        sim.clear_bit(P, 0);
        sim.set_bit(P, 0);
        sim.stall(10);
        sim.clear_bit(P, 0);

        let pulses = sim.pulses(P, 0);
        assert_eq!(pulses.len(), 2);
        assert_eq!(pulses[0].high(), 4);
        assert_eq!(pulses[1].high(), 12);
        assert!(sim.pulses(P, 1).is_empty());
    }

    #[test]
    fn overflow_is_counted() {
        let mut sim = Simulator::<2>::new();
        for _ in 0..5 {
            sim.write(P, 0);
        }
        assert_eq!(sim.trace().len(), 2);
        assert_eq!(sim.dropped(), 3);
    }

    #[test]
    fn decode_reads_msb_first() {
        let short = Pulse { rise: 0, fall: 4 };
        let long = Pulse { rise: 0, fall: 16 };
        let pulses = [long, short, short, short, short, short, long, long];
        let bytes = decode::<4>(&pulses, &WS2811);
        assert_eq!(&bytes[..], &[0b1000_0011]);
    }
}
