//! Register values precomputed for one-write transitions.

/// Register values for driving several pins of one port in a single write.
///
/// Captured once per frame from the register's current value, so pins the
/// frame does not own keep their level. A zero mask is inert: it neither
/// rises nor falls, which lets a caller reserve a slot for a channel that
/// lives on another register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortSnapshot<const N: usize> {
    low: u8,
    high: u8,
    masks: [u8; N],
}

impl<const N: usize> PortSnapshot<N> {
    /// Captures the all-low and all-high values for `masks` from `current`.
    pub fn capture(current: u8, masks: [u8; N]) -> Self {
        let all = masks.iter().fold(0, |acc, mask| acc | mask);
        let low = current & !all;
        Self {
            low,
            high: low | all,
            masks,
        }
    }

    /// Every target pin low.
    #[inline]
    pub fn low(&self) -> u8 {
        self.low
    }

    /// Every target pin high.
    #[inline]
    pub fn high(&self) -> u8 {
        self.high
    }

    /// High with the pins of channels whose `probe` bit is clear pulled low.
    #[inline]
    pub fn pattern(&self, bytes: &[u8; N], probe: u8) -> u8 {
        self.masks
            .iter()
            .zip(bytes)
            .fold(self.high, |value, (mask, byte)| {
                if byte & probe != 0 { value } else { value & !mask }
            })
    }
}
