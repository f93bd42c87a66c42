//! Output channel descriptors.
//!
//! Descriptors are meant to be `const` items: the constructors are `const fn`
//! and reject invalid bit positions at compile time when used that way.

/// One output pin: a register and a bit position within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin<P> {
    port: P,
    bit: u8,
}

impl<P: Copy> Pin<P> {
    /// Creates a descriptor for bit `bit` of `port`.
    ///
    /// # Panics
    /// If `bit` is not in `0..8`.
    pub const fn new(port: P, bit: u8) -> Self {
        assert!(bit < 8, "pin bit must be in 0..8");
        Self { port, bit }
    }

    /// The register this pin lives on.
    #[inline]
    pub const fn port(&self) -> P {
        self.port
    }

    /// Bit position within the register.
    #[inline]
    pub const fn bit(&self) -> u8 {
        self.bit
    }

    /// Single-bit mask of this pin.
    #[inline]
    pub const fn mask(&self) -> u8 {
        1 << self.bit
    }
}

/// `N` pins on one shared register, so one write moves all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SharedPins<P, const N: usize> {
    port: P,
    bits: [u8; N],
}

impl<P: Copy, const N: usize> SharedPins<P, N> {
    /// Creates a descriptor for `bits` of `port`, in channel order.
    ///
    /// # Panics
    /// If any bit is not in `0..8` or two channels name the same bit.
    pub const fn new(port: P, bits: [u8; N]) -> Self {
        let mut seen = 0u8;
        let mut i = 0;
        while i < N {
            assert!(bits[i] < 8, "pin bit must be in 0..8");
            assert!(seen & (1 << bits[i]) == 0, "channels must use distinct bits");
            seen |= 1 << bits[i];
            i += 1;
        }
        Self { port, bits }
    }

    /// The shared register.
    #[inline]
    pub const fn port(&self) -> P {
        self.port
    }

    /// Bit positions in channel order.
    #[inline]
    pub const fn bits(&self) -> [u8; N] {
        self.bits
    }

    /// Per-channel single-bit masks.
    pub const fn masks(&self) -> [u8; N] {
        let mut masks = [0u8; N];
        let mut i = 0;
        while i < N {
            masks[i] = 1 << self.bits[i];
            i += 1;
        }
        masks
    }

    /// Union of all channel masks.
    pub const fn all(&self) -> u8 {
        let mut all = 0u8;
        let mut i = 0;
        while i < N {
            all |= 1 << self.bits[i];
            i += 1;
        }
        all
    }

    /// Descriptor of channel `channel` as a standalone pin.
    pub const fn pin(&self, channel: usize) -> Pin<P> {
        Pin::new(self.port, self.bits[channel])
    }
}
