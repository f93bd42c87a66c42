//! Validated multi-channel frames.

use crate::pixel::{Pixel, WireBytes};

/// Largest pixel count a frame may carry (the interface count is 16-bit).
pub const MAX_PIXELS: usize = u16::MAX as usize;

/// Frame validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// A channel buffer holds no pixels.
    Empty {
        /// Offending channel index.
        channel: usize,
    },

    /// A channel buffer differs in length from channel 0.
    LengthMismatch {
        /// Offending channel index.
        channel: usize,
        /// Pixel count of channel 0.
        expected: usize,
        /// Pixel count of the offending channel.
        actual: usize,
    },

    /// More pixels than the 16-bit count can express.
    TooLong {
        /// Pixel count of channel 0.
        len: usize,
    },
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::Empty { channel } => {
                write!(f, "channel {} has no pixels", channel)
            }
            FrameError::LengthMismatch {
                channel,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "channel {} has {} pixels, expected {} like channel 0",
                    channel, actual, expected
                )
            }
            FrameError::TooLong { len } => {
                write!(f, "{} pixels exceed the limit of {}", len, MAX_PIXELS)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// `N` equally long, non-empty pixel buffers sent in one transmission.
///
/// Buffers are borrowed for the lifetime of the frame, so nothing can write
/// to them while an emitter reads them.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a, const N: usize> {
    channels: [&'a [Pixel]; N],
}

impl<'a, const N: usize> Frame<'a, N> {
    /// Validates and wraps `channels`.
    pub fn new(channels: [&'a [Pixel]; N]) -> Result<Self, FrameError> {
        const { assert!(N > 0, "a frame needs at least one channel") };

        let expected = channels.first().map_or(0, |c| c.len());

        for (channel, pixels) in channels.iter().enumerate() {
            if pixels.is_empty() {
                return Err(FrameError::Empty { channel });
            }
            if pixels.len() != expected {
                return Err(FrameError::LengthMismatch {
                    channel,
                    expected,
                    actual: pixels.len(),
                });
            }
        }

        if expected > MAX_PIXELS {
            return Err(FrameError::TooLong { len: expected });
        }

        Ok(Self { channels })
    }

    /// Pixels per channel.
    #[inline]
    pub fn pixel_count(&self) -> u16 {
        self.channels[0].len() as u16
    }

    /// Bytes per channel (`3 * pixel_count`).
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.channels[0].len() * 3
    }

    /// Buffer of channel `channel`.
    #[inline]
    pub fn channel(&self, channel: usize) -> &'a [Pixel] {
        self.channels[channel]
    }

    /// Wire-order bytes of channel `channel`.
    #[inline]
    pub fn wire_bytes(&self, channel: usize) -> WireBytes<'a> {
        WireBytes::new(self.channels[channel])
    }
}

impl<'a> Frame<'a, 1> {
    /// Single-channel frame over `pixels`.
    pub fn single(pixels: &'a [Pixel]) -> Result<Self, FrameError> {
        Self::new([pixels])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_channel_zero() {
        let a = [Pixel::OFF; 4];
        let b = [Pixel::new(1, 2, 3); 4];
        let frame = Frame::new([&a[..], &b[..]]).unwrap();
        assert_eq!(frame.pixel_count(), 4);
        assert_eq!(frame.byte_len(), 12);
        assert_eq!(frame.channel(1)[0], Pixel::new(1, 2, 3));
    }

    #[test]
    fn display_names_the_channel() {
        extern crate std;
        use std::string::ToString;

        let err = FrameError::LengthMismatch {
            channel: 2,
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "channel 2 has 3 pixels, expected 5 like channel 0"
        );
    }
}
