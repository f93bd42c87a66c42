//! Pixel storage in wire order.

use core::slice;
use palette::Srgb;

/// One LED's intensities, stored in the order the LED consumes them.
///
/// The strip's internal wiring fixes the wire order as green, red, blue. Each
/// byte is sent most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct Pixel {
    /// First byte on the wire.
    pub g: u8,
    /// Second byte on the wire.
    pub r: u8,
    /// Third byte on the wire.
    pub b: u8,
}

impl Pixel {
    /// All channels dark.
    pub const OFF: Pixel = Pixel { g: 0, r: 0, b: 0 };

    /// Creates a pixel from conventional red, green, blue order.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { g, r, b }
    }

    /// The three bytes in transmission order.
    #[inline]
    pub const fn wire_bytes(&self) -> [u8; 3] {
        [self.g, self.r, self.b]
    }
}

impl From<Srgb<u8>> for Pixel {
    fn from(color: Srgb<u8>) -> Self {
        Pixel::new(color.red, color.green, color.blue)
    }
}

impl From<Pixel> for Srgb<u8> {
    fn from(pixel: Pixel) -> Self {
        Srgb::new(pixel.r, pixel.g, pixel.b)
    }
}

/// Iterator over the wire bytes of a pixel buffer.
///
/// Yields exactly `3 * pixels.len()` bytes and then `None`; it never reads
/// past the buffer.
#[derive(Debug, Clone)]
pub struct WireBytes<'a> {
    pixels: slice::Iter<'a, Pixel>,
    current: [u8; 3],
    offset: usize,
}

impl<'a> WireBytes<'a> {
    /// Creates an iterator over `pixels`.
    pub fn new(pixels: &'a [Pixel]) -> Self {
        Self {
            pixels: pixels.iter(),
            current: [0; 3],
            offset: 3,
        }
    }

    /// Next byte, or zero once the buffer is exhausted.
    ///
    /// Emitters fetch one byte ahead of the end-of-frame check, so the last
    /// fetch of a frame lands one past the buffer. It yields a zero here
    /// instead of touching memory the frame does not own.
    #[inline]
    pub fn fetch(&mut self) -> u8 {
        self.next().unwrap_or(0)
    }
}

impl Iterator for WireBytes<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.offset == 3 {
            self.current = self.pixels.next()?.wire_bytes();
            self.offset = 0;
        }
        let byte = self.current[self.offset];
        self.offset += 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.pixels.len() * 3 + (3 - self.offset);
        (len, Some(len))
    }
}

impl ExactSizeIterator for WireBytes<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_takes_rgb_and_stores_grb() {
        let pixel = Pixel::new(0x11, 0x22, 0x33);
        assert_eq!(pixel.wire_bytes(), [0x22, 0x11, 0x33]);
    }

    #[test]
    fn converts_from_palette() {
        let pixel: Pixel = Srgb::new(255u8, 128, 0).into();
        assert_eq!(pixel, Pixel { g: 128, r: 255, b: 0 });

        let back: Srgb<u8> = pixel.into();
        assert_eq!(back, Srgb::new(255u8, 128, 0));
    }

    #[test]
    fn wire_bytes_flatten_in_order() {
        let pixels = [Pixel::new(1, 2, 3), Pixel::new(4, 5, 6)];
        let mut bytes = WireBytes::new(&pixels);
        assert_eq!(bytes.len(), 6);

        let mut out = [0u8; 6];
        for slot in out.iter_mut() {
            *slot = bytes.next().unwrap();
        }
        assert_eq!(out, [2, 1, 3, 5, 4, 6]);
        assert_eq!(bytes.next(), None);
        assert_eq!(bytes.len(), 0);
    }
}
