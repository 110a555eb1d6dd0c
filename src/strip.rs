//! `PixelSink` over a `smart-leds` driver

use smart_leds::SmartLedsWrite;

use crate::PixelSink;
use crate::color::{OFF, Rgb, expand_to_8bit};

/// Pixel buffer that pushes whole frames to a [`SmartLedsWrite`] driver
///
/// Channels are kept at 7 bits while rendering and doubled on flush. Writes
/// past `N` are ignored.
///
/// N is the number of LEDs in the strip
pub struct StripBuffer<W, const N: usize> {
    driver: W,
    pixels: [Rgb; N],
}

impl<W, const N: usize> StripBuffer<W, N>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub const fn new(driver: W) -> Self {
        Self {
            driver,
            pixels: [OFF; N],
        }
    }

    /// Pixels as rendered, before 8-bit expansion
    pub const fn pixels(&self) -> &[Rgb; N] {
        &self.pixels
    }

    pub const fn driver(&self) -> &W {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut W {
        &mut self.driver
    }

    pub fn into_driver(self) -> W {
        self.driver
    }
}

impl<W, const N: usize> PixelSink for StripBuffer<W, N>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    type Error = W::Error;

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.driver
            .write(self.pixels.iter().copied().map(expand_to_8bit))
    }
}
