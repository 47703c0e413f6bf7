//! embedded_graphics support for the [`Canvas`]
//!
//! This module is behind the "graphics" feature flag. With it all circle/rectangle/text/image
//! primitives of the embedded_graphics library can be drawn into the canvas, in 16 gray levels
//! directly on the canvas, or black and white through [`Canvas::mono()`].
//! Nothing is sent to the panel until `Canvas::flush()` is called.

use embedded_graphics_core::{
    pixelcolor::{BinaryColor, Gray4, GrayColor},
    prelude::*,
};

use crate::{canvas::Canvas, error::CanvasFull};

/// 1bpp view of a canvas, see [`Canvas::mono()`]
pub struct MonoView<'a, const N: usize> {
    canvas: &'a mut Canvas<N>,
}

impl<const N: usize> Canvas<N> {
    /// Borrows the 1bpp plane as a `DrawTarget<Color = BinaryColor>`.
    /// `BinaryColor::On` sets (white) a pixel, `Off` unsets it.
    pub fn mono(&mut self) -> MonoView<'_, N> {
        MonoView { canvas: self }
    }
}

impl<const N: usize> DrawTarget for Canvas<N> {
    type Error = CanvasFull;
    type Color = Gray4;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), CanvasFull>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_gray(coord.x, coord.y, color.luma())?;
        }
        Ok(())
    }
}

impl<const N: usize> OriginDimensions for Canvas<N> {
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(dims.width().into(), dims.height().into())
    }
}

impl<const N: usize> DrawTarget for MonoView<'_, N> {
    type Error = CanvasFull;
    type Color = BinaryColor;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), CanvasFull>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.canvas.set_pixel(coord.x, coord.y, color.is_on())?;
        }
        Ok(())
    }
}

impl<const N: usize> OriginDimensions for MonoView<'_, N> {
    fn size(&self) -> Size {
        self.canvas.size()
    }
}
