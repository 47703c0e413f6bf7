//! # Sparse pixel canvas
//!
//! A full size frame buffer for the panel would need 64kB at 1bpp or 259kB at 4bpp, which a
//! lot of microcontrollers can not spare. The canvas only remembers the pixels that are
//! actually set, in two fixed capacity maps: one for 1bpp pixels and one for 4bpp gray levels.
//!
//! The typical workflow is:
//!  - set pixels with `set_pixel()` / `set_gray()` (or draw with embedded_graphics, see the
//!    "graphics" feature)
//!  - `flush()` them to the panel, which draws the bounding box of each plane and empties it
//!  - repeat
//!
//! Pixels inside the bounding box that were not set are drawn as 0, so dark.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::{FnvIndexMap, FnvIndexSet};

use crate::{
    bus::DataBus,
    config::Dimensions,
    device::Ed047tc1,
    error::{CanvasFull, FlushError},
    grayscale::DrawMode,
    shift::ConfigLatch,
    DEFAULT_CLEAR_CYCLES, DEFAULT_PULSE_US,
};

/// Sparse canvas holding up to `N` pixels per plane. `N` must be a power of two.
pub struct Canvas<const N: usize> {
    dims: Dimensions,
    mono: FnvIndexSet<u32, N>,
    gray: FnvIndexMap<u32, u8, N>,
}

/// Bounding box of a set of pixels, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    min_x: u16,
    min_y: u16,
    max_x: u16,
    max_y: u16,
}

impl Bounds {
    fn of(keys: impl Iterator<Item = u32>) -> Option<Bounds> {
        keys.fold(None, |bounds, key| {
            let (x, y) = split(key);
            Some(match bounds {
                None => Bounds {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
            })
        })
    }

    fn width(&self) -> usize {
        usize::from(self.max_x - self.min_x) + 1
    }

    fn height(&self) -> usize {
        usize::from(self.max_y - self.min_y) + 1
    }
}

fn split(key: u32) -> (u16, u16) {
    ((key & 0xFFFF) as u16, (key >> 16) as u16)
}

impl<const N: usize> Canvas<N> {
    /// Creates an empty canvas for a panel of the given size, usually `epd.dimensions()`
    pub fn new(dims: Dimensions) -> Canvas<N> {
        Canvas {
            dims,
            mono: FnvIndexSet::new(),
            gray: FnvIndexMap::new(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    // y in the upper, x in the lower half
    fn key(&self, x: i32, y: i32) -> Option<u32> {
        let x = u16::try_from(x).ok().filter(|x| *x < self.dims.width())?;
        let y = u16::try_from(y).ok().filter(|y| *y < self.dims.height())?;
        Some((u32::from(y) << 16) | u32::from(x))
    }

    /// Sets (white) or unsets a 1bpp pixel. Pixels outside the panel are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), CanvasFull> {
        let key = match self.key(x, y) {
            Some(key) => key,
            None => return Ok(()),
        };
        if on {
            self.mono.insert(key).map_err(|_| CanvasFull)?;
        } else {
            self.mono.remove(&key);
        }
        Ok(())
    }

    /// Whether the 1bpp pixel is set, `false` outside the panel
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.key(x, y).map_or(false, |key| self.mono.contains(&key))
    }

    /// Sets the gray level (0..=15, larger values are capped) of a pixel. Level 0 removes the
    /// pixel. Pixels outside the panel are ignored.
    pub fn set_gray(&mut self, x: i32, y: i32, level: u8) -> Result<(), CanvasFull> {
        let key = match self.key(x, y) {
            Some(key) => key,
            None => return Ok(()),
        };
        let level = level.min(15);
        if level == 0 {
            self.gray.remove(&key);
        } else {
            self.gray.insert(key, level).map_err(|_| CanvasFull)?;
        }
        Ok(())
    }

    /// Gray level of a pixel, 0 when unset or outside the panel
    pub fn gray(&self, x: i32, y: i32) -> u8 {
        self.key(x, y)
            .and_then(|key| self.gray.get(&key).copied())
            .unwrap_or(0)
    }

    /// Number of set pixels in the (1bpp, 4bpp) planes
    pub fn len(&self) -> (usize, usize) {
        (self.mono.len(), self.gray.len())
    }

    pub fn is_empty(&self) -> bool {
        self.mono.is_empty() && self.gray.is_empty()
    }

    /// Forgets all pixels without touching the panel
    pub fn reset(&mut self) {
        self.mono.clear();
        self.gray.clear();
    }

    /// Draws both planes to the panel and empties them.
    ///
    /// The 1bpp plane goes first with the default pulse, then the gray plane in
    /// [`DrawMode::BlackOnWhite`]. Each plane is packed into `scratch`, which has to hold
    /// `ceil(w / 8) * h` bytes for the 1bpp and `ceil(w / 2) * h` bytes for the 4bpp bounding
    /// box. A plane that does not fit is neither drawn nor emptied.
    pub fn flush<CFG, BUS, CKV, STH, DELAY, ERR>(
        &mut self,
        epd: &mut Ed047tc1<CFG, BUS, CKV, STH, DELAY>,
        scratch: &mut [u8],
    ) -> Result<(), FlushError<ERR>>
    where
        CFG: ConfigLatch<Error = ERR>,
        BUS: DataBus<Error = ERR>,
        CKV: OutputPin<Error = ERR>,
        STH: OutputPin<Error = ERR>,
        DELAY: DelayNs,
    {
        if let Some(bounds) = Bounds::of(self.mono.iter().copied()) {
            let stride = (bounds.width() + 7) / 8;
            let bitmap = take_scratch::<ERR>(scratch, stride * bounds.height())?;
            for key in self.mono.iter() {
                let (x, y) = split(*key);
                let col = usize::from(x - bounds.min_x);
                let row = usize::from(y - bounds.min_y);
                bitmap[row * stride + (col >> 3)] |= 0x80 >> (col & 7);
            }
            epd.draw_1bpp(
                i32::from(bounds.min_x),
                i32::from(bounds.min_y),
                bounds.width() as i32,
                bounds.height() as i32,
                bitmap,
                DEFAULT_PULSE_US,
            )?;
            self.mono.clear();
        }

        if let Some(bounds) = Bounds::of(self.gray.keys().copied()) {
            let stride = (bounds.width() + 1) / 2;
            let bitmap = take_scratch::<ERR>(scratch, stride * bounds.height())?;
            for (key, level) in self.gray.iter() {
                let (x, y) = split(*key);
                let col = usize::from(x - bounds.min_x);
                let row = usize::from(y - bounds.min_y);
                let byte = &mut bitmap[row * stride + (col >> 1)];
                if col & 1 == 0 {
                    *byte |= level << 4;
                } else {
                    *byte |= level & 0x0F;
                }
            }
            epd.draw_grayscale(
                i32::from(bounds.min_x),
                i32::from(bounds.min_y),
                bounds.width() as i32,
                bounds.height() as i32,
                bitmap,
                DrawMode::BlackOnWhite,
            )?;
            self.gray.clear();
        }
        Ok(())
    }

    /// Clears the panel with the default two dark/white cycles and forgets all pixels.
    pub fn clear_display<CFG, BUS, CKV, STH, DELAY, ERR>(
        &mut self,
        epd: &mut Ed047tc1<CFG, BUS, CKV, STH, DELAY>,
    ) -> Result<(), ERR>
    where
        CFG: ConfigLatch<Error = ERR>,
        BUS: DataBus<Error = ERR>,
        CKV: OutputPin<Error = ERR>,
        STH: OutputPin<Error = ERR>,
        DELAY: DelayNs,
    {
        epd.clear(DEFAULT_CLEAR_CYCLES)?;
        self.reset();
        Ok(())
    }
}

// zeroed prefix of the scratch buffer
fn take_scratch<E>(scratch: &mut [u8], required: usize) -> Result<&mut [u8], FlushError<E>> {
    let provided = scratch.len();
    let bitmap = scratch
        .get_mut(..required)
        .ok_or(FlushError::ScratchTooSmall { required, provided })?;
    bitmap.fill(0);
    Ok(bitmap)
}
