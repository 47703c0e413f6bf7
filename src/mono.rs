//! 1 bit per pixel drawing
//!
//! A set bit drives the pixel white, a cleared bit drives it dark. Bitmaps are packed MSB first
//! with every source row starting on a new byte.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::{
    bus::DataBus, device::Ed047tc1, geometry, shift::ConfigLatch, DEFAULT_CLEAR_CYCLES,
    DEFAULT_PULSE_US,
};

/// Settle time between the frames of a clear cycle
const CLEAR_SETTLE_MS: u32 = 20;

impl<CFG, BUS, CKV, STH, DELAY, ERR> Ed047tc1<CFG, BUS, CKV, STH, DELAY>
where
    CFG: ConfigLatch<Error = ERR>,
    BUS: DataBus<Error = ERR>,
    CKV: OutputPin<Error = ERR>,
    STH: OutputPin<Error = ERR>,
    DELAY: DelayNs,
{
    /// Draws a 1bpp bitmap with its top left corner at `x, y`.
    ///
    /// `source` holds `h` rows of `ceil(w / 8)` bytes each. Parts outside the panel are clipped
    /// away. Empty or fully clipped rectangles, and a `source` too short for `w * h`, draw
    /// nothing. `pulse_us` is the row drive time, 0 selects the default of 10us; longer pulses
    /// give deeper blacks and whites.
    pub fn draw_1bpp(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        source: &[u8],
        pulse_us: u32,
    ) -> Result<(), ERR> {
        let area = match geometry::clip(x, y, w, h, self.dims) {
            Some(area) => area,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ed047tc1: 1bpp area {},{} {}x{} is not visible", x, y, w, h);
                return Ok(());
            }
        };
        // w and h are positive once clipping succeeded
        let stride = (w as usize + 7) / 8;
        if stride.checked_mul(h as usize).map_or(true, |len| source.len() < len) {
            #[cfg(feature = "defmt")]
            defmt::warn!("ed047tc1: 1bpp source of {} bytes is too short", source.len());
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ed047tc1: draw 1bpp {},{} {}x{}", area.x, area.y, area.cols, area.rows);

        let line_len = self.dims.line_bytes_1bpp();
        self.start_frame()?;
        for row in 0..usize::from(self.dims.height()) {
            if !area.row_range().contains(&row) {
                self.skip_row()?;
                continue;
            }
            let src_start = (area.src_row + row - area.y) * stride;
            let src = &source[src_start..src_start + stride];

            self.line_1bpp.fill(0);
            for col in 0..area.cols {
                let s = area.src_col + col;
                if src[s >> 3] & (0x80 >> (s & 7)) != 0 {
                    let d = area.x + col;
                    self.line_1bpp[d >> 3] |= 0x80 >> (d & 7);
                }
            }
            self.output_row_1bpp(line_len, pulse_us)?;
        }
        self.end_frame()
    }

    /// Flashes the whole panel dark, then white, `cycles` times (0 means 2).
    ///
    /// This removes ghosting of previous images and should be done before drawing a new
    /// picture, at least every now and then.
    pub fn clear(&mut self, cycles: u32) -> Result<(), ERR> {
        let cycles = if cycles == 0 {
            DEFAULT_CLEAR_CYCLES
        } else {
            cycles
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("ed047tc1: clear, {} cycles", cycles);

        for _ in 0..cycles {
            self.full_frame(0x00)?;
            self.delay.delay_ms(CLEAR_SETTLE_MS);
            self.full_frame(0xFF)?;
            self.delay.delay_ms(CLEAR_SETTLE_MS);
        }
        Ok(())
    }

    /// Drives the rows `y..y + h` solid white (`white == true`) or dark, leaving the other
    /// rows alone. The band is clamped to the panel, 0 `pulse_us` selects 10us.
    pub fn fill_rows(&mut self, y: i32, h: i32, white: bool, pulse_us: u32) -> Result<(), ERR> {
        let width = i32::from(self.dims.width());
        let area = match geometry::clip(0, y, width, h, self.dims) {
            Some(area) => area,
            None => return Ok(()),
        };

        let line_len = self.dims.line_bytes_1bpp();
        self.line_1bpp.fill(if white { 0xFF } else { 0x00 });
        self.start_frame()?;
        for row in 0..usize::from(self.dims.height()) {
            if area.row_range().contains(&row) {
                self.output_row_1bpp(line_len, pulse_us)?;
            } else {
                self.skip_row()?;
            }
        }
        self.end_frame()
    }

    // one frame with the same byte on every row
    fn full_frame(&mut self, fill: u8) -> Result<(), ERR> {
        let line_len = self.dims.line_bytes_1bpp();
        self.line_1bpp.fill(fill);
        self.start_frame()?;
        for _ in 0..self.dims.height() {
            self.output_row_1bpp(line_len, DEFAULT_PULSE_US)?;
        }
        self.end_frame()
    }
}
