//! # 16 level grayscale drawing
//!
//! The panel itself only knows three things per pixel and row scan: darken (`0b01`), lighten
//! (`0b10`) or leave alone (`0b00`). Gray levels are made by driving a pixel in only some of 15
//! consecutive frames ("passes"). Each pass uses a different row drive time, taken from a
//! contrast schedule. The first passes are short and coarse, the last ones long and fine.
//!
//! ## Lookup table
//! Per pass the driver builds a 4096 entry table which maps 12 bits of packed 4bpp source to a
//! drive byte. The table starts out uniformly driving (`0x55` darken, or `0xAA` lighten for the
//! inverted modes) and gets "carved": once a pixel's level has been reached its two drive bits
//! are cleared, so it is left alone for the remaining passes. Each lookup covers two pixel
//! lanes at once, the low nibble of the index selects bits `0x03`, the second nibble bits
//! `0x0C`.
//!
//! In [`DrawMode::BlackOnWhite`] the brightest level (15) is released in the first pass and
//! level 0 is never released, so a pixel ends up darker the lower its value is.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::{bus::DataBus, device::Ed047tc1, geometry, geometry::Clipped, shift::ConfigLatch};

/// Number of frames composing one grayscale image
pub const PASSES: usize = 15;

/// Entries of the waveform lookup table (12 bit index)
pub const LUT_SIZE: usize = 1 << 12;

/// Row drive time per pass in microseconds, used by all modes except white on black
pub const CONTRAST_DEFAULT: [u32; PASSES] =
    [30, 30, 20, 20, 30, 30, 30, 40, 40, 50, 50, 50, 100, 200, 300];

/// Row drive time per pass in microseconds for [`DrawMode::WhiteOnBlack`]
pub const CONTRAST_WHITE_ON_BLACK: [u32; PASSES] =
    [10, 10, 8, 8, 8, 8, 8, 10, 10, 15, 15, 20, 20, 100, 300];

/// Settle time after each pass
const PASS_SETTLE_MS: u32 = 5;

const LANE_LOW: u8 = 0x03;
const LANE_HIGH: u8 = 0x0C;

/// Polarity of a grayscale draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawMode {
    /// dark image on a white panel, pixels are darkened
    BlackOnWhite,
    /// light image on a white panel, pixels are lightened
    WhiteOnWhite,
    /// light image on a dark panel, pixels are lightened with the short schedule
    WhiteOnBlack,
}

impl DrawMode {
    /// Inverted modes lighten instead of darken
    pub fn is_inverted(self) -> bool {
        matches!(self, DrawMode::WhiteOnBlack | DrawMode::WhiteOnWhite)
    }

    /// The uniform value the lookup table is reset to before carving
    pub fn base_fill(self) -> u8 {
        if self.is_inverted() {
            0xAA
        } else {
            0x55
        }
    }

    /// The row drive times for the 15 passes
    pub fn contrast(self) -> &'static [u32; PASSES] {
        match self {
            DrawMode::WhiteOnBlack => &CONTRAST_WHITE_ON_BLACK,
            DrawMode::BlackOnWhite | DrawMode::WhiteOnWhite => &CONTRAST_DEFAULT,
        }
    }

    /// The intensity level released in `pass`
    pub fn level(self, pass: usize) -> u8 {
        let pass = pass.min(PASSES - 1) as u8;
        if self.is_inverted() {
            pass
        } else {
            15 - pass
        }
    }
}

/// Waveform lookup table, see the module documentation.
#[derive(Clone)]
pub struct Lut {
    table: [u8; LUT_SIZE],
}

impl Lut {
    pub const fn new() -> Lut {
        Lut {
            table: [0u8; LUT_SIZE],
        }
    }

    /// Fills the whole table with the base value of `mode`.
    pub fn reset(&mut self, mode: DrawMode) {
        self.table.fill(mode.base_fill());
    }

    /// Stops driving every lane whose 4 bit sample equals `level`.
    pub fn carve(&mut self, level: u8) {
        let level = usize::from(level & 0x0F);
        for index in (level..LUT_SIZE).step_by(16) {
            self.table[index] &= !LANE_LOW;
        }
        for block in ((level << 4)..LUT_SIZE).step_by(256) {
            for entry in &mut self.table[block..block + 16] {
                *entry &= !LANE_HIGH;
            }
        }
    }

    /// Builds the table for `pass`: reset to the base value, then carve every level released
    /// in this or an earlier pass.
    ///
    /// Rebuilding from the base value each pass still keeps carving monotonic, a lane cleared
    /// in one pass stays cleared in all following passes.
    pub fn prepare_pass(&mut self, mode: DrawMode, pass: usize) {
        self.reset(mode);
        for earlier in 0..=pass.min(PASSES - 1) {
            self.carve(mode.level(earlier));
        }
    }

    /// Drive byte for a 16 bit word of packed 4bpp source, only the low 12 bits are used.
    #[inline]
    pub fn lookup(&self, word: u16) -> u8 {
        self.table[usize::from(word) & (LUT_SIZE - 1)]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.table
    }
}

impl Default for Lut {
    fn default() -> Lut {
        Lut::new()
    }
}

impl<CFG, BUS, CKV, STH, DELAY, ERR> Ed047tc1<CFG, BUS, CKV, STH, DELAY>
where
    CFG: ConfigLatch<Error = ERR>,
    BUS: DataBus<Error = ERR>,
    CKV: OutputPin<Error = ERR>,
    STH: OutputPin<Error = ERR>,
    DELAY: DelayNs,
{
    /// Draws a 4bpp image with its top left corner at `x, y`, in 15 passes.
    ///
    /// `source` holds `h` rows of `ceil(w / 2)` bytes, the high nibble is the even column.
    /// Parts outside the panel are clipped away, like with [`draw_1bpp()`](Self::draw_1bpp).
    /// Empty or fully clipped rectangles and a too short `source` draw nothing.
    ///
    /// This takes a while, 15 full frames plus settle time.
    pub fn draw_grayscale(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        source: &[u8],
        mode: DrawMode,
    ) -> Result<(), ERR> {
        let area = match geometry::clip(x, y, w, h, self.dims) {
            Some(area) => area,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ed047tc1: 4bpp area {},{} {}x{} is not visible", x, y, w, h);
                return Ok(());
            }
        };
        // w and h are positive once clipping succeeded
        let stride = (w as usize + 1) / 2;
        if stride.checked_mul(h as usize).map_or(true, |len| source.len() < len) {
            #[cfg(feature = "defmt")]
            defmt::warn!("ed047tc1: 4bpp source of {} bytes is too short", source.len());
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ed047tc1: draw 4bpp {},{} {}x{} {}",
            area.x,
            area.y,
            area.cols,
            area.rows,
            mode
        );

        let contrast = mode.contrast();
        let drive_len = self.dims.line_bytes_drive();
        for (pass, pulse_us) in contrast.iter().enumerate() {
            #[cfg(feature = "defmt")]
            defmt::trace!("ed047tc1: pass {}, level {}", pass, mode.level(pass));

            self.lut.prepare_pass(mode, pass);
            self.start_frame()?;
            for row in 0..usize::from(self.dims.height()) {
                if !area.row_range().contains(&row) {
                    self.skip_row()?;
                    continue;
                }
                let src_start = (area.src_row + row - area.y) * stride;
                self.compose_drive_line(&source[src_start..src_start + stride], &area);
                self.output_row_drive(drive_len, *pulse_us)?;
            }
            self.end_frame()?;
            self.delay.delay_ms(PASS_SETTLE_MS);
        }
        Ok(())
    }

    // Places the visible samples of one source row into the full width 4bpp scratch and
    // converts it to drive bytes through the current lookup table.
    fn compose_drive_line(&mut self, src: &[u8], area: &Clipped) {
        self.line_4bpp.fill(0);
        for col in 0..area.cols {
            let s = area.src_col + col;
            let sample = if s & 1 == 0 {
                src[s >> 1] >> 4
            } else {
                src[s >> 1] & 0x0F
            };
            let d = area.x + col;
            if d & 1 == 0 {
                self.line_4bpp[d >> 1] |= sample << 4;
            } else {
                self.line_4bpp[d >> 1] |= sample;
            }
        }

        let drive_len = self.dims.line_bytes_drive();
        for (out, pair) in self.line_drive[..drive_len]
            .iter_mut()
            .zip(self.line_4bpp.chunks_exact(2))
        {
            let word = u16::from_le_bytes([pair[0], pair[1]]);
            *out = self.lut.lookup(word);
        }
    }
}
