//! Frame and row timing of the gate driver
//!
//! Every draw is one or more frames. A frame starts with `start_frame()`, then each of the
//! panel rows is either sent (`output_row_*`) or passed over (`skip_row()`), exactly once and
//! top to bottom, and ends with `end_frame()`. Frames never nest.
//!
//! All timings are in microseconds.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::{bus::DataBus, device::Ed047tc1, register::Field, shift::ConfigLatch, DEFAULT_PULSE_US};

/// CKV low time after the row enable pulse, before the row data goes out
const ROW_SETTLE_US: u32 = 50;

/// Where the driver is in the frame sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum FrameState {
    Idle,
    /// a frame is running, `rows` of them are done
    Active { rows: u16 },
}

#[derive(Clone, Copy)]
pub(crate) enum RowBuffer {
    Mono,
    Drive,
}

impl<CFG, BUS, CKV, STH, DELAY, ERR> Ed047tc1<CFG, BUS, CKV, STH, DELAY>
where
    CFG: ConfigLatch<Error = ERR>,
    BUS: DataBus<Error = ERR>,
    CKV: OutputPin<Error = ERR>,
    STH: OutputPin<Error = ERR>,
    DELAY: DelayNs,
{
    pub(crate) fn start_frame(&mut self) -> Result<(), ERR> {
        debug_assert_eq!(self.frame, FrameState::Idle, "frames must not nest");
        #[cfg(feature = "defmt")]
        if self.power == crate::power::PowerState::Off {
            defmt::warn!("ed047tc1: drawing while the panel is powered off");
        }

        self.update(Field::Mode, true)?;
        self.pulse_ckv(1, 1)?;

        self.update(Field::StartPulse, false)?;
        self.delay.delay_us(1_000);
        self.pulse_ckv(10, 10)?;

        self.update(Field::StartPulse, true)?;
        self.pulse_ckv(0, 10)?;

        self.update(Field::OutputEnable, true)?;
        self.pulse_ckv(1, 1)?;

        self.frame = FrameState::Active { rows: 0 };
        Ok(())
    }

    pub(crate) fn end_frame(&mut self) -> Result<(), ERR> {
        debug_assert_eq!(
            self.frame,
            FrameState::Active {
                rows: self.dims.height()
            },
            "every row must be sent or skipped once per frame"
        );

        self.update(Field::OutputEnable, false)?;
        self.update(Field::Mode, false)?;
        self.pulse_ckv(1, 1)?;
        self.pulse_ckv(1, 1)?;

        self.frame = FrameState::Idle;
        Ok(())
    }

    /// Advances the gate driver by one row without sending data.
    pub(crate) fn skip_row(&mut self) -> Result<(), ERR> {
        self.pulse_ckv(45, 5)?;
        self.row_done();
        Ok(())
    }

    /// Single latch enable pulse, moves the previous row data to the source driver outputs.
    pub(crate) fn latch_row(&mut self) -> Result<(), ERR> {
        self.update(Field::LatchEnable, true)?;
        self.update(Field::LatchEnable, false)
    }

    /// Sends the first `len` bytes of the 1bpp row buffer. A zero pulse uses the default 10us.
    pub(crate) fn output_row_1bpp(&mut self, len: usize, pulse_high_us: u32) -> Result<(), ERR> {
        let pulse_high_us = if pulse_high_us == 0 {
            DEFAULT_PULSE_US
        } else {
            pulse_high_us
        };
        self.output_row(RowBuffer::Mono, len, pulse_high_us)
    }

    /// Sends the first `len` bytes of the grayscale drive row with the pass specific pulse.
    pub(crate) fn output_row_drive(&mut self, len: usize, pulse_high_us: u32) -> Result<(), ERR> {
        self.output_row(RowBuffer::Drive, len, pulse_high_us)
    }

    fn output_row(&mut self, buffer: RowBuffer, len: usize, pulse_high_us: u32) -> Result<(), ERR> {
        self.latch_row()?;
        self.pulse_ckv(pulse_high_us, ROW_SETTLE_US)?;
        let line = match buffer {
            RowBuffer::Mono => &self.line_1bpp[..len],
            RowBuffer::Drive => &self.line_drive[..len],
        };
        self.bus.write_line(line)?;
        self.pulse_ckv(1, 1)?;
        self.row_done();
        Ok(())
    }

    fn row_done(&mut self) {
        if let FrameState::Active { rows } = &mut self.frame {
            *rows += 1;
        }
    }
}
