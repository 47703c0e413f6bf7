//! # Driver for the ED047TC1 parallel e-paper panel
//!
//! The ED047TC1 is the 4.7" 960x540 electrophoretic panel found on the LilyGo T5 4.7" boards.
//! Unlike most e-paper modules it has no controller with a frame buffer and built in
//! waveforms: the host drives the gate and source drivers directly, row by row, and is
//! responsible for all timing. This crate does that on top of embedded_hal `OutputPin`s and a
//! `DelayNs`:
//!  - a 3-wire shift register for the control lines (power rails, start pulse, ...)
//!  - an 8 bit parallel data bus with a write strobe for the row data
//!  - the vertical clock (CKV) and the input enable (STH)
//!
//! Black and white images are drawn in a single frame. 16 level grayscale images take 15
//! frames with different drive times, see the grayscale module.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ed047tc1::prelude::*;
//!
//! let cfg = ShiftRegister::new(cfg_data, cfg_clk, cfg_str);
//! let bus = ParallelBus::new([Some(d0), Some(d1), Some(d2), Some(d3),
//!                             Some(d4), Some(d5), Some(d6), Some(d7)], ckh)?;
//! let mut epd = Ed047tc1::new(cfg, bus, ckv, sth, delay, Dimensions::default())?;
//!
//! epd.power_on()?;
//! epd.clear(2)?;
//! epd.draw_grayscale(0, 0, 64, 64, &image, DrawMode::BlackOnWhite)?;
//! epd.power_off()?;
//! ```
//!
//! ## Features
//!  - "graphics": embedded_graphics `DrawTarget` for the sparse [`Canvas`](canvas::Canvas)
//!  - "defmt": log power transitions and draw calls with defmt

#![no_std]

pub mod bus;
pub mod canvas;
pub mod config;
pub mod device;
pub mod error;
mod frame;
mod geometry;
pub mod grayscale;
mod mono;
pub mod power;
pub mod register;
pub mod shift;

#[cfg(feature = "graphics")]
pub mod drawtarget;

pub use crate::device::Ed047tc1;

/// Largest supported panel width in pixels
pub const MAX_WIDTH: u16 = 960;
/// Largest supported panel height in pixels
pub const MAX_HEIGHT: u16 = 540;

pub(crate) const MAX_LINE_BYTES_1BPP: usize = MAX_WIDTH as usize / 8;
pub(crate) const MAX_LINE_BYTES_4BPP: usize = MAX_WIDTH as usize / 2;
pub(crate) const MAX_LINE_BYTES_DRIVE: usize = MAX_WIDTH as usize / 4;

/// Row drive time used for 1bpp rows when none is given
pub const DEFAULT_PULSE_US: u32 = 10;

/// Dark/white cycles of a clear when none are given
pub const DEFAULT_CLEAR_CYCLES: u32 = 2;

/// A prelude for convenience, it pulls the driver, its building blocks and all enums into scope.
pub mod prelude {
    pub use crate::{
        bus::{DataBus, ParallelBus},
        canvas::Canvas,
        config::Dimensions,
        device::Ed047tc1,
        error::{CanvasFull, FlushError},
        grayscale::DrawMode,
        power::PowerState,
        register::{ControlRegister, Field},
        shift::{ConfigLatch, ShiftRegister},
        DEFAULT_PULSE_US,
    };
}
