//! Error types
//!
//! The panel interface is write only, so the drawing and power functions can only fail with
//! the error of the pins they toggle, which is passed through unchanged. The types in here
//! cover the [`Canvas`](crate::canvas::Canvas), which has a fixed capacity and needs scratch
//! memory to flush.

use core::fmt;

/// The canvas has no room for another pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CanvasFull;

impl fmt::Display for CanvasFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Canvas is full")
    }
}

impl core::error::Error for CanvasFull {}

/// Errors while flushing a canvas to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushError<E> {
    /// error of the pins driving the panel
    Pin(E),
    /// The scratch buffer cannot hold the packed bounding box of the pixels
    ScratchTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<E> From<E> for FlushError<E> {
    fn from(e: E) -> FlushError<E> {
        FlushError::Pin(e)
    }
}

impl<E> fmt::Display for FlushError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlushError::Pin(_) => write!(f, "Pin error"),
            FlushError::ScratchTooSmall { required, provided } => write!(
                f,
                "Scratch buffer too small: required {required} bytes, provided {provided}"
            ),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for FlushError<E> {}
