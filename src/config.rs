//! Panel dimensions

use crate::{MAX_HEIGHT, MAX_WIDTH};

/// Width and height of the driven panel area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dimensions {
    width: u16,
    height: u16,
}

impl Dimensions {
    /// Creates new dimensions.
    ///
    /// Values that are zero, negative or above the panel maximum (960x540) are silently replaced
    /// by the maximum, so a misconfigured driver still scans the whole panel.
    pub fn new(width: i32, height: i32) -> Dimensions {
        Dimensions {
            width: clamp_or_max(width, MAX_WIDTH),
            height: clamp_or_max(height, MAX_HEIGHT),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes per row in 1 bit per pixel packing
    pub fn line_bytes_1bpp(&self) -> usize {
        usize::from(self.width) / 8
    }

    /// Bytes per row in packed 4 bit per pixel (two pixels per byte)
    pub fn line_bytes_4bpp(&self) -> usize {
        usize::from(self.width) / 2
    }

    /// Bytes per row sent to the panel during a grayscale pass (2 bits per pixel)
    pub fn line_bytes_drive(&self) -> usize {
        usize::from(self.width) / 4
    }
}

impl Default for Dimensions {
    fn default() -> Dimensions {
        Dimensions {
            width: MAX_WIDTH,
            height: MAX_HEIGHT,
        }
    }
}

fn clamp_or_max(value: i32, max: u16) -> u16 {
    match u16::try_from(value) {
        Ok(v) if v > 0 && v <= max => v,
        _ => max,
    }
}
