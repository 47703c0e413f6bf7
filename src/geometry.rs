//! Rectangle clipping against the panel area
//!
//! Both renderers accept rectangles in signed panel coordinates. Anything outside the panel is
//! cut away by dropping whole source columns and rows, the rest gets drawn.

use core::ops::Range;

use crate::config::Dimensions;

/// Visible part of a source rectangle after clipping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Clipped {
    /// first panel column that gets drawn
    pub x: usize,
    /// first panel row that gets drawn
    pub y: usize,
    /// number of visible columns
    pub cols: usize,
    /// number of visible rows
    pub rows: usize,
    /// source column that lands on panel column `x`
    pub src_col: usize,
    /// source row that lands on panel row `y`
    pub src_row: usize,
}

impl Clipped {
    /// Panel rows covered by the visible part
    pub fn row_range(&self) -> Range<usize> {
        self.y..self.y + self.rows
    }
}

/// Clips the rectangle `x, y, w, h` against `dims`.
///
/// Returns `None` when the rectangle is empty or lies completely outside the panel.
pub(crate) fn clip(x: i32, y: i32, w: i32, h: i32, dims: Dimensions) -> Option<Clipped> {
    if w <= 0 || h <= 0 {
        return None;
    }
    let (x, src_col, cols) = clip_axis(x, w, dims.width())?;
    let (y, src_row, rows) = clip_axis(y, h, dims.height())?;
    Some(Clipped {
        x,
        y,
        cols,
        rows,
        src_col,
        src_row,
    })
}

// returns (first visible position, skipped source entries, visible length)
fn clip_axis(start: i32, len: i32, limit: u16) -> Option<(usize, usize, usize)> {
    let start = i64::from(start);
    let end = start + i64::from(len);
    let first = start.max(0);
    let last = end.min(i64::from(limit));
    if last <= first {
        return None;
    }
    Some((
        first as usize,
        (first - start) as usize,
        (last - first) as usize,
    ))
}
