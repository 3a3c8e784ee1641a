//! Grid geometry.
//!
//! Turns a canvas size and the number of items on the current page into a
//! column/row count and a per-slot pixel size. With `adaptive` on, a page
//! that is not full is reshaped into a grid whose aspect follows the
//! canvas, so three images on a wide canvas sit side by side instead of
//! filling three cells of a 2x2 grid.

/// Active grid for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridGeometry {
    pub cols: u32,
    pub rows: u32,
    pub slot_width: u32,
    pub slot_height: u32,
}

impl GridGeometry {
    /// Both slot dimensions are non-zero.
    pub fn is_drawable(&self) -> bool {
        self.slot_width > 0 && self.slot_height > 0
    }

    /// Top-left pixel of the cell at page-relative index `i`.
    pub fn cell_origin(&self, i: usize, pad_h: u32, pad_v: u32) -> (i64, i64) {
        let cols = self.cols.max(1) as usize;
        let (row, col) = (i / cols, i % cols);
        (
            col as i64 * (self.slot_width + pad_h) as i64,
            row as i64 * (self.slot_height + pad_v) as i64,
        )
    }
}

/// Canvas size, configured grid, and padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInput {
    pub width: u32,
    pub height: u32,
    pub cols: u32,
    pub rows: u32,
    pub adaptive: bool,
    pub pad_h: u32,
    pub pad_v: u32,
}

/// Compute the grid for a page holding `items` entries.
///
/// # Examples
/// ```
/// # use dirpreview::layout::{compute_geometry, LayoutInput};
/// let input = LayoutInput { width: 200, height: 100, cols: 3, rows: 3, adaptive: true, pad_h: 0, pad_v: 0 };
/// let grid = compute_geometry(&input, 2);
/// assert_eq!((grid.cols, grid.rows), (2, 1));
/// assert_eq!((grid.slot_width, grid.slot_height), (100, 100));
/// ```
pub fn compute_geometry(input: &LayoutInput, items: usize) -> GridGeometry {
    let (cols, rows) = if input.width == 0 || input.height == 0 {
        (input.cols, input.rows)
    } else {
        active_grid(input, items)
    };

    GridGeometry {
        cols,
        rows,
        slot_width: slot_extent(input.width, cols, input.pad_h),
        slot_height: slot_extent(input.height, rows, input.pad_v),
    }
}

fn active_grid(input: &LayoutInput, items: usize) -> (u32, u32) {
    let page_size = input.cols as usize * input.rows as usize;
    if !input.adaptive || items == 0 || items >= page_size {
        return (input.cols, input.rows);
    }

    let aspect = input.width as f64 / input.height as f64;
    let cols = ((aspect * items as f64).sqrt().round() as usize).max(1);
    let rows = items.div_ceil(cols);
    (cols as u32, rows as u32)
}

/// Pixel size of one slot along an axis: the canvas minus the gaps, split
/// evenly. Zero when there are no cells or the padding eats the canvas.
fn slot_extent(canvas: u32, cells: u32, pad: u32) -> u32 {
    if canvas == 0 || cells == 0 {
        return 0;
    }
    let gaps = (cells - 1).saturating_mul(pad);
    canvas.saturating_sub(gaps) / cells
}
