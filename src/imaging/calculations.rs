//! Pure calculation functions for image placement.
//!
//! All functions here are pure and testable without any I/O or images.

/// Edge length of one checkerboard cell, in pixels.
pub const CHECKER_CELL: u32 = 8;
/// Grey level of the light checkerboard cells.
pub const CHECKER_LIGHT: u8 = 220;
/// Grey level of the dark checkerboard cells.
pub const CHECKER_DARK: u8 = 180;

/// Largest size with the source's aspect ratio that fits inside `slot`.
///
/// The image is matched to the slot edge it is relatively longer on; the
/// other edge is scaled proportionally and truncated. Both results are at
/// least 1 so that a degenerate image still produces a drawable thumbnail.
///
/// # Examples
/// ```
/// # use dirpreview::imaging::inscribe;
/// // 400x200 into 100x100 → 100x50
/// assert_eq!(inscribe((400, 200), (100, 100)), (100, 50));
///
/// // small images are enlarged too: 10x20 into 100x100 → 50x100
/// assert_eq!(inscribe((10, 20), (100, 100)), (50, 100));
/// ```
pub fn inscribe(source: (u32, u32), slot: (u32, u32)) -> (u32, u32) {
    let (iw, ih) = source;
    let (sw, sh) = slot;
    if iw == 0 || ih == 0 || sw == 0 || sh == 0 {
        return (sw.max(1), sh.max(1));
    }

    let ratio = (iw as f64 / ih as f64) / (sw as f64 / sh as f64);
    let (w, h) = if ratio > 1.0 {
        (sw, (sw as f64 / iw as f64 * ih as f64) as u32)
    } else if ratio < 1.0 {
        ((sh as f64 / ih as f64 * iw as f64) as u32, sh)
    } else {
        (sw, sh)
    };
    (w.max(1), h.max(1))
}

/// Whether an image of `source` size spills over `slot` in either dimension.
pub fn exceeds(source: (u32, u32), slot: (u32, u32)) -> bool {
    source.0 > slot.0 || source.1 > slot.1
}

/// Offset that centres `inner` inside `outer` along one axis.
///
/// Negative when the inner extent is larger; the overflow is split evenly.
pub fn centre_offset(outer: u32, inner: u32) -> i64 {
    (outer as i64 - inner as i64) / 2
}

/// Grey level of the checkerboard at pixel `(x, y)`.
pub fn checker_level(x: u32, y: u32) -> u8 {
    if ((x / CHECKER_CELL) + (y / CHECKER_CELL)) % 2 == 0 {
        CHECKER_LIGHT
    } else {
        CHECKER_DARK
    }
}

/// Source-over blend of one RGBA pixel onto another.
///
/// The destination colour is treated as opaque; its alpha only feeds the
/// resulting coverage. Integer math, rounded, so fully opaque and fully
/// transparent sources reproduce their input exactly.
pub fn blend_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let a = src[3] as u32;
    let inv = 255 - a;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (a + (dst[3] as u32 * inv + 127) / 255) as u8,
    ]
}
