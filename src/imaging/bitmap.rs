//! Decoded images and raw bitmaps.
//!
//! [`Image`] wraps an [`image::DynamicImage`] and exposes only the handful of
//! operations a thumbnail grid needs. [`Bitmap`] is the flat RGBA8 export
//! handed to hosts that want raw pixels instead of an `image` buffer.

use super::calculations::{blend_over, centre_offset, checker_level, inscribe};
use super::params::{Color, Filter};
use image::{DynamicImage, GenericImageView, ImageResult, Rgba, RgbaImage};
use std::path::Path;

/// A decoded image, owned by exactly one gallery slot.
#[derive(Debug, Clone)]
pub struct Image {
    pixels: DynamicImage,
}

impl Image {
    pub fn new(pixels: DynamicImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Bits per pixel of the decoded colour type (24 for RGB8, 32 for RGBA8, ...).
    pub fn bpp(&self) -> u16 {
        self.pixels.color().bits_per_pixel()
    }

    pub fn has_alpha(&self) -> bool {
        self.pixels.color().has_alpha()
    }

    /// Size this image would have after [`scale_to_fit`](Self::scale_to_fit).
    pub fn inscribe(&self, width: u32, height: u32) -> (u32, u32) {
        inscribe(self.dimensions(), (width, height))
    }

    /// Rescale to the largest aspect-preserving size inside `width × height`.
    ///
    /// Scales up as well as down.
    pub fn scale_to_fit(&self, width: u32, height: u32, filter: Filter) -> Image {
        let (w, h) = self.inscribe(width, height);
        Image::new(self.pixels.resize_exact(w, h, filter.filter_type()))
    }

    /// Flatten onto a grey checkerboard so transparent regions stay visible.
    pub fn composite_over_checkerboard(&self) -> Image {
        let (w, h) = self.dimensions();
        let mut canvas = RgbaImage::from_fn(w, h, |x, y| {
            let level = checker_level(x, y);
            Rgba([level, level, level, 255])
        });
        blend_onto(&mut canvas, &self.pixels.to_rgba8(), 0, 0);
        Image::new(DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8()))
    }

    /// Flatten onto a solid background colour.
    pub fn composite_over_color(&self, color: Color) -> Image {
        let (w, h) = self.dimensions();
        let mut canvas = RgbaImage::from_pixel(w, h, color.to_rgba());
        blend_onto(&mut canvas, &self.pixels.to_rgba8(), 0, 0);
        Image::new(DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8()))
    }

    /// Alpha-blend this image onto `canvas` with its top-left corner at `(x, y)`.
    ///
    /// Parts falling outside the canvas are clipped.
    pub fn draw_onto(&self, canvas: &mut RgbaImage, x: i64, y: i64) {
        blend_onto(canvas, &self.pixels.to_rgba8(), x, y);
    }

    /// Draw centred inside the `cell_width × cell_height` box at `(x, y)`.
    pub fn draw_centred(&self, canvas: &mut RgbaImage, x: i64, y: i64, cell: (u32, u32)) {
        let dx = centre_offset(cell.0, self.width());
        let dy = centre_offset(cell.1, self.height());
        self.draw_onto(canvas, x + dx, y + dy);
    }

    /// Export as a flat RGBA8 bitmap.
    pub fn export_bitmap(&self) -> Bitmap {
        Bitmap::from(self.pixels.to_rgba8())
    }
}

/// Source-over `top` onto `canvas` with its corner at `(x, y)`, clipped.
fn blend_onto(canvas: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    for (tx, ty, src) in top.enumerate_pixels() {
        let (px, py) = (x + tx as i64, y + ty as i64);
        if px < 0 || py < 0 || px >= cw || py >= ch {
            continue;
        }
        let dst = canvas.get_pixel_mut(px as u32, py as u32);
        *dst = Rgba(blend_over(dst.0, src.0));
    }
}

/// Raw RGBA8 pixels, row-major, top row first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Bitmap {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA value of one pixel, `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize * self.width as usize) + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Write the bitmap as a PNG (or whatever format `path`'s extension names).
    pub fn save(&self, path: &Path) -> ImageResult<()> {
        image::save_buffer(
            path,
            &self.data,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )
    }
}

impl From<RgbaImage> for Bitmap {
    fn from(buffer: RgbaImage) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            data: buffer.into_raw(),
        }
    }
}
