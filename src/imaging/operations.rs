//! High-level image operations.
//!
//! These functions combine the pure calculations with [`Image`] methods.
//! They take a policy, decide what has to happen, and do it.

use super::bitmap::Image;
use super::calculations::exceeds;
use super::params::ThumbPolicy;

/// Derive the display thumbnail for one slot.
///
/// 1. Scale into the slot when enlarging is on or the image does not fit.
/// 2. Flatten transparent images over a checkerboard when the grid is on.
///
/// Returns `None` when the source can be drawn as-is.
pub fn derive_thumbnail(image: &Image, policy: &ThumbPolicy) -> Option<Image> {
    let slot = (policy.slot_width, policy.slot_height);
    let mut thumbnail = None;

    if slot.0 > 0 && slot.1 > 0 && (policy.enlarge || exceeds(image.dimensions(), slot)) {
        thumbnail = Some(image.scale_to_fit(slot.0, slot.1, policy.filter));
    }

    if policy.transparency_grid && image.has_alpha() {
        let working = thumbnail.as_ref().unwrap_or(image);
        thumbnail = Some(working.composite_over_checkerboard());
    }

    thumbnail
}

/// The image a slot should draw: its thumbnail if one was derived.
pub fn display_image<'a>(image: &'a Image, thumbnail: Option<&'a Image>) -> &'a Image {
    thumbnail.unwrap_or(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Filter;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

    fn policy(slot_width: u32, slot_height: u32) -> ThumbPolicy {
        ThumbPolicy {
            enlarge: false,
            transparency_grid: true,
            filter: Filter::Box,
            slot_width,
            slot_height,
        }
    }

    fn opaque(w: u32, h: u32) -> Image {
        Image::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([1, 2, 3]))))
    }

    fn translucent(w: u32, h: u32) -> Image {
        Image::new(DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([1, 2, 3, 128]))))
    }

    #[test]
    fn small_opaque_image_needs_no_thumbnail() {
        assert!(derive_thumbnail(&opaque(50, 50), &policy(100, 100)).is_none());
    }

    #[test]
    fn oversized_image_is_shrunk_to_slot() {
        let thumb = derive_thumbnail(&opaque(400, 100), &policy(100, 100)).unwrap();
        assert_eq!(thumb.dimensions(), (100, 25));
    }

    #[test]
    fn enlarge_scales_small_images_up() {
        let policy = ThumbPolicy {
            enlarge: true,
            ..policy(100, 100)
        };
        let thumb = derive_thumbnail(&opaque(20, 10), &policy).unwrap();
        assert_eq!(thumb.dimensions(), (100, 50));
    }

    #[test]
    fn transparent_image_gets_checkerboard() {
        let thumb = derive_thumbnail(&translucent(10, 10), &policy(100, 100)).unwrap();
        assert_eq!(thumb.dimensions(), (10, 10));
        assert!(!thumb.has_alpha());
    }

    #[test]
    fn transparent_and_oversized_is_scaled_then_flattened() {
        let thumb = derive_thumbnail(&translucent(200, 200), &policy(50, 50)).unwrap();
        assert_eq!(thumb.dimensions(), (50, 50));
        assert!(!thumb.has_alpha());
    }

    #[test]
    fn transparency_grid_off_keeps_alpha() {
        let policy = ThumbPolicy {
            transparency_grid: false,
            ..policy(100, 100)
        };
        assert!(derive_thumbnail(&translucent(10, 10), &policy).is_none());
    }

    #[test]
    fn display_image_prefers_thumbnail() {
        let source = opaque(400, 400);
        let thumb = opaque(40, 40);
        assert_eq!(display_image(&source, Some(&thumb)).width(), 40);
        assert_eq!(display_image(&source, None).width(), 400);
    }
}
