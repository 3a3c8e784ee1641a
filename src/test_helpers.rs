//! Shared test utilities for the dirpreview test suite.
//!
//! Writes small real image files so scanner, backend, and gallery tests can
//! run against an actual directory tree.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = image_dir(&["b.png", "a.jpg", "notes.txt"]);
//! let names = scan::scan(tmp.path(), &GalleryConfig::default());
//! assert_eq!(names, vec!["a.jpg", "b.png"]);
//! ```

use image::{ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::io::BufWriter;
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Single files
// =========================================================================

/// Write an opaque RGB8 PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([90, 140, 200]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write an RGBA8 PNG whose left half is fully transparent.
pub fn write_transparent_png(path: &Path, width: u32, height: u32) {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([250, 10, 10, 255])
        }
    })
    .save_with_format(path, image::ImageFormat::Png)
    .unwrap();
}

/// Write a JPEG with a horizontal gradient.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, _| Rgb([(x % 256) as u8, 128, 64]));
    let file = fs::File::create(path).unwrap();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(BufWriter::new(file), 90);
    encoder
        .write_image(
            img.as_raw(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
}

/// Write an image file whose format follows the extension; anything that is
/// not `.jpg`/`.jpeg`/`.png` gets plain text content.
pub fn write_fixture(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => write_png(path, width, height),
        "jpg" | "jpeg" => write_jpeg(path, width, height),
        _ => fs::write(path, b"not an image").unwrap(),
    }
}

// =========================================================================
// Directories
// =========================================================================

/// Temp directory holding one 32x24 fixture per relative path.
///
/// Paths may contain `/` to create sub-directories.
pub fn image_dir(relative_paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for rel in relative_paths {
        write_fixture(&tmp.path().join(rel), 32, 24);
    }
    tmp
}

/// Temp directory holding empty files (content is irrelevant to the scanner).
pub fn empty_files_dir(relative_paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for rel in relative_paths {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }
    tmp
}

/// `n` file names `img1.png ..= imgN.png`.
pub fn numbered_names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("img{i}.png")).collect()
}
