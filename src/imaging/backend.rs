//! Image decoding backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the single seam between the gallery and the
//! file system: given a path, produce a decoded [`Image`]. Everything done to
//! an image after that (scaling, compositing, export) lives on [`Image`]
//! itself and is backend-independent.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), which uses the `image`
//! crate's pure Rust decoders.

use super::bitmap::Image;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decoding failed: {0}")]
    Decode(String),
    #[error("Unsupported image: {0}")]
    Unsupported(String),
}

/// Trait for image decoding backends.
///
/// Backends must be `Sync`: the gallery decodes every slot of a page in
/// parallel against one shared backend.
pub trait ImageBackend: Sync {
    /// Decode the file at `path` into an image.
    fn decode(&self, path: &Path) -> Result<Image, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock backend that synthesises solid-colour images instead of reading
    /// files, and records every decode request behind a `Mutex`.
    pub struct MockBackend {
        default_size: (u32, u32),
        sizes: HashMap<String, (u32, u32)>,
        failing: Vec<String>,
        transparent: Vec<String>,
        pub decoded: Mutex<Vec<String>>,
    }

    impl MockBackend {
        /// Every decode yields an opaque `width × height` image.
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                default_size: (width, height),
                sizes: HashMap::new(),
                failing: Vec::new(),
                transparent: Vec::new(),
                decoded: Mutex::new(Vec::new()),
            }
        }

        /// Decoding any file with one of these names fails.
        pub fn failing_on(mut self, names: &[&str]) -> Self {
            self.failing.extend(names.iter().map(|n| n.to_string()));
            self
        }

        /// Files with one of these names decode with an alpha channel.
        pub fn transparent(mut self, names: &[&str]) -> Self {
            self.transparent.extend(names.iter().map(|n| n.to_string()));
            self
        }

        /// Override the synthesised size for one file name.
        pub fn with_size(mut self, name: &str, width: u32, height: u32) -> Self {
            self.sizes.insert(name.to_string(), (width, height));
            self
        }

        /// File names decoded so far, in completion order.
        pub fn decoded_names(&self) -> Vec<String> {
            self.decoded.lock().unwrap().clone()
        }

        pub fn decode_count(&self) -> usize {
            self.decoded.lock().unwrap().len()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path) -> Result<Image, BackendError> {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.decoded.lock().unwrap().push(name.clone());

            if self.failing.contains(&name) {
                return Err(BackendError::Decode(format!("mock failure for {name}")));
            }

            let (w, h) = self.sizes.get(&name).copied().unwrap_or(self.default_size);
            let pixels = if self.transparent.contains(&name) {
                DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([200, 40, 40, 0])))
            } else {
                DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([200, 40, 40])))
            };
            Ok(Image::new(pixels))
        }
    }

    #[test]
    fn mock_synthesises_requested_size() {
        let backend = MockBackend::new(64, 48).with_size("wide.png", 300, 10);

        let img = backend.decode(Path::new("/dir/a.png")).unwrap();
        assert_eq!((img.width(), img.height()), (64, 48));
        assert!(!img.has_alpha());

        let img = backend.decode(Path::new("/dir/wide.png")).unwrap();
        assert_eq!((img.width(), img.height()), (300, 10));
    }

    #[test]
    fn mock_records_decodes_and_fails_on_request() {
        let backend = MockBackend::new(8, 8).failing_on(&["bad.jpg"]);

        assert!(backend.decode(Path::new("/x/good.jpg")).is_ok());
        assert!(matches!(
            backend.decode(Path::new("/x/bad.jpg")),
            Err(BackendError::Decode(_))
        ));
        assert_eq!(backend.decoded_names(), vec!["good.jpg", "bad.jpg"]);
    }

    #[test]
    fn mock_transparent_images_have_alpha() {
        let backend = MockBackend::new(8, 8).transparent(&["glass.png"]);
        let img = backend.decode(Path::new("glass.png")).unwrap();
        assert!(img.has_alpha());
        assert_eq!(img.bpp(), 32);
    }
}
