//! Pure Rust decoding backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format sniffing | `image::ImageReader::with_guessed_format` |
//! | Decode (JPEG, PNG, GIF, BMP, WebP, TIFF, ICO, TGA) | `image` crate decoders |

use super::backend::{BackendError, ImageBackend};
use super::bitmap::Image;
use image::{ImageError, ImageFormat, ImageReader};
use std::path::Path;
use std::sync::LazyLock;

/// Extensions we can hand to the `image` crate, paired with their format.
const CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("gif", ImageFormat::Gif),
    ("bmp", ImageFormat::Bmp),
    ("webp", ImageFormat::WebP),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("ico", ImageFormat::Ico),
    ("tga", ImageFormat::Tga),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Decoding backend using the `image` crate.
///
/// The format is sniffed from the file contents first, so a mislabelled
/// extension still decodes.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<Image, BackendError> {
        let pixels = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| match e {
                ImageError::IoError(io) => BackendError::Io(io),
                ImageError::Unsupported(u) => {
                    BackendError::Unsupported(format!("{}: {}", path.display(), u))
                }
                other => BackendError::Decode(format!("{}: {}", path.display(), other)),
            })?;
        Ok(Image::new(pixels))
    }
}
