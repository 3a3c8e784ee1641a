//! Image handling in pure Rust, no external tools.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` |
//! | **Scale into slot** | `DynamicImage::resize_exact` with the configured filter |
//! | **Checkerboard / background / drawing** | integer source-over blend (`calculations::blend_over`) |
//! | **Bitmap export** | `RgbaImage::into_raw` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for fit and placement math (unit testable)
//! - **Parameters**: Filters, colours, and the per-slot thumbnail policy
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Bitmap**: [`Image`] and the raw [`Bitmap`] export
//! - **Operations**: Thumbnail derivation combining the above

pub mod backend;
mod bitmap;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use bitmap::{Bitmap, Image};
pub use calculations::inscribe;
pub use operations::{derive_thumbnail, display_image};
pub use params::{Color, Filter, ThumbPolicy};
pub use rust_backend::{RustBackend, supported_input_extensions};
