//! # dirpreview
//!
//! Thumbnail grid previews of image directories. A directory is scanned for
//! images, ordered the way a person would order them, and shown a page at a
//! time on a grid of fixed or adaptive shape. Each page renders to a single
//! RGBA bitmap that a host can paint, save, or hand to a shell preview.
//!
//! # Architecture
//!
//! ```text
//! directory ──scan──▶ Vec<String> ──Gallery──▶ page of slots ──draw──▶ Bitmap
//!              │                        │
//!          enumerate              layout + paging
//!          natural sort           rayon decode + thumbnails
//! ```
//!
//! The scan is synchronous and cheap: it only lists names. Decoding happens
//! lazily, one page at a time, when a gallery is drawn. A [`gallery::Gallery`]
//! remembers what changed since the last draw and redoes only that: a page
//! turn decodes the new page, a resize only rescales the images it already
//! holds.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Builds the ordered file list, including the one-level deep scan |
//! | [`enumerate`] | Lists one directory level, files by extension or sub-directories |
//! | [`natural`] | Natural ordering of names (`img2` before `img10`) |
//! | [`layout`] | Grid geometry: fixed or adaptive columns/rows and slot size |
//! | [`paging`] | Page offset arithmetic over the file list |
//! | [`gallery`] | The engine: per-slot image cache, dirty state, parallel reload, drawing |
//! | [`imaging`] | Decoding backend, thumbnail derivation, compositing, bitmap export |
//! | [`preview`] | Host surface: [`preview::Previewer`] and the interactive [`preview::View`] |
//! | [`config`] | TOML settings with stock defaults, `[common]` fallback and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Backend Is a Trait
//!
//! Decoding goes through [`imaging::ImageBackend`]. The shipped
//! [`imaging::RustBackend`] uses the `image` crate, so the binary needs no
//! system libraries. Tests substitute a backend that fabricates images by
//! file name, which lets the gallery's caching and failure handling be
//! checked without writing image files.
//!
//! ## Failed Slots Stay Empty
//!
//! A file that cannot be decoded leaves its slot empty. The slot keeps its
//! position on the grid, so the remaining thumbnails do not shift around
//! when one file is broken.

pub mod config;
pub mod enumerate;
pub mod gallery;
pub mod imaging;
pub mod layout;
pub mod natural;
pub mod output;
pub mod paging;
pub mod preview;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
