//! Host-facing entry points.
//!
//! A [`Previewer`] holds the loaded configuration and one shared decoding
//! backend, and turns directory paths into either a one-shot [`Bitmap`]
//! (`[thumbs]` settings) or a live [`View`] (`[view]` settings). It is an
//! ordinary value: construct one and pass it by reference to whatever hosts
//! the previews.
//!
//! A [`View`] is what an interactive host drives. Page turns, option
//! toggles, grid presets, and resizes arrive as [`Command`]s; each reports
//! whether the view needs repainting. Hit-testing gives the host a file to
//! open on double-click and the text of a hover tooltip.

use crate::config::{Config, GalleryConfig, Section};
use crate::gallery::Gallery;
use crate::imaging::{Bitmap, Color, ImageBackend};
use crate::scan::is_parent_link;
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("No matching images in {0}")]
    Empty(PathBuf),
    #[error("A {0}x{1} canvas leaves no room for thumbnails")]
    NotDrawable(u32, u32),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Largest grid dimension offered for `cols`/`rows`.
pub const MAX_GRID: u32 = 10;

/// Stock grid presets as `(cols, rows)`.
pub const PRESETS: &[(u32, u32)] = &[
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (5, 5),
    (2, 1),
    (3, 2),
    (4, 3),
    (5, 4),
];

/// Which page a one-shot render shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSelect {
    #[default]
    First,
    /// Zero-based page index, clamped to the last page.
    Index(usize),
    Last,
}

/// Builds previews from one configuration and one backend.
pub struct Previewer<B: ImageBackend> {
    config: Config,
    backend: Arc<B>,
}

impl<B: ImageBackend> Previewer<B> {
    pub fn new(config: Config, backend: B) -> Self {
        Self::with_shared_backend(config, Arc::new(backend))
    }

    pub fn with_shared_backend(config: Config, backend: Arc<B>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether previews of `path` are switched off for `section`.
    pub fn is_skipped(&self, path: &Path, section: Section) -> bool {
        let config = self.config.gallery(section);
        !config.enabled || (config.ignore_dots && is_parent_link(path))
    }

    /// Scan `dir` into a gallery sized `width × height`.
    ///
    /// Returns `Ok(None)` when the section is disabled or `dir` is a
    /// skipped `..` link.
    pub fn gallery(
        &self,
        dir: &Path,
        section: Section,
        width: u32,
        height: u32,
    ) -> Result<Option<Gallery<B>>, RenderError> {
        log::debug!(
            "Preparing {:?} gallery | {} | {}x{}",
            section,
            dir.display(),
            width,
            height
        );
        if self.is_skipped(dir, section) {
            return Ok(None);
        }
        if !dir.is_dir() {
            return Err(RenderError::NotADirectory(dir.to_path_buf()));
        }

        let mut gallery = Gallery::open(Arc::clone(&self.backend), dir, self.config.gallery(section));
        if gallery.count() == 0 {
            return Err(RenderError::Empty(dir.to_path_buf()));
        }
        gallery.resize(width, height);
        Ok(Some(gallery))
    }

    /// Render one page of `dir` with the `[thumbs]` settings.
    ///
    /// Returns `Ok(None)` when previews are skipped for `dir`.
    pub fn generate_bitmap(
        &self,
        dir: &Path,
        width: u32,
        height: u32,
        page: PageSelect,
    ) -> Result<Option<Bitmap>, RenderError> {
        self.render(dir, Section::Thumbs, width, height, page)
    }

    /// Render one page of `dir` with the settings of `section`.
    pub fn render(
        &self,
        dir: &Path,
        section: Section,
        width: u32,
        height: u32,
        page: PageSelect,
    ) -> Result<Option<Bitmap>, RenderError> {
        let Some(mut gallery) = self.gallery(dir, section, width, height)? else {
            return Ok(None);
        };
        if !gallery.geometry().is_drawable() {
            return Err(RenderError::NotDrawable(width, height));
        }
        match page {
            PageSelect::First => {}
            PageSelect::Index(n) => {
                gallery.go_to_page(n);
            }
            PageSelect::Last => {
                gallery.last_page();
            }
        }
        Ok(Some(gallery.bitmap()))
    }

    /// Open a live view of `dir` with the `[view]` settings.
    ///
    /// Returns `Ok(None)` when previews are skipped for `dir`.
    pub fn open_view(
        &self,
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Option<View<B>>, RenderError> {
        let gallery = self.gallery(dir, Section::View, width, height)?;
        Ok(gallery.map(|g| View::new(g, self.config.view.clone())))
    }
}

/// Write `bitmap` to `path` (format from the extension), creating parent
/// directories as needed.
pub fn write_bitmap(bitmap: &Bitmap, path: &Path) -> Result<(), RenderError> {
    if bitmap.is_empty() {
        return Err(RenderError::NotDrawable(bitmap.width, bitmap.height));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    bitmap.save(path)?;
    Ok(())
}

// =============================================================================
// Live view
// =============================================================================

/// Keys a view reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Home,
    End,
}

/// Something a host asks a view to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    ToggleAdaptive,
    ToggleInfo,
    ToggleDeepScan,
    ToggleEnlarge,
    ToggleTransparencyGrid,
    /// Columns, clamped to `1..=MAX_GRID`.
    SetCols(u32),
    /// Rows, clamped to `1..=MAX_GRID`.
    SetRows(u32),
    /// Columns and rows at once.
    Preset(u32, u32),
    SetShift(usize),
    Resize(u32, u32),
}

impl From<Key> for Command {
    fn from(key: Key) -> Self {
        match key {
            Key::Left => Command::PreviousPage,
            Key::Right => Command::NextPage,
            Key::Home => Command::FirstPage,
            Key::End => Command::LastPage,
        }
    }
}

/// Text the host should paint over the view when the info overlay is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoOverlay {
    pub text: String,
    pub color: Color,
    pub size: u32,
}

/// A live, interactive gallery.
pub struct View<B: ImageBackend> {
    gallery: Gallery<B>,
    config: GalleryConfig,
}

impl<B: ImageBackend> View<B> {
    pub fn new(gallery: Gallery<B>, config: GalleryConfig) -> Self {
        Self { gallery, config }
    }

    pub fn gallery(&self) -> &Gallery<B> {
        &self.gallery
    }

    /// Current settings, including toggles applied through commands.
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Apply `command`; returns `true` when the view must be repainted.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::NextPage => self.gallery.next_page(),
            Command::PreviousPage => self.gallery.previous_page(),
            Command::FirstPage => self.gallery.first_page(),
            Command::LastPage => self.gallery.last_page(),
            Command::ToggleAdaptive => {
                self.config.adaptive = !self.config.adaptive;
                self.gallery.set_adaptive(self.config.adaptive);
                true
            }
            Command::ToggleInfo => {
                self.config.info = !self.config.info;
                true
            }
            Command::ToggleDeepScan => {
                self.config.deep_scan = !self.config.deep_scan;
                self.gallery.rescan(&self.config);
                true
            }
            Command::ToggleEnlarge => {
                self.config.enlarge = !self.config.enlarge;
                self.gallery.set_enlarge(self.config.enlarge);
                true
            }
            Command::ToggleTransparencyGrid => {
                self.config.transparency_grid = !self.config.transparency_grid;
                self.gallery
                    .set_transparency_grid(self.config.transparency_grid);
                true
            }
            Command::SetCols(cols) => self.set_grid(cols, self.config.rows),
            Command::SetRows(rows) => self.set_grid(self.config.cols, rows),
            Command::Preset(cols, rows) => self.set_grid(cols, rows),
            Command::SetShift(shift) => {
                self.config.shift = shift;
                self.gallery.set_shift(shift)
            }
            Command::Resize(width, height) => self.gallery.resize(width, height),
        }
    }

    pub fn key(&mut self, key: Key) -> bool {
        self.apply(key.into())
    }

    fn set_grid(&mut self, cols: u32, rows: u32) -> bool {
        let cols = cols.clamp(1, MAX_GRID);
        let rows = rows.clamp(1, MAX_GRID);
        if (cols, rows) == (self.config.cols, self.config.rows) {
            return false;
        }
        self.config.cols = cols;
        self.config.rows = rows;
        self.gallery.reallocate(cols, rows);
        true
    }

    /// Paint the view onto `canvas` at `(x, y)`.
    pub fn draw(&mut self, canvas: &mut RgbaImage, x: i64, y: i64) {
        self.gallery.draw(canvas, x, y);
    }

    /// Paint the view onto a background-filled canvas of its own size.
    pub fn bitmap(&mut self) -> Bitmap {
        self.gallery.bitmap()
    }

    /// Info overlay to paint, when switched on.
    pub fn info_overlay(&self) -> Option<InfoOverlay> {
        self.config.info.then(|| InfoOverlay {
            text: self.gallery.info_text(),
            color: self.config.info_color,
            size: self.config.info_size,
        })
    }

    /// Full path of the file under `(x, y)`, for the host to open on
    /// double-click.
    pub fn activate_at(&self, x: u32, y: u32) -> Option<PathBuf> {
        self.gallery.full_filename_at(x, y)
    }

    /// Tooltip for the slot under `(x, y)`: the file name, its 1-based
    /// position, and the image's size and depth once it is loaded.
    pub fn tooltip_at(&self, x: u32, y: u32) -> Option<String> {
        let index = self.gallery.index_at(x, y)?;
        let name = self.gallery.filename(index)?;
        Some(match self.gallery.image(index) {
            Some(image) => format!(
                "{}\n#{}, {} x {}, {} BPP",
                name,
                index + 1,
                image.width(),
                image.height(),
                image.bpp()
            ),
            None => format!("{}\n#{}", name, index + 1),
        })
    }
}
