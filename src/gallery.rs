//! The gallery engine.
//!
//! A [`Gallery`] owns one directory's file list and shows it a page at a
//! time. Each page has a fixed number of slots; every slot holds the decoded
//! source image and, when the source does not suit the slot as-is, a derived
//! thumbnail. Work is tracked by a small dirty-state machine so that only
//! what changed is redone:
//!
//! | Change | State | Work on next [`update`](Gallery::update) |
//! |---|---|---|
//! | page turn, grid size, shift, new file list | `NeedsReload` | decode every slot of the page |
//! | canvas size, padding, adaptive, enlarge, transparency grid, filter | `NeedsRefresh` | re-derive thumbnails from the loaded images |
//! | nothing | `Clean` | none |
//!
//! Both kinds of pass fan out one rayon task per slot and return once every
//! slot is done. Each task writes only its own slot.

use crate::config::GalleryConfig;
use crate::imaging::{
    Bitmap, Color, Filter, Image, ImageBackend, ThumbPolicy, derive_thumbnail, display_image,
};
use crate::layout::{GridGeometry, LayoutInput, compute_geometry};
use crate::paging::Pagination;
use crate::scan;
use image::RgbaImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Pending work, ordered by how much of it there is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Dirty {
    Clean,
    /// Thumbnails must be re-derived from the loaded images.
    NeedsRefresh,
    /// The page must be decoded again.
    #[default]
    NeedsReload,
}

impl Dirty {
    /// Raise to `level`; a pending reload is never downgraded.
    pub fn mark(&mut self, level: Dirty) {
        *self = (*self).max(level);
    }
}

/// A paged thumbnail grid over one directory.
pub struct Gallery<B: ImageBackend> {
    backend: Arc<B>,
    base: PathBuf,
    files: Vec<String>,
    paging: Pagination,
    adaptive: bool,
    width: u32,
    height: u32,
    pad_h: u32,
    pad_v: u32,
    geometry: GridGeometry,
    background: Color,
    enlarge: bool,
    transparency_grid: bool,
    filter: Filter,
    images: Vec<Option<Image>>,
    thumbnails: Vec<Option<Image>>,
    dirty: Dirty,
}

impl<B: ImageBackend> Gallery<B> {
    /// Gallery over an already-scanned file list.
    ///
    /// It starts with a 0×0 canvas and draws nothing until [`resize`](Self::resize).
    pub fn new(
        backend: Arc<B>,
        base: impl Into<PathBuf>,
        files: Vec<String>,
        config: &GalleryConfig,
    ) -> Self {
        let mut gallery = Self {
            backend,
            base: base.into(),
            files,
            paging: Pagination::new(config.cols, config.rows, config.shift),
            adaptive: config.adaptive,
            width: 0,
            height: 0,
            pad_h: config.pad_h,
            pad_v: config.pad_v,
            geometry: GridGeometry::default(),
            background: config.background,
            enlarge: config.enlarge,
            transparency_grid: config.transparency_grid,
            filter: config.filter,
            images: Vec::new(),
            thumbnails: Vec::new(),
            dirty: Dirty::NeedsReload,
        };
        gallery.geometry = gallery.layout();
        log::debug!(
            "Gallery for {} | {} files",
            gallery.base.display(),
            gallery.files.len()
        );
        gallery
    }

    /// Scan `base` and build a gallery over the result.
    pub fn open(backend: Arc<B>, base: &Path, config: &GalleryConfig) -> Self {
        let files = scan::scan(base, config);
        Self::new(backend, base, files, config)
    }

    /// Replace the file list wholesale and return to the first page.
    pub fn set_files(&mut self, files: Vec<String>) {
        self.files = files;
        self.paging.first_page();
        self.recalculate();
        self.dirty.mark(Dirty::NeedsReload);
    }

    /// Scan the base directory again.
    pub fn rescan(&mut self, config: &GalleryConfig) {
        let files = scan::scan(&self.base, config);
        self.set_files(files);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn base_path(&self) -> &Path {
        &self.base
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Number of entries in the file list.
    pub fn count(&self) -> usize {
        self.files.len()
    }

    /// Index of the first entry on the current page (shift included).
    pub fn offset(&self) -> usize {
        self.paging.effective_offset()
    }

    /// Zero-based index of the current page.
    pub fn current_page(&self) -> usize {
        self.paging.current_page()
    }

    /// Entries on a full page of the configured grid.
    pub fn page_size(&self) -> usize {
        self.paging.page_size()
    }

    /// Cells in the active grid, which differs from [`page_size`](Self::page_size)
    /// when an adaptive short page was reshaped.
    pub fn current_page_size(&self) -> usize {
        self.geometry.cols as usize * self.geometry.rows as usize
    }

    pub fn pages_count(&self) -> usize {
        self.paging.pages_count(self.count())
    }

    /// Entries actually present on the current page.
    pub fn thumbs_count_on_page(&self) -> usize {
        self.paging.items_on_page(self.count())
    }

    /// Configured columns.
    pub fn cols(&self) -> u32 {
        self.paging.cols()
    }

    /// Configured rows.
    pub fn rows(&self) -> u32 {
        self.paging.rows()
    }

    pub fn shift(&self) -> usize {
        self.paging.shift()
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn padding(&self) -> (u32, u32) {
        (self.pad_h, self.pad_v)
    }

    pub fn is_adaptive(&self) -> bool {
        self.adaptive
    }

    pub fn is_enlarge(&self) -> bool {
        self.enlarge
    }

    pub fn is_transparency_grid(&self) -> bool {
        self.transparency_grid
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    pub fn is_update_required(&self) -> bool {
        self.dirty != Dirty::Clean
    }

    pub fn is_reload_required(&self) -> bool {
        self.dirty == Dirty::NeedsReload
    }

    /// Slots on the current page that hold a decoded image.
    pub fn loaded_count(&self) -> usize {
        self.images.iter().filter(|i| i.is_some()).count()
    }

    /// Name of entry `index` relative to the base directory.
    pub fn filename(&self, index: usize) -> Option<&str> {
        self.files.get(index).map(String::as_str)
    }

    /// Full path of entry `index`.
    pub fn full_filename(&self, index: usize) -> Option<PathBuf> {
        self.filename(index).map(|name| self.base.join(name))
    }

    /// Decoded source image of entry `index`, if it is on the current page
    /// and loaded.
    pub fn image(&self, index: usize) -> Option<&Image> {
        let slot = index.checked_sub(self.offset())?;
        self.images.get(slot)?.as_ref()
    }

    /// Entry index under pixel `(x, y)` of the canvas.
    ///
    /// `None` when nothing is drawable, the point is right of the last
    /// column, or the cell under it is empty.
    pub fn index_at(&self, x: u32, y: u32) -> Option<usize> {
        if !self.geometry.is_drawable() {
            return None;
        }
        let col = x / (self.geometry.slot_width + self.pad_h);
        let row = y / (self.geometry.slot_height + self.pad_v);
        if col >= self.geometry.cols {
            return None;
        }

        let first = self.offset();
        let index = row as usize * self.geometry.cols as usize + col as usize + first;
        (index < first + self.thumbs_count_on_page()).then_some(index)
    }

    pub fn filename_at(&self, x: u32, y: u32) -> Option<&str> {
        self.index_at(x, y).and_then(|i| self.filename(i))
    }

    pub fn full_filename_at(&self, x: u32, y: u32) -> Option<PathBuf> {
        self.index_at(x, y).and_then(|i| self.full_filename(i))
    }

    /// `"page / pages (first - last / count)"`, 1-based.
    pub fn info_text(&self) -> String {
        if self.images.is_empty() {
            return format!("0 / 0 (0 - 0 / {})", self.count());
        }
        let first = self.offset();
        format!(
            "{} / {} ({} - {} / {})",
            self.current_page() + 1,
            self.pages_count(),
            first + 1,
            first + self.images.len(),
            self.count()
        )
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    pub fn next_page(&mut self) -> bool {
        let moved = self.paging.next_page(self.files.len());
        self.after_page_move(moved)
    }

    pub fn previous_page(&mut self) -> bool {
        let moved = self.paging.previous_page();
        self.after_page_move(moved)
    }

    pub fn first_page(&mut self) -> bool {
        let moved = self.paging.first_page();
        self.after_page_move(moved)
    }

    pub fn last_page(&mut self) -> bool {
        let moved = self.paging.last_page(self.files.len());
        self.after_page_move(moved)
    }

    /// Jump to zero-based `page`, clamped to the last page.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = self.paging.go_to_page(page, self.files.len());
        self.after_page_move(moved)
    }

    fn after_page_move(&mut self, moved: bool) -> bool {
        if moved {
            self.recalculate();
            self.dirty.mark(Dirty::NeedsReload);
        }
        moved
    }

    /// Change the configured grid.
    pub fn reallocate(&mut self, cols: u32, rows: u32) {
        self.paging.set_grid(cols, rows, self.files.len());
        self.recalculate();
        self.dirty.mark(Dirty::NeedsReload);
    }

    pub fn set_cols(&mut self, cols: u32) {
        self.reallocate(cols, self.rows());
    }

    pub fn set_rows(&mut self, rows: u32) {
        self.reallocate(self.cols(), rows);
    }

    /// Change the number of leading entries skipped. Returns `false` if unchanged.
    pub fn set_shift(&mut self, shift: usize) -> bool {
        if !self.paging.set_shift(shift, self.files.len()) {
            return false;
        }
        self.recalculate();
        self.dirty.mark(Dirty::NeedsReload);
        true
    }

    // =========================================================================
    // Geometry and thumbnail options
    // =========================================================================

    /// Resize the canvas. Returns `false` if the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if (self.width, self.height) == (width, height) {
            return false;
        }
        self.width = width;
        self.height = height;
        self.recalculate();
        true
    }

    pub fn set_padding(&mut self, pad_h: u32, pad_v: u32) {
        if (self.pad_h, self.pad_v) != (pad_h, pad_v) {
            self.pad_h = pad_h;
            self.pad_v = pad_v;
            self.recalculate();
        }
    }

    pub fn set_adaptive(&mut self, adaptive: bool) {
        if self.adaptive != adaptive {
            self.adaptive = adaptive;
            self.recalculate();
        }
    }

    pub fn set_enlarge(&mut self, enlarge: bool) {
        if self.enlarge != enlarge {
            self.enlarge = enlarge;
            self.dirty.mark(Dirty::NeedsRefresh);
        }
    }

    pub fn set_transparency_grid(&mut self, transparency_grid: bool) {
        if self.transparency_grid != transparency_grid {
            self.transparency_grid = transparency_grid;
            self.dirty.mark(Dirty::NeedsRefresh);
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        if self.filter != filter {
            self.filter = filter;
            self.dirty.mark(Dirty::NeedsRefresh);
        }
    }

    /// Canvas colour used by [`bitmap`](Self::bitmap). Affects no slot.
    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    fn layout(&self) -> GridGeometry {
        let input = LayoutInput {
            width: self.width,
            height: self.height,
            cols: self.paging.cols(),
            rows: self.paging.rows(),
            adaptive: self.adaptive,
            pad_h: self.pad_h,
            pad_v: self.pad_v,
        };
        compute_geometry(&input, self.thumbs_count_on_page())
    }

    /// Recompute the active grid; slot sizes may change, so thumbnails must
    /// be re-derived.
    fn recalculate(&mut self) {
        self.geometry = self.layout();
        self.dirty.mark(Dirty::NeedsRefresh);
    }

    fn thumb_policy(&self) -> ThumbPolicy {
        ThumbPolicy {
            enlarge: self.enlarge,
            transparency_grid: self.transparency_grid,
            filter: self.filter,
            slot_width: self.geometry.slot_width,
            slot_height: self.geometry.slot_height,
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Do whatever pending work the dirty state calls for.
    ///
    /// Nothing happens while the list is empty or the grid is not drawable;
    /// the pending state is kept for when it becomes drawable.
    pub fn update(&mut self) {
        if self.dirty == Dirty::Clean
            || self.files.is_empty()
            || self.page_size() == 0
            || !self.geometry.is_drawable()
        {
            return;
        }

        if self.dirty == Dirty::NeedsReload || self.images.is_empty() {
            self.reload();
        } else {
            self.refresh();
        }
        self.dirty = Dirty::Clean;
    }

    /// Decode every slot of the current page.
    fn reload(&mut self) {
        self.images.clear();
        self.thumbnails.clear();

        let items = self.thumbs_count_on_page();
        if items == 0 {
            return;
        }
        self.images.resize_with(items, || None);
        self.thumbnails.resize_with(items, || None);
        self.geometry = self.layout();

        let policy = self.thumb_policy();
        let first = self.offset();
        let backend = self.backend.as_ref();
        let base = &self.base;
        let files = &self.files;

        self.images
            .par_iter_mut()
            .zip(self.thumbnails.par_iter_mut())
            .enumerate()
            .for_each(|(i, (image, thumbnail))| {
                let path = base.join(&files[first + i]);
                match backend.decode(&path) {
                    Ok(decoded) => {
                        log::debug!(
                            "Loaded {} | {}x{} {} bpp",
                            path.display(),
                            decoded.width(),
                            decoded.height(),
                            decoded.bpp()
                        );
                        *thumbnail = derive_thumbnail(&decoded, &policy);
                        *image = Some(decoded);
                    }
                    Err(e) => log::info!("Skipping {} | {}", path.display(), e),
                }
            });
    }

    /// Re-derive thumbnails for the loaded slots without decoding again.
    fn refresh(&mut self) {
        let policy = self.thumb_policy();
        self.images
            .par_iter()
            .zip(self.thumbnails.par_iter_mut())
            .for_each(|(image, thumbnail)| {
                if let Some(image) = image {
                    *thumbnail = derive_thumbnail(image, &policy);
                }
            });
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Bring the page up to date and paint it onto `canvas` with the grid's
    /// top-left corner at `(x, y)`.
    ///
    /// Slot `i` is always painted in cell `i`, so a slot that failed to
    /// decode leaves a gap and every painted cell stays where
    /// [`index_at`](Self::index_at) finds it.
    pub fn draw(&mut self, canvas: &mut RgbaImage, x: i64, y: i64) {
        self.update();
        if !self.geometry.is_drawable() {
            return;
        }

        let cell = (self.geometry.slot_width, self.geometry.slot_height);
        for (i, (image, thumbnail)) in self.images.iter().zip(&self.thumbnails).enumerate() {
            let Some(image) = image else { continue };
            let (cx, cy) = self.geometry.cell_origin(i, self.pad_h, self.pad_v);
            display_image(image, thumbnail.as_ref()).draw_centred(canvas, x + cx, y + cy, cell);
        }
    }

    /// Render the current page onto a background-filled canvas of the
    /// gallery's size. A 0×0 gallery yields an empty bitmap.
    pub fn bitmap(&mut self) -> Bitmap {
        if self.width == 0 || self.height == 0 {
            return Bitmap::default();
        }
        let mut canvas = RgbaImage::from_pixel(self.width, self.height, self.background.to_rgba());
        self.draw(&mut canvas, 0, 0);
        Bitmap::from(canvas)
    }
}
