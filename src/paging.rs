//! Page arithmetic over a flat, pre-sorted file list.
//!
//! A gallery shows `cols × rows` entries at a time. `offset` is the index of
//! the first entry on the current page counted *after* the global `shift`,
//! so it is always a multiple of the page size; the index into the file list
//! is `offset + shift`. Page turns are pure index updates and never touch
//! the file system.
//!
//! All methods take the list length as `total` instead of caching it, so a
//! rescan never leaves the pagination holding a stale count.

/// Page position and grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    cols: u32,
    rows: u32,
    offset: usize,
    shift: usize,
}

impl Pagination {
    pub fn new(cols: u32, rows: u32, shift: usize) -> Self {
        Self {
            cols,
            rows,
            offset: 0,
            shift,
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn shift(&self) -> usize {
        self.shift
    }

    /// Offset of the current page, not counting the shift.
    pub fn page_offset(&self) -> usize {
        self.offset
    }

    /// Index into the file list of the first entry on the current page.
    pub fn effective_offset(&self) -> usize {
        self.offset + self.shift
    }

    /// Entries on a full page.
    pub fn page_size(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Zero-based index of the current page.
    pub fn current_page(&self) -> usize {
        self.offset.checked_div(self.page_size()).unwrap_or(0)
    }

    /// Number of pages, at least 1 even for an empty list.
    pub fn pages_count(&self, total: usize) -> usize {
        let available = total.saturating_sub(self.shift);
        match self.page_size() {
            0 => 1,
            size => available.div_ceil(size).max(1),
        }
    }

    /// Entries actually present on the current page.
    pub fn items_on_page(&self, total: usize) -> usize {
        total
            .saturating_sub(self.effective_offset())
            .min(self.page_size())
    }

    fn last_offset(&self, total: usize) -> usize {
        (self.pages_count(total) - 1) * self.page_size()
    }

    /// Advance one page. Returns `false` if already on the last page.
    pub fn next_page(&mut self, total: usize) -> bool {
        let size = self.page_size();
        if size == 0 || self.offset + size >= total.saturating_sub(self.shift) {
            return false;
        }
        self.offset += size;
        true
    }

    /// Step back one page, snapping to the first page when less than a full
    /// page remains before the current one. Returns `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        let size = self.page_size();
        self.offset = if self.offset <= size {
            0
        } else {
            self.offset - size
        };
        true
    }

    /// Jump to the first page. Returns `false` if already there.
    pub fn first_page(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        self.offset = 0;
        true
    }

    /// Jump to the last page. Returns `false` if already there.
    pub fn last_page(&mut self, total: usize) -> bool {
        let last = self.last_offset(total);
        if self.offset == last {
            return false;
        }
        self.offset = last;
        true
    }

    /// Jump to zero-based page `page`, clamped to the last page.
    /// Returns `false` if the page does not change.
    pub fn go_to_page(&mut self, page: usize, total: usize) -> bool {
        let target = page
            .saturating_mul(self.page_size())
            .min(self.last_offset(total));
        if self.offset == target {
            return false;
        }
        self.offset = target;
        true
    }

    /// Change the grid. The offset is re-snapped to the page of the new size
    /// containing the current first entry, then clamped to the last page.
    pub fn set_grid(&mut self, cols: u32, rows: u32, total: usize) {
        self.cols = cols;
        self.rows = rows;
        let size = self.page_size();
        self.offset = match size {
            0 => 0,
            size => (self.offset / size * size).min(self.last_offset(total)),
        };
    }

    /// Change the shift. Returns `false` if it is unchanged.
    pub fn set_shift(&mut self, shift: usize, total: usize) -> bool {
        if self.shift == shift {
            return false;
        }
        self.shift = shift;
        self.offset = self.offset.min(self.last_offset(total));
        true
    }
}
