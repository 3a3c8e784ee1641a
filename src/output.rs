//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! photos (5 images, 2 pages of 4)
//! Page 1
//!     001 img1.jpg
//!     002 img2.jpg
//!     003 img10.jpg
//!     004 sub/a.png
//! Page 2
//!     005 sub/b.png
//! ```
//!
//! ## Info
//!
//! ```text
//! photos
//!     Files: 5
//!     Grid: 2 x 2 (4 per page, shift 0)
//!     Pages: 2
//!     Canvas: 200 x 100
//!     Active grid: 2 x 2, slot 99 x 49
//!     Page: 1 / 2 (1 - 4 / 5)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::gallery::Gallery;
use crate::imaging::{Bitmap, ImageBackend};
use crate::layout::GridGeometry;
use serde::Serialize;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Machine-readable scan result for `scan --json`.
#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub directory: String,
    pub count: usize,
    pub page_size: usize,
    pub pages: usize,
    pub files: &'a [String],
}

impl<'a> ScanReport<'a> {
    pub fn new(dir: &Path, files: &'a [String], page_size: usize, pages: usize) -> Self {
        Self {
            directory: dir.display().to_string(),
            count: files.len(),
            page_size,
            pages,
            files,
        }
    }
}

/// Scan listing: a summary line, then the files grouped by page.
///
/// `shift` leading entries are listed before the first page.
pub fn format_scan_output(report: &ScanReport, shift: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({}, {} of {})",
        report.directory,
        plural(report.count, "image"),
        plural(report.pages, "page"),
        report.page_size
    )];

    let shift = shift.min(report.files.len());
    if shift > 0 {
        lines.push("Skipped".to_string());
        for (i, name) in report.files[..shift].iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), name));
        }
    }

    let page_size = report.page_size.max(1);
    for (page, chunk) in report.files[shift..].chunks(page_size).enumerate() {
        lines.push(format!("Page {}", page + 1));
        for (i, name) in chunk.iter().enumerate() {
            let pos = shift + page * page_size + i + 1;
            lines.push(format!("{}{} {}", indent(1), format_index(pos), name));
        }
    }
    lines
}

pub fn print_scan_output(report: &ScanReport, shift: usize) {
    for line in format_scan_output(report, shift) {
        println!("{}", line);
    }
}

// ============================================================================
// Info
// ============================================================================

/// Snapshot of a gallery's layout and page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryInfo {
    pub directory: String,
    pub count: usize,
    pub cols: u32,
    pub rows: u32,
    pub page_size: usize,
    pub shift: usize,
    pub pages: usize,
    pub size: (u32, u32),
    pub geometry: GridGeometry,
    pub info_text: String,
}

impl GalleryInfo {
    pub fn of<B: ImageBackend>(gallery: &Gallery<B>) -> Self {
        Self {
            directory: gallery.base_path().display().to_string(),
            count: gallery.count(),
            cols: gallery.cols(),
            rows: gallery.rows(),
            page_size: gallery.page_size(),
            shift: gallery.shift(),
            pages: gallery.pages_count(),
            size: gallery.size(),
            geometry: gallery.geometry(),
            info_text: gallery.info_text(),
        }
    }
}

pub fn format_info_output(info: &GalleryInfo) -> Vec<String> {
    let g = &info.geometry;
    vec![
        info.directory.clone(),
        format!("{}Files: {}", indent(1), info.count),
        format!(
            "{}Grid: {} x {} ({} per page, shift {})",
            indent(1),
            info.cols,
            info.rows,
            info.page_size,
            info.shift
        ),
        format!("{}Pages: {}", indent(1), info.pages),
        format!("{}Canvas: {} x {}", indent(1), info.size.0, info.size.1),
        format!(
            "{}Active grid: {} x {}, slot {} x {}",
            indent(1),
            g.cols,
            g.rows,
            g.slot_width,
            g.slot_height
        ),
        format!("{}Page: {}", indent(1), info.info_text),
    ]
}

pub fn print_info_output(info: &GalleryInfo) {
    for line in format_info_output(info) {
        println!("{}", line);
    }
}

// ============================================================================
// Render
// ============================================================================

pub fn format_render_output(path: &Path, bitmap: &Bitmap) -> String {
    format!(
        "Wrote {} ({} x {})",
        path.display(),
        bitmap.width,
        bitmap.height
    )
}

pub fn format_skipped(path: &Path) -> String {
    format!("Previews are disabled for {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(0, "image"), "0 images");
    }

    // =========================================================================
    // Scan output
    // =========================================================================

    #[test]
    fn scan_output_groups_by_page() {
        let files = names(&["a.png", "b.png", "c.png"]);
        let report = ScanReport::new(Path::new("photos"), &files, 2, 2);
        let lines = format_scan_output(&report, 0);
        assert_eq!(
            lines,
            vec![
                "photos (3 images, 2 pages of 2)",
                "Page 1",
                "    001 a.png",
                "    002 b.png",
                "Page 2",
                "    003 c.png",
            ]
        );
    }

    #[test]
    fn scan_output_lists_shifted_entries_first() {
        let files = names(&["a.png", "b.png", "c.png"]);
        let report = ScanReport::new(Path::new("photos"), &files, 4, 1);
        let lines = format_scan_output(&report, 1);
        assert_eq!(
            lines,
            vec![
                "photos (3 images, 1 page of 4)",
                "Skipped",
                "    001 a.png",
                "Page 1",
                "    002 b.png",
                "    003 c.png",
            ]
        );
    }

    #[test]
    fn scan_output_empty() {
        let report = ScanReport::new(Path::new("empty"), &[], 4, 1);
        assert_eq!(
            format_scan_output(&report, 0),
            vec!["empty (0 images, 1 page of 4)"]
        );
    }

    #[test]
    fn scan_report_serializes() {
        let files = names(&["a.png"]);
        let report = ScanReport::new(Path::new("photos"), &files, 4, 1);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["files"][0], "a.png");
    }

    // =========================================================================
    // Info / render output
    // =========================================================================

    #[test]
    fn info_output_lines() {
        let info = GalleryInfo {
            directory: "photos".to_string(),
            count: 5,
            cols: 2,
            rows: 2,
            page_size: 4,
            shift: 0,
            pages: 2,
            size: (200, 100),
            geometry: GridGeometry {
                cols: 2,
                rows: 2,
                slot_width: 99,
                slot_height: 49,
            },
            info_text: "1 / 2 (1 - 4 / 5)".to_string(),
        };
        let lines = format_info_output(&info);
        assert_eq!(lines[0], "photos");
        assert_eq!(lines[2], "    Grid: 2 x 2 (4 per page, shift 0)");
        assert_eq!(lines[5], "    Active grid: 2 x 2, slot 99 x 49");
        assert_eq!(lines[6], "    Page: 1 / 2 (1 - 4 / 5)");
    }

    #[test]
    fn render_output_line() {
        let bitmap = Bitmap {
            width: 3,
            height: 2,
            data: vec![0; 24],
        };
        assert_eq!(
            format_render_output(Path::new("out.png"), &bitmap),
            "Wrote out.png (3 x 2)"
        );
    }
}
