//! Directory scanning.
//!
//! Builds the ordered file list a gallery pages through. The top level of
//! the directory is listed first; when it holds no matching files and deep
//! scanning is on, sub-directories are searched instead, a few files from
//! each, so a folder of folders still gets a meaningful preview.
//!
//! ```text
//! photos/                 scan("photos") with deep_scan, level 1, limit 2
//! ├── 2023/               →  2023/a1.jpg
//! │   ├── a1.jpg             2023/a2.jpg
//! │   ├── a2.jpg             2024/b1.jpg
//! │   └── a3.jpg
//! └── 2024/
//!     └── b1.jpg
//! ```
//!
//! ## Ordering and limits
//!
//! Every listing is sorted with [`natural::sort_natural`](crate::natural),
//! so `img2` precedes `img10`. Limits cap how many entries are *read* from a
//! directory; they are applied while enumerating, before sorting, so a huge
//! directory is never listed in full.
//!
//! - The top level reads at most `files_limit` entries.
//! - Every deeper level reads at most `deep_scan_files_limit` entries, for
//!   both its files and its sub-directories.
//! - Each sub-directory contributes at most `deep_scan_limit` files.
//!
//! Scanning never fails: a missing or unreadable directory scans as empty,
//! and enumeration errors are logged and treated the same way.

use crate::config::GalleryConfig;
use crate::enumerate::{self, Mode};
use crate::natural::sort_natural;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the naturally-sorted file list for `path`.
///
/// Deep-scan results are relative paths of the form `subdir/name`.
pub fn scan(path: &Path, config: &GalleryConfig) -> Vec<String> {
    inner_scan(path, config, 0)
}

fn inner_scan(path: &Path, config: &GalleryConfig, depth: u32) -> Vec<String> {
    let limit = if depth == 0 {
        config.files_limit
    } else {
        config.deep_scan_files_limit
    };

    let files = search_or_log(path, &config.extensions, limit, Mode::Files);
    if !files.is_empty()
        || !config.deep_scan
        || depth >= config.deep_scan_level
        || config.deep_scan_limit == 0
    {
        return files;
    }

    let mut result = Vec::new();
    for dir in search_or_log(path, &config.extensions, limit, Mode::Directories) {
        let nested = inner_scan(&path.join(&dir), config, depth + 1);
        result.extend(
            nested
                .into_iter()
                .take(config.deep_scan_limit)
                .map(|name| format!("{dir}/{name}")),
        );
    }
    result
}

fn search_or_log(path: &Path, extensions: &[String], limit: usize, mode: Mode) -> Vec<String> {
    match search_files(path, extensions, limit, mode) {
        Ok(names) => names,
        Err(e) => {
            log::warn!("Cannot list {} | {}", path.display(), e);
            Vec::new()
        }
    }
}

/// List one directory level and sort it naturally.
///
/// `limit` (0 = unlimited) caps how many entries are read. In
/// [`Mode::Directories`] the extension filter is ignored.
pub fn search_files(
    path: &Path,
    extensions: &[String],
    limit: usize,
    mode: Mode,
) -> Result<Vec<String>, ScanError> {
    let mut names = enumerate::enumerate(path, extensions, mode, limit)?;
    sort_natural(&mut names);
    Ok(names)
}

/// Whether `path` names a parent-directory link (its last component is `..`).
///
/// File managers ask for previews of their `..` row; with `ignore_dots` set
/// those requests are skipped.
pub fn is_parent_link(path: &Path) -> bool {
    matches!(path.components().next_back(), Some(Component::ParentDir))
        || path.to_string_lossy().trim_end_matches(['/', '\\']).ends_with("..")
}
