//! Single-level directory enumeration.
//!
//! Lists the immediate children of a directory, either files whose extension
//! is in an allow-list or sub-directories. Results come back in whatever
//! order the filesystem produces them; sorting is the scanner's job.

use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// What kind of entries [`enumerate`] yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Regular files with a matching extension.
    Files,
    /// Sub-directories (extension filter ignored).
    Directories,
}

/// List the names of the entries directly inside `path`.
///
/// `extensions` are matched case-insensitively against the text after the
/// last `.` of a file name. A `limit` of 0 means unlimited; otherwise
/// enumeration stops after `limit` matches.
///
/// A missing directory, or one we may not read, is not an error: it simply
/// has no entries. Other I/O failures on the directory itself are returned.
/// Unreadable individual entries (e.g. dangling symlinks) are skipped.
pub fn enumerate(
    path: &Path,
    extensions: &[String],
    mode: Mode,
    limit: usize,
) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    let walker = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                let kind = err.io_error().map(io::Error::kind);
                if matches!(
                    kind,
                    Some(io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied)
                ) {
                    return Ok(Vec::new());
                }
                return Err(err.into());
            }
            Err(err) => {
                log::debug!("Skipping unreadable entry in {} | {}", path.display(), err);
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        let keep = match mode {
            Mode::Files => entry.file_type().is_file() && has_extension(&name, extensions),
            Mode::Directories => entry.file_type().is_dir(),
        };
        if !keep {
            continue;
        }

        names.push(name);
        if limit != 0 && names.len() >= limit {
            break;
        }
    }

    Ok(names)
}

/// Case-insensitive match of the text after the last `.` against `extensions`.
pub fn has_extension(name: &str, extensions: &[String]) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn files_mode_filters_by_extension() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.jpg"), b"").unwrap();
        fs::write(tmp.path().join("b.PNG"), b"").unwrap();
        fs::write(tmp.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(tmp.path().join("sub.jpg")).unwrap();

        let names = enumerate(tmp.path(), &exts(&["jpg", "png"]), Mode::Files, 0).unwrap();
        assert_eq!(sorted(names), vec!["a.jpg", "b.PNG"]);
    }

    #[test]
    fn directories_mode_yields_only_directories() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.jpg"), b"").unwrap();
        fs::create_dir(tmp.path().join("one")).unwrap();
        fs::create_dir(tmp.path().join("two")).unwrap();

        let names = enumerate(tmp.path(), &exts(&["jpg"]), Mode::Directories, 0).unwrap();
        assert_eq!(sorted(names), vec!["one", "two"]);
    }

    #[test]
    fn limit_caps_result_count() {
        let tmp = TempDir::new().unwrap();
        for i in 0..5 {
            fs::write(tmp.path().join(format!("{i}.png")), b"").unwrap();
        }

        let names = enumerate(tmp.path(), &exts(&["png"]), Mode::Files, 3).unwrap();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn missing_directory_is_empty_not_error() {
        let tmp = TempDir::new().unwrap();
        let names = enumerate(&tmp.path().join("nope"), &exts(&["png"]), Mode::Files, 0).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(has_extension("photo.JpG", &exts(&["jpg"])));
        assert!(has_extension("archive.tar.png", &exts(&["png"])));
        assert!(!has_extension("png", &exts(&["png"])));
        assert!(!has_extension("photo.jpeg", &exts(&["jpg"])));
    }
}
