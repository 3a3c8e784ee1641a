//! Configuration loading and validation.
//!
//! Two galleries are configured independently: `[view]` drives the live
//! preview pane and `[thumbs]` the one-shot preview bitmap. Values shared by
//! both can go into `[common]`; a key set in `[view]` or `[thumbs]` wins over
//! the same key in `[common]`, which in turn wins over the stock defaults.
//!
//! ```toml
//! [general]
//! log = "warn"              # none | error | warn | info | debug | trace
//! # log_file = "dirpreview.log"
//!
//! [processing]
//! # max_threads = 4         # omit for auto = CPU cores
//!
//! [common]
//! extensions = ["jpg", "jpeg", "gif", "png", "bmp", "webp"]
//! background = "#000000"
//!
//! [view]
//! cols = 3
//! rows = 3
//!
//! [thumbs]
//! cols = 2
//! rows = 2
//! ```
//!
//! Config files are sparse: only the keys you set override anything. Unknown
//! keys are rejected to catch typos early.

use crate::imaging::{Color, Filter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub general: GeneralConfig,
    pub processing: ProcessingConfig,
    /// Live preview pane.
    pub view: GalleryConfig,
    /// One-shot preview bitmap.
    pub thumbs: GalleryConfig,
}

impl Config {
    /// Validate both gallery sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.view.validate("view")?;
        self.thumbs.validate("thumbs")
    }

    /// Lower-case extensions and strip any leading dots.
    fn normalize(&mut self) {
        self.view.normalize();
        self.thumbs.normalize();
    }
}

/// One of the two gallery sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Section {
    /// `[view]`: the live preview pane.
    View,
    /// `[thumbs]`: the one-shot preview bitmap.
    #[default]
    Thumbs,
}

impl Config {
    pub fn gallery(&self, section: Section) -> &GalleryConfig {
        match section {
            Section::View => &self.view,
            Section::Thumbs => &self.thumbs,
        }
    }
}

/// Log verbosity, as written in `[general] log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    None,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Spec string understood by `flexi_logger`.
    pub fn as_spec(self) -> &'static str {
        match self {
            LogLevel::None => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub log: LogLevel,
    /// Log to this file instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

/// Parallel decoding settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of decoding workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_threads
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Settings for one gallery (scan parameters, grid, and rendering policy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub enabled: bool,
    /// File extensions to show, matched case-insensitively.
    pub extensions: Vec<String>,
    pub cols: u32,
    pub rows: u32,
    /// Reshape a short last page into a squarer grid.
    pub adaptive: bool,
    pub background: Color,
    pub filter: Filter,
    /// Scale small images up to fill their slot.
    pub enlarge: bool,
    /// Skip previews of `..` parent-directory entries.
    pub ignore_dots: bool,
    /// Draw transparent images over a checkerboard.
    pub transparency_grid: bool,
    pub pad_h: u32,
    pub pad_v: u32,
    /// Maximum files read from the top-level directory (0 = unlimited).
    pub files_limit: usize,
    /// Leading entries skipped before the first page.
    pub shift: usize,
    /// Look into sub-directories when a directory has no matching files.
    pub deep_scan: bool,
    pub deep_scan_level: u32,
    /// Files taken from each sub-directory.
    pub deep_scan_limit: usize,
    /// Files read per directory below the top level (0 = unlimited).
    pub deep_scan_files_limit: usize,
    /// Show the page info overlay.
    pub info: bool,
    pub info_color: Color,
    pub info_size: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extensions: ["jpg", "jpeg", "gif", "png", "bmp", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            cols: 2,
            rows: 2,
            adaptive: true,
            background: Color::rgb(0, 0, 0),
            filter: Filter::Box,
            enlarge: false,
            ignore_dots: true,
            transparency_grid: true,
            pad_h: 1,
            pad_v: 1,
            files_limit: 1000,
            shift: 0,
            deep_scan: false,
            deep_scan_level: 1,
            deep_scan_limit: 1,
            deep_scan_files_limit: 100,
            info: false,
            info_color: Color::rgb(0, 255, 0),
            info_size: 16,
        }
    }
}

impl GalleryConfig {
    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::Validation(format!(
                "{section}.cols and {section}.rows must be at least 1"
            )));
        }
        if self.extensions.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{section}.extensions must not contain empty entries"
            )));
        }
        if self.info_size == 0 {
            return Err(ConfigError::Validation(format!(
                "{section}.info_size must be non-zero"
            )));
        }
        Ok(())
    }

    fn normalize(&mut self) {
        for ext in &mut self.extensions {
            *ext = ext.trim().trim_start_matches('.').to_lowercase();
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Config::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Fold a `[common]` table into the `[view]` and `[thumbs]` tables.
///
/// Keys already present in a gallery section take precedence.
fn apply_common_section(value: toml::Value) -> toml::Value {
    let toml::Value::Table(mut table) = value else {
        return value;
    };
    let Some(common) = table.remove("common") else {
        return toml::Value::Table(table);
    };
    for section in ["view", "thumbs"] {
        let merged = match table.remove(section) {
            Some(own) => merge_toml(common.clone(), own),
            None => common.clone(),
        };
        table.insert(section.to_string(), merged);
    }
    toml::Value::Table(table)
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional user overlay onto a base value, then deserialize,
/// normalize, and validate.
pub fn resolve_config(base: toml::Value, overlay: Option<toml::Value>) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, apply_common_section(ov)),
        None => base,
    };
    let mut config: Config = merged.try_into()?;
    config.normalize();
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file, falling back to stock defaults when the
/// file does not exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock config file with every key at its default.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# dirpreview configuration
# ========================
#
# Every key is optional; the values below are the defaults.
# Keys in [common] apply to both [view] and [thumbs] unless a section
# sets the same key itself.

[general]
# Log verbosity: none, error, warn, info, debug, trace
log = "warn"
# Write the log to a file instead of stderr
# log_file = "dirpreview.log"

[processing]
# Maximum parallel decoding workers (omit for auto = CPU cores)
# max_threads = 4

# [common]
# background = "#202020"

# Live preview pane
[view]
enabled = true
# File extensions to show (case-insensitive)
extensions = ["jpg", "jpeg", "gif", "png", "bmp", "webp"]
# Grid size of a full page
cols = 2
rows = 2
# Reshape a short last page into a squarer grid
adaptive = true
# Canvas colour behind the thumbnails
background = "#000000"
# Scaling filter: box, bilinear, bicubic, bspline, catmullrom, lanczos3
filter = "box"
# Scale small images up to fill their slot
enlarge = false
# Skip previews of ".." entries
ignore_dots = true
# Draw transparent images over a checkerboard
transparency_grid = true
# Gap between slots, in pixels
pad_h = 1
pad_v = 1
# Maximum files read from the directory (0 = unlimited)
files_limit = 1000
# Leading entries to skip
shift = 0
# Look into sub-directories when a directory has no matching files
deep_scan = false
deep_scan_level = 1
# Files taken from each sub-directory
deep_scan_limit = 1
# Files read per sub-directory (0 = unlimited)
deep_scan_files_limit = 100
# Page info overlay
info = false
info_color = "#00ff00"
info_size = 16

# One-shot preview bitmap (same keys as [view])
[thumbs]
enabled = true
extensions = ["jpg", "jpeg", "gif", "png", "bmp", "webp"]
cols = 2
rows = 2
adaptive = true
background = "#000000"
filter = "box"
enlarge = false
ignore_dots = true
transparency_grid = true
pad_h = 1
pad_v = 1
files_limit = 1000
shift = 0
deep_scan = false
deep_scan_level = 1
deep_scan_limit = 1
deep_scan_files_limit = 100
info = false
info_color = "#00ff00"
info_size = 16
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_gallery_config_values() {
        let config = GalleryConfig::default();
        assert_eq!((config.cols, config.rows), (2, 2));
        assert!(config.adaptive);
        assert!(config.transparency_grid);
        assert!(!config.enlarge);
        assert_eq!(config.files_limit, 1000);
        assert_eq!(config.deep_scan_files_limit, 100);
        assert_eq!(config.background, Color::rgb(0, 0, 0));
        assert_eq!(config.info_color, Color::rgb(0, 255, 0));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[view]
cols = 4
background = "#fafafa"
"##;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.view.cols, 4);
        assert_eq!(config.view.background, Color::rgb(0xfa, 0xfa, 0xfa));
        // Defaults preserved
        assert_eq!(config.view.rows, 2);
        assert_eq!(config.thumbs.cols, 2);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("missing.toml")).unwrap();
        assert_eq!(config.view, GalleryConfig::default());
        assert_eq!(config.general.log, LogLevel::Warn);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dirpreview.toml");
        fs::write(
            &path,
            r##"
[general]
log = "debug"

[thumbs]
filter = "lanczos3"
deep_scan = true
"##,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.general.log, LogLevel::Debug);
        assert_eq!(config.thumbs.filter, Filter::Lanczos3);
        assert!(config.thumbs.deep_scan);
        assert!(!config.view.deep_scan);
    }

    #[test]
    fn common_section_applies_to_both_galleries() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dirpreview.toml");
        fs::write(
            &path,
            r##"
[common]
cols = 5
enlarge = true

[view]
cols = 3
"##,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.view.cols, 3);
        assert_eq!(config.thumbs.cols, 5);
        assert!(config.view.enlarge);
        assert!(config.thumbs.enlarge);
    }

    #[test]
    fn extensions_are_normalized() {
        let overlay: toml::Value = toml::from_str(
            r##"
[view]
extensions = [".JPG", "Png"]
"##,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.view.extensions, vec!["jpg", "png"]);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dirpreview.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let overlay: toml::Value = toml::from_str("[view]\ncolumns = 3\n").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_section_rejected() {
        let overlay: toml::Value = toml::from_str("[lister]\ncols = 3\n").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(result.is_err());
    }

    #[test]
    fn bad_colour_rejected() {
        let overlay: toml::Value = toml::from_str("[view]\nbackground = \"red\"\n").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(result.is_err());
    }

    #[test]
    fn zero_grid_fails_validation() {
        let overlay: toml::Value = toml::from_str("[thumbs]\nrows = 0\n").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\nz = 4\n").unwrap();
        let merged = merge_toml(base, overlay);
        let a = merged.get("a").unwrap();
        assert_eq!(a.get("x").unwrap().as_integer(), Some(1));
        assert_eq!(a.get("y").unwrap().as_integer(), Some(3));
        assert_eq!(a.get("z").unwrap().as_integer(), Some(4));
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let config = ProcessingConfig {
            max_threads: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
        let config = ProcessingConfig {
            max_threads: Some(cores + 100),
        };
        assert_eq!(effective_threads(&config), cores);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn gallery_selects_section() {
        let mut config = Config::default();
        config.view.cols = 7;
        assert_eq!(config.gallery(Section::View).cols, 7);
        assert_eq!(config.gallery(Section::Thumbs).cols, 2);
    }

    #[test]
    fn log_level_spec_strings() {
        assert_eq!(LogLevel::None.as_spec(), "off");
        assert_eq!(LogLevel::Debug.as_spec(), "debug");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(stock_defaults_value(), Some(value)).unwrap();
        let defaults = Config::default();
        assert_eq!(config.view, defaults.view);
        assert_eq!(config.thumbs, defaults.thumbs);
        assert_eq!(config.general.log, defaults.general.log);
    }
}
