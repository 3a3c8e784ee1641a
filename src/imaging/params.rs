//! Parameter types for image operations.
//!
//! - [`Filter`]: resampling filter used when scaling thumbnails. Serialized as
//!   its lowercase config name (`"box"`, `"lanczos3"`, ...).
//! - [`Color`]: opaque RGB colour, serialized as `"#rrggbb"`.
//! - [`ThumbPolicy`]: everything a worker needs to derive one slot's thumbnail.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resampling filter for thumbnail scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    Box,
    Bilinear,
    Bicubic,
    Bspline,
    Catmullrom,
    Lanczos3,
}

impl Filter {
    /// The `image` crate filter that implements this one.
    ///
    /// `image` has no B-spline kernel; Gaussian is the closest smooth
    /// approximation. Bicubic and Catmull-Rom share a kernel there.
    pub fn filter_type(self) -> FilterType {
        match self {
            Filter::Box => FilterType::Nearest,
            Filter::Bilinear => FilterType::Triangle,
            Filter::Bicubic | Filter::Catmullrom => FilterType::CatmullRom,
            Filter::Bspline => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parse `#rrggbb` (the `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid colour '{s}', expected #rrggbb"));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Per-pass thumbnail derivation settings, copied into every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbPolicy {
    pub enlarge: bool,
    pub transparency_grid: bool,
    pub filter: Filter,
    pub slot_width: u32,
    pub slot_height: u32,
}
