//! Extraction request types.

use std::fmt;

use serde::{Deserialize, Serialize};

use frameforge_av::actions::CropRect;

use crate::{Error, Result};

/// Inclusive frame range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: u64,
    pub end: u64,
}

impl FrameRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }
}

/// Normalized region of interest, `0.0..=1.0` in each dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionOfInterest {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RegionOfInterest {
    /// Scale to pixels and clamp into the frame. A region that clamps to
    /// zero area is degenerate and rejected.
    pub fn to_crop(&self, frame_width: u32, frame_height: u32) -> Result<CropRect> {
        let x = scale_clamped(self.x, frame_width);
        let y = scale_clamped(self.y, frame_height);
        let width = scale_clamped(self.width, frame_width).min(frame_width - x);
        let height = scale_clamped(self.height, frame_height).min(frame_height - y);

        if width == 0 || height == 0 {
            return Err(Error::range(format!(
                "degenerate region of interest: {:?}",
                self
            )));
        }
        Ok(CropRect {
            x,
            y,
            width,
            height,
        })
    }
}

fn scale_clamped(normalized: f64, dimension: u32) -> u32 {
    (normalized * dimension as f64)
        .round()
        .clamp(0.0, dimension as f64) as u32
}

/// Output format of a rendered artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    Png,
    Jpeg,
    Gif,
    Mp4,
}

impl RenderFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Mp4 => "mp4",
        }
    }

    /// Animated formats are assembled from an intermediate video rather
    /// than tiled.
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Gif | Self::Mp4)
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Explicit tile arrangement, columns by rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    pub cols: u32,
    pub rows: u32,
}

impl TileGrid {
    /// Number of stills the grid can hold.
    pub fn capacity(&self) -> u64 {
        self.cols as u64 * self.rows as u64
    }

    /// Smallest near-square grid holding `count` stills:
    /// `ceil(sqrt(count))` columns, then as many rows as needed.
    pub fn auto(count: usize) -> Self {
        let cols = (count as f64).sqrt().ceil() as u32;
        let rows = (count as f64 / cols as f64).ceil() as u32;
        Self { cols, rows }
    }
}

/// A request for one or more rendered frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Discrete frame numbers, in output order.
    pub frames: Vec<u64>,
    /// Optional per-frame normalized crops, same order as `frames`.
    #[serde(default)]
    pub regions: Option<Vec<RegionOfInterest>>,
    /// Optional forced output size `(width, height)`.
    #[serde(default)]
    pub scale: Option<(u32, u32)>,
    /// Output format.
    pub format: RenderFormat,
    /// Frame rate for animated output; defaults to the source rate.
    #[serde(default)]
    pub fps: Option<f64>,
    /// Explicit tile grid; computed from the still count when absent.
    #[serde(default)]
    pub grid: Option<TileGrid>,
}
