//! Media source descriptors consumed from the surrounding platform.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use frameforge_media::SegmentIndex;

use crate::{Error, Result};

/// Media descriptor handed over by the platform's request layer.
///
/// Fragmented sources carry `resolution: [height, width]` plus a side-car
/// segment index path; plain sources carry `height`/`width` directly and are
/// accessed whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaDescriptor {
    Fragmented {
        fragmented_source_path: PathBuf,
        /// `[height, width]`, in that order.
        resolution: [u32; 2],
        fps: f64,
        segment_index_path: PathBuf,
    },
    Plain {
        original_source_path: PathBuf,
        height: u32,
        width: u32,
        fps: f64,
    },
}

impl MediaDescriptor {
    /// Parse a descriptor from raw JSON bytes as handed over by the
    /// request layer.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data)
            .map_err(|e| Error::format(format!("invalid media descriptor: {e}")))
    }
}

/// A byte-addressable media source plus its geometry, read-only for the
/// lifetime of one request.
#[derive(Debug)]
pub struct MediaSource {
    path: PathBuf,
    fps: f64,
    width: u32,
    height: u32,
    index: Option<SegmentIndex>,
}

impl MediaSource {
    /// Build a source, validating its geometry.
    pub fn new(
        path: impl Into<PathBuf>,
        fps: f64,
        width: u32,
        height: u32,
        index: Option<SegmentIndex>,
    ) -> Result<Self> {
        if !(fps > 0.0) {
            return Err(Error::format(format!("invalid fps: {fps}")));
        }
        if width == 0 || height == 0 {
            return Err(Error::format(format!(
                "invalid resolution: {width}x{height}"
            )));
        }
        Ok(Self {
            path: path.into(),
            fps,
            width,
            height,
            index,
        })
    }

    /// Build a source from a descriptor, loading the side-car index when one
    /// is referenced.
    pub fn from_descriptor(descriptor: &MediaDescriptor) -> Result<Self> {
        match descriptor {
            MediaDescriptor::Fragmented {
                fragmented_source_path,
                resolution,
                fps,
                segment_index_path,
            } => {
                let index = SegmentIndex::from_file(segment_index_path)?;
                Self::new(
                    fragmented_source_path,
                    *fps,
                    resolution[1],
                    resolution[0],
                    Some(index),
                )
            }
            MediaDescriptor::Plain {
                original_source_path,
                height,
                width,
                fps,
            } => Self::new(original_source_path, *fps, *width, *height, None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The segment index, when the source is fragmented and indexed.
    pub fn index(&self) -> Option<&SegmentIndex> {
        self.index.as_ref()
    }
}
