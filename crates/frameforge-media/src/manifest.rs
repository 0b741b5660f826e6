//! Side-car segment index manifest.
//!
//! The upstream transcoding pipeline writes a JSON manifest next to each
//! fragmented media file:
//!
//! ```json
//! { "segments": [
//!     { "name": "header", "offset": 0, "size": 100 },
//!     { "name": "moof", "offset": 100, "size": 20, "frame_start": 0, "frame_samples": 30 },
//!     { "name": "mdat", "offset": 120, "size": 5000 }
//! ] }
//! ```
//!
//! `"moof"` entries describe which frames the immediately following `"mdat"`
//! payload contains. This module only models the wire shape; structural
//! validation lives in [`crate::index::SegmentIndex::from_manifest`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Kind of one index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Container header (ftyp + moov); always the first entry.
    #[serde(rename = "header")]
    Header,
    /// Fragment metadata box listing the frames of the following data box.
    #[serde(rename = "moof")]
    FragmentMeta,
    /// Fragment data payload.
    #[serde(rename = "mdat")]
    FragmentData,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::FragmentMeta => write!(f, "moof"),
            Self::FragmentData => write!(f, "mdat"),
        }
    }
}

/// One raw manifest entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestSegment {
    pub name: SegmentKind,
    pub offset: u64,
    pub size: u64,
    /// First frame covered; fragment-metadata entries only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_start: Option<u64>,
    /// Count of frames covered; fragment-metadata entries only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_samples: Option<u64>,
}

/// The parsed side-car manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub segments: Vec<ManifestSegment>,
}

impl Manifest {
    /// Parse a manifest from raw JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| Error::invalid_index(e.to_string()))
    }

    /// Read and parse a manifest file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_slice(&data)
    }
}
