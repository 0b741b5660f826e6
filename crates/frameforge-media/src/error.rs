//! Error types for frameforge-media.

use std::io;
use thiserror::Error;

/// Result type for frameforge-media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for frameforge-media operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed segment index manifest.
    #[error("Invalid segment index: {0}")]
    InvalidIndex(String),

    /// Required field missing from a manifest entry.
    #[error("Missing field `{field}` on segment {position}")]
    MissingField {
        field: &'static str,
        position: usize,
    },

    /// Segment offsets must be monotonic non-decreasing.
    #[error("Non-monotonic offset at segment {position}: {offset} precedes {previous}")]
    NonMonotonicOffset {
        position: usize,
        offset: u64,
        previous: u64,
    },

    /// Fragment frame starts must be strictly increasing.
    #[error("frame_start at segment {position} is {frame_start}, not above previous {previous}")]
    NonIncreasingFrameStart {
        position: usize,
        frame_start: u64,
        previous: u64,
    },

    /// Every fragment-metadata entry must be immediately followed by its
    /// data entry.
    #[error("Fragment metadata at segment {position} has no following data entry")]
    OrphanFragment { position: usize },

    /// The index claims bytes past the end of the source file.
    #[error("Segment range {offset}+{size} exceeds source length {len}")]
    RangeBeyondSource { offset: u64, size: u64, len: u64 },
}

impl Error {
    /// Create an invalid index error.
    pub fn invalid_index(msg: impl Into<String>) -> Self {
        Self::InvalidIndex(msg.into())
    }
}
