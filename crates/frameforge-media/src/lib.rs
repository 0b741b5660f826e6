//! Frameforge-Media: segment index parsing and byte-level read planning.
//!
//! This crate covers everything between a side-car segment index manifest
//! and the bytes of a self-contained media fragment on disk:
//!
//! - **Manifest parsing**: the JSON side-car produced by the upstream
//!   transcoding pipeline, validated into an immutable [`SegmentIndex`]
//! - **Frame resolution**: mapping frame numbers and frame ranges to the
//!   minimal set of segments that must be read to decode them
//! - **Read planning**: coalescing segment byte ranges into contiguous runs
//! - **Extraction**: memory-mapped scatter-gather copy of those runs into a
//!   temporary fragment file
//!
//! Nothing here launches external tools or keeps state across requests; a
//! [`SegmentIndex`] is built once per request and only ever read.

pub mod coalesce;
pub mod error;
pub mod extract;
pub mod index;
pub mod manifest;
pub mod resolver;

pub use coalesce::{coalesce, ByteRun};
pub use error::{Error, Result};
pub use extract::{extract_segments, ExtractedFragment};
pub use index::{Fragment, Segment, SegmentIndex};
pub use manifest::{Manifest, ManifestSegment, SegmentKind};
pub use resolver::{resolve_frame, resolve_range, FRAGMENT_BOUNDARY_SLACK};
