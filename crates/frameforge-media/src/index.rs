//! Immutable segment index for one media source.
//!
//! A [`SegmentIndex`] owns the full ordered sequence of segments described
//! by the side-car manifest plus a derived list of fragments used for
//! searching. It is built once per request and only ever read afterwards.

use std::path::Path;

use crate::manifest::{Manifest, SegmentKind};
use crate::{Error, Result};

/// One entry of the segment index.
#[derive(Debug, Clone)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Byte offset within the source file.
    pub offset: u64,
    /// Byte count.
    pub size: u64,
    /// First frame covered; fragment-metadata entries only.
    pub frame_start: Option<u64>,
    /// Count of frames covered; fragment-metadata entries only.
    pub frame_samples: Option<u64>,
}

/// Derived view of one fragment: the arena position of its metadata entry
/// plus its frame coverage.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    /// Position of the fragment-metadata entry in the segment arena.
    pub meta: usize,
    pub frame_start: u64,
    pub frame_samples: u64,
}

impl Fragment {
    /// First frame past this fragment's coverage.
    pub fn frame_end(&self) -> u64 {
        self.frame_start + self.frame_samples
    }

    /// Position of the fragment-data entry; the manifest guarantees it
    /// immediately follows the metadata entry.
    pub fn data(&self) -> usize {
        self.meta + 1
    }
}

/// Ordered description of a fragmented media file's internal structure.
#[derive(Debug, Clone)]
pub struct SegmentIndex {
    segments: Vec<Segment>,
    fragments: Vec<Fragment>,
}

impl SegmentIndex {
    /// Validate a parsed manifest into an index.
    ///
    /// Rejects an empty manifest, a first entry that is not the header,
    /// non-monotonic offsets, fragment metadata without coverage fields or
    /// without a following data entry, and frame starts that are not
    /// strictly increasing.
    pub fn from_manifest(manifest: Manifest) -> Result<Self> {
        if manifest.segments.is_empty() {
            return Err(Error::invalid_index("manifest contains no segments"));
        }
        if manifest.segments[0].name != SegmentKind::Header {
            return Err(Error::invalid_index("first segment is not the header"));
        }

        let mut segments = Vec::with_capacity(manifest.segments.len());
        let mut fragments = Vec::new();
        let mut previous_offset = 0u64;
        let mut previous_frame_start: Option<u64> = None;

        for (position, entry) in manifest.segments.iter().enumerate() {
            if position > 0 && entry.name == SegmentKind::Header {
                return Err(Error::invalid_index(format!(
                    "unexpected header at segment {position}"
                )));
            }
            if entry.offset < previous_offset {
                return Err(Error::NonMonotonicOffset {
                    position,
                    offset: entry.offset,
                    previous: previous_offset,
                });
            }
            previous_offset = entry.offset;

            if entry.name == SegmentKind::FragmentMeta {
                let frame_start = entry.frame_start.ok_or(Error::MissingField {
                    field: "frame_start",
                    position,
                })?;
                let frame_samples = entry.frame_samples.ok_or(Error::MissingField {
                    field: "frame_samples",
                    position,
                })?;
                if frame_samples == 0 {
                    return Err(Error::invalid_index(format!(
                        "fragment at segment {position} covers zero frames"
                    )));
                }
                if let Some(previous) = previous_frame_start {
                    if frame_start <= previous {
                        return Err(Error::NonIncreasingFrameStart {
                            position,
                            frame_start,
                            previous,
                        });
                    }
                }
                previous_frame_start = Some(frame_start);

                let next = manifest.segments.get(position + 1);
                if next.map(|s| s.name) != Some(SegmentKind::FragmentData) {
                    return Err(Error::OrphanFragment { position });
                }
                fragments.push(Fragment {
                    meta: position,
                    frame_start,
                    frame_samples,
                });
            }

            segments.push(Segment {
                kind: entry.name,
                offset: entry.offset,
                size: entry.size,
                frame_start: entry.frame_start,
                frame_samples: entry.frame_samples,
            });
        }

        Ok(Self {
            segments,
            fragments,
        })
    }

    /// Parse and validate an index from raw manifest bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::from_manifest(Manifest::from_slice(data)?)
    }

    /// Read, parse, and validate an index from a manifest file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest(Manifest::from_file(path)?)
    }

    /// The full segment arena, in file-offset order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The derived fragment list, in frame order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Segment at an arena position.
    pub fn segment(&self, position: usize) -> &Segment {
        &self.segments[position]
    }

    /// First frame past the coverage of the last fragment, or 0 when the
    /// index holds no fragments.
    pub fn frame_end(&self) -> u64 {
        self.fragments.last().map(Fragment::frame_end).unwrap_or(0)
    }

    /// Inclusive fragment-aligned frame span covered by the fragments whose
    /// metadata entries appear in `positions` (sorted arena positions).
    pub fn covered_span(&self, positions: &[usize]) -> Option<(u64, u64)> {
        let mut first: Option<&Fragment> = None;
        let mut last: Option<&Fragment> = None;
        for fragment in &self.fragments {
            if positions.binary_search(&fragment.meta).is_ok() {
                if first.is_none() {
                    first = Some(fragment);
                }
                last = Some(fragment);
            }
        }
        Some((first?.frame_start, last?.frame_end() - 1))
    }
}
