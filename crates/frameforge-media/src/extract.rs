//! Memory-mapped scatter-gather extraction.
//!
//! Copies the bytes of a resolved segment set out of the source file into a
//! small self-contained fragment file that external tools can decode on its
//! own. The source mapping lives only for the duration of one call.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::coalesce::coalesce;
use crate::index::SegmentIndex;
use crate::{Error, Result};

/// A self-contained media fragment materialized from the source.
#[derive(Debug, Clone)]
pub struct ExtractedFragment {
    /// Location of the fragment file.
    pub path: PathBuf,
    /// `frame_start` of the earliest fragment included; seeks into the
    /// fragment are expressed relative to this frame rather than absolute
    /// media time.
    pub anchor_frame: u64,
    /// Total bytes written; equals the sum of the constituent segment sizes.
    pub bytes: u64,
}

/// Copy the segments at the given arena `positions` into `dest`.
///
/// Ranges are coalesced into contiguous runs and written verbatim in offset
/// order, so identical inputs produce byte-identical fragment files.
pub fn extract_segments(
    source: &Path,
    index: &SegmentIndex,
    positions: &[usize],
    dest: &Path,
) -> Result<ExtractedFragment> {
    let ranges: Vec<(u64, u64)> = positions
        .iter()
        .map(|&p| {
            let segment = index.segment(p);
            (segment.offset, segment.size)
        })
        .collect();
    let runs = coalesce(&ranges);

    let file = File::open(source)?;
    // The source is opened read-only and nothing in this engine writes to it
    // while mapped.
    let map = unsafe { Mmap::map(&file)? };

    let mut out = File::create(dest)?;
    let mut bytes = 0u64;
    for run in &runs {
        if run.end() > map.len() as u64 {
            return Err(Error::RangeBeyondSource {
                offset: run.offset,
                size: run.size,
                len: map.len() as u64,
            });
        }
        out.write_all(&map[run.offset as usize..run.end() as usize])?;
        bytes += run.size;
    }
    out.flush()?;

    let anchor_frame = index
        .covered_span(positions)
        .map(|(start, _)| start)
        .unwrap_or(0);

    tracing::debug!(
        "Extracted {} bytes over {} runs into {:?}",
        bytes,
        runs.len(),
        dest
    );

    Ok(ExtractedFragment {
        path: dest.to_path_buf(),
        anchor_frame,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Manifest, ManifestSegment, SegmentKind};
    use crate::resolver::resolve_frame;

    fn entry(
        name: SegmentKind,
        offset: u64,
        size: u64,
        frame_start: Option<u64>,
        frame_samples: Option<u64>,
    ) -> ManifestSegment {
        ManifestSegment {
            name,
            offset,
            size,
            frame_start,
            frame_samples,
        }
    }

    /// header(0,100), moof0(100,20,f0..30), mdat0(120,5000),
    /// moof1(5120,20,f30..60), mdat1(5140,5000).
    fn scenario_index() -> SegmentIndex {
        SegmentIndex::from_manifest(Manifest {
            segments: vec![
                entry(SegmentKind::Header, 0, 100, None, None),
                entry(SegmentKind::FragmentMeta, 100, 20, Some(0), Some(30)),
                entry(SegmentKind::FragmentData, 120, 5000, None, None),
                entry(SegmentKind::FragmentMeta, 5120, 20, Some(30), Some(30)),
                entry(SegmentKind::FragmentData, 5140, 5000, None, None),
            ],
        })
        .unwrap()
    }

    fn source_bytes() -> Vec<u8> {
        (0..10140u32).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn fragment_is_the_exact_segment_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.mp4");
        let data = source_bytes();
        std::fs::write(&source, &data).unwrap();

        let index = scenario_index();
        let picks = resolve_frame(&index, 10);
        let dest = dir.path().join("frag.mp4");
        let fragment = extract_segments(&source, &index, &picks, &dest).unwrap();

        assert_eq!(fragment.anchor_frame, 0);
        assert_eq!(fragment.bytes, 100 + 20 + 5000);
        let written = std::fs::read(&dest).unwrap();
        assert_eq!(written, &data[0..5120]);
    }

    #[test]
    fn second_fragment_anchors_at_its_frame_start() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.mp4");
        let data = source_bytes();
        std::fs::write(&source, &data).unwrap();

        let index = scenario_index();
        let picks = resolve_frame(&index, 40);
        let dest = dir.path().join("frag.mp4");
        let fragment = extract_segments(&source, &index, &picks, &dest).unwrap();

        assert_eq!(fragment.anchor_frame, 30);
        assert_eq!(fragment.bytes, 100 + 20 + 5000);
        // header bytes, then the second moof/mdat pair.
        let written = std::fs::read(&dest).unwrap();
        assert_eq!(&written[0..100], &data[0..100]);
        assert_eq!(&written[100..], &data[5120..10140]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.mp4");
        std::fs::write(&source, source_bytes()).unwrap();

        let index = scenario_index();
        let picks = resolve_frame(&index, 28);
        let first = dir.path().join("a.mp4");
        let second = dir.path().join("b.mp4");
        extract_segments(&source, &index, &picks, &first).unwrap();
        extract_segments(&source, &index, &picks, &second).unwrap();

        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn truncated_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.mp4");
        std::fs::write(&source, &source_bytes()[..4000]).unwrap();

        let index = scenario_index();
        let picks = resolve_frame(&index, 10);
        let dest = dir.path().join("frag.mp4");
        let result = extract_segments(&source, &index, &picks, &dest);
        assert!(matches!(result, Err(Error::RangeBeyondSource { .. })));
    }

    #[test]
    fn missing_source_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let index = scenario_index();
        let result = extract_segments(
            &dir.path().join("nope.mp4"),
            &index,
            &[0, 1, 2],
            &dir.path().join("frag.mp4"),
        );
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
