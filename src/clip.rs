//! Clip assembly: fragment extraction, remux, and concatenation.

use std::path::{Path, PathBuf};

use frameforge_av::actions::{concat_fragments, cut_stream_copy, remux_concat_ready};
use frameforge_av::{frame_timecode, CommandRunner};
use frameforge_media::{extract_segments, resolve_range, SegmentIndex};

use crate::request::FrameRange;
use crate::source::MediaSource;
use crate::workspace::RequestWorkspace;
use crate::{Error, Result};

/// Fragment-aligned frames actually materialized for one requested range.
///
/// Fragment granularity makes this coarser than the request; it is reported
/// back rather than silently narrowed or widened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpan {
    pub start_frame: u64,
    pub end_frame: u64,
}

/// Result of clip assembly.
#[derive(Debug)]
pub struct ClipOutput {
    /// Final clip location (the caller-supplied destination).
    pub path: PathBuf,
    /// One span per requested range, in request order.
    pub spans: Vec<FrameSpan>,
}

/// Stitches fragments covering one or more frame ranges into a single
/// playable clip via stream-copy remux and concatenation.
pub(crate) struct ClipAssembler<'a> {
    pub runner: &'a dyn CommandRunner,
    pub ffmpeg: &'a Path,
    pub workspace: &'a RequestWorkspace,
}

impl ClipAssembler<'_> {
    pub fn assemble(
        &self,
        source: &MediaSource,
        ranges: &[FrameRange],
        dest: &Path,
    ) -> Result<ClipOutput> {
        if ranges.is_empty() {
            return Err(Error::range("no frame ranges requested"));
        }
        for range in ranges {
            if range.end < range.start {
                return Err(Error::range(format!(
                    "invalid frame range {}..{}",
                    range.start, range.end
                )));
            }
        }

        let mut spans = Vec::with_capacity(ranges.len());
        let mut parts = Vec::with_capacity(ranges.len());

        for (i, range) in ranges.iter().enumerate() {
            let part = self.workspace.artifact(&format!("part_{i:03}.ts"));
            let span = match source.index() {
                Some(index) => self.cut_indexed(source, index, range, i, &part)?,
                None => self.cut_whole(source, range, &part)?,
            };
            spans.push(span);
            parts.push(part);
        }

        let list = self.workspace.artifact("concat.txt");
        let output = self.workspace.artifact("clip.mp4");
        concat_fragments(self.runner, self.ffmpeg, &parts, &list, &output)?;
        let path = self.workspace.finalize("clip.mp4", dest)?;

        tracing::info!(
            "Assembled clip of {} ranges at {}",
            ranges.len(),
            path.display()
        );
        Ok(ClipOutput { path, spans })
    }

    /// Extract the covering fragments for one range and remux them into a
    /// concat-ready part.
    fn cut_indexed(
        &self,
        source: &MediaSource,
        index: &SegmentIndex,
        range: &FrameRange,
        ordinal: usize,
        part: &Path,
    ) -> Result<FrameSpan> {
        let picks = resolve_range(index, range.start, range.end);
        if picks.is_empty() {
            return Err(Error::range(format!(
                "frame range {}..{} is outside the indexed media",
                range.start, range.end
            )));
        }

        let fragment = self.workspace.artifact(&format!("frag_{ordinal:03}.mp4"));
        extract_segments(source.path(), index, &picks, &fragment)?;
        remux_concat_ready(self.runner, self.ffmpeg, &fragment, part)?;

        let (start_frame, end_frame) = index
            .covered_span(&picks)
            .ok_or_else(|| Error::format("resolved segments contain no fragments"))?;
        Ok(FrameSpan {
            start_frame,
            end_frame,
        })
    }

    /// No index: stream-copy the requested window straight from the source.
    /// The materialized span equals the request.
    fn cut_whole(&self, source: &MediaSource, range: &FrameRange, part: &Path) -> Result<FrameSpan> {
        let from = frame_timecode(range.start, source.fps());
        let to = frame_timecode(range.end + 1, source.fps());
        cut_stream_copy(self.runner, self.ffmpeg, source.path(), &from, &to, part)?;
        Ok(FrameSpan {
            start_frame: range.start,
            end_frame: range.end,
        })
    }
}
