//! Frame rendering: batched frame-accurate still decoding.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use frameforge_av::actions::{render_still_batch, StillSpec};
use frameforge_av::{frame_timecode, CommandRunner};
use frameforge_media::{extract_segments, resolve_frame, ExtractedFragment};

use crate::request::RegionOfInterest;
use crate::source::MediaSource;
use crate::workspace::RequestWorkspace;
use crate::{Error, Result};

/// Upper bound on frames decoded by one external invocation, bounding the
/// argument list and fan-out of a single process.
pub(crate) const FRAMES_PER_BATCH: usize = 30;

/// Renders numbered stills for a list of frames, decoding from extracted
/// fragments when a segment index exists and from the whole source when not.
pub(crate) struct FrameRenderer<'a> {
    pub runner: &'a dyn CommandRunner,
    pub ffmpeg: &'a Path,
    pub workspace: &'a RequestWorkspace,
}

impl FrameRenderer<'_> {
    /// Render stills for `frames`, returning their paths in request order.
    ///
    /// Frames outside the indexed coverage are skipped (their region, if
    /// any, is dropped with them); rendering fails when every frame is
    /// skipped. Every batch must succeed; the first failing batch aborts
    /// the whole render.
    pub fn render(
        &self,
        source: &MediaSource,
        frames: &[u64],
        regions: Option<&[RegionOfInterest]>,
        scale: Option<(u32, u32)>,
        extension: &str,
    ) -> Result<Vec<PathBuf>> {
        if frames.is_empty() {
            return Err(Error::range("no frames requested"));
        }
        if let Some(regions) = regions {
            if regions.len() != frames.len() {
                return Err(Error::range(format!(
                    "{} regions for {} frames",
                    regions.len(),
                    frames.len()
                )));
            }
        }

        let mut fragments: HashMap<Vec<usize>, ExtractedFragment> = HashMap::new();
        let mut specs = Vec::with_capacity(frames.len());
        let mut stills = Vec::with_capacity(frames.len());
        let mut skipped = 0usize;

        for (i, &frame) in frames.iter().enumerate() {
            let (input, anchor) = match source.index() {
                Some(index) => {
                    let picks = resolve_frame(index, frame);
                    if picks.is_empty() {
                        tracing::debug!("Frame {} is outside the indexed coverage; skipped", frame);
                        skipped += 1;
                        continue;
                    }
                    if !fragments.contains_key(&picks) {
                        // Deterministic name keyed by the covered positions,
                        // so identical targets reuse one fragment.
                        let name =
                            format!("frag_{:05}_{:05}.mp4", picks[1], picks[picks.len() - 1]);
                        let extracted = extract_segments(
                            source.path(),
                            index,
                            &picks,
                            &self.workspace.artifact(&name),
                        )?;
                        fragments.insert(picks.clone(), extracted);
                    }
                    let fragment = &fragments[&picks];
                    (fragment.path.clone(), fragment.anchor_frame)
                }
                None => (source.path().to_path_buf(), 0),
            };

            // Seeks into a fragment are relative to its anchor frame, not
            // absolute media time.
            let seek = frame_timecode(frame.saturating_sub(anchor), source.fps());
            let crop = match regions {
                Some(regions) => Some(regions[i].to_crop(source.width(), source.height())?),
                None => None,
            };
            let output = self
                .workspace
                .artifact(&format!("still_{:05}.{extension}", stills.len()));
            specs.push(StillSpec {
                input,
                seek,
                crop,
                scale,
                output: output.clone(),
            });
            stills.push(output);
        }

        if stills.is_empty() {
            return Err(Error::range(
                "no requested frame falls inside the media coverage",
            ));
        }

        for batch in specs.chunks(FRAMES_PER_BATCH) {
            render_still_batch(self.runner, self.ffmpeg, batch)?;
        }

        tracing::debug!("Rendered {} stills ({} skipped)", stills.len(), skipped);
        Ok(stills)
    }
}
