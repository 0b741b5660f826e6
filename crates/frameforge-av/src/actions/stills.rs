//! Frame-accurate still rendering.

use std::path::{Path, PathBuf};

use crate::command::{CommandRunner, ToolCommand};
use crate::Result;

/// Pixel crop rectangle, applied before any scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One frame to decode within a batch invocation.
#[derive(Debug, Clone)]
pub struct StillSpec {
    /// Input to decode from (extracted fragment or full source).
    pub input: PathBuf,
    /// Seek time within the input, `H:MM:SS.mmm`.
    pub seek: String,
    /// Optional pixel crop.
    pub crop: Option<CropRect>,
    /// Optional forced output size `(width, height)`.
    pub scale: Option<(u32, u32)>,
    /// Destination still path.
    pub output: PathBuf,
}

/// Decode every still in `batch` with a single ffmpeg invocation.
///
/// Each spec contributes one `-ss/-i` input and one mapped single-frame
/// output carrying its own filter chain, so a batch of N frames costs one
/// process launch, not N.
pub fn render_still_batch(
    runner: &dyn CommandRunner,
    ffmpeg: &Path,
    batch: &[StillSpec],
) -> Result<()> {
    if batch.is_empty() {
        return Ok(());
    }

    tracing::debug!("Rendering batch of {} stills", batch.len());

    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.args(["-hide_banner", "-loglevel", "error", "-y"]);
    for spec in batch {
        cmd.args(["-ss", &spec.seek, "-i"]);
        cmd.arg(spec.input.to_string_lossy());
    }
    for (i, spec) in batch.iter().enumerate() {
        cmd.args(["-map", &format!("{i}:v:0")]);
        if let Some(filter) = filter_chain(spec) {
            cmd.args(["-vf", &filter]);
        }
        cmd.args(["-frames:v", "1"]);
        cmd.arg(spec.output.to_string_lossy());
    }
    runner.run(&cmd)?;
    Ok(())
}

fn filter_chain(spec: &StillSpec) -> Option<String> {
    let mut filters = Vec::new();
    if let Some(c) = spec.crop {
        filters.push(format!("crop={}:{}:{}:{}", c.width, c.height, c.x, c.y));
    }
    if let Some((w, h)) = spec.scale {
        filters.push(format!("scale={w}:{h}"));
    }
    if filters.is_empty() {
        None
    } else {
        Some(filters.join(","))
    }
}
