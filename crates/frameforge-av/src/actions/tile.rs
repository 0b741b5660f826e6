//! Tiled composition of rendered stills.

use std::path::Path;

use crate::command::{CommandRunner, ToolCommand};
use crate::Result;

/// Compose numbered stills into one image, left to right, top to bottom.
///
/// `pattern` is a printf-style path matching the stills (for example
/// `still_%05d.png`); the caller guarantees the grid holds them all.
pub fn tile_stills(
    runner: &dyn CommandRunner,
    ffmpeg: &Path,
    pattern: &Path,
    cols: u32,
    rows: u32,
    output: &Path,
) -> Result<()> {
    tracing::debug!("Tiling stills into a {}x{} grid -> {:?}", cols, rows, output);

    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.args(["-hide_banner", "-loglevel", "error", "-y"]);
    cmd.args(["-framerate", "1", "-i"]);
    cmd.arg(pattern.to_string_lossy());
    cmd.args(["-frames:v", "1", "-vf", &format!("tile={cols}x{rows}")]);
    cmd.arg(output.to_string_lossy());
    runner.run(&cmd)?;
    Ok(())
}
