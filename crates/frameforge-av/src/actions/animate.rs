//! Animated composition of rendered stills.

use std::path::Path;

use crate::command::{CommandRunner, ToolCommand};
use crate::Result;

/// Mux numbered stills into an intermediate video at the given frame rate.
pub fn stills_to_video(
    runner: &dyn CommandRunner,
    ffmpeg: &Path,
    pattern: &Path,
    fps: f64,
    output: &Path,
) -> Result<()> {
    tracing::debug!("Muxing stills at {} fps -> {:?}", fps, output);

    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.args(["-hide_banner", "-loglevel", "error", "-y"]);
    cmd.args(["-framerate", &fps.to_string(), "-i"]);
    cmd.arg(pattern.to_string_lossy());
    cmd.args(["-pix_fmt", "yuv420p"]);
    cmd.arg(output.to_string_lossy());
    runner.run(&cmd)?;
    Ok(())
}

/// Convert an intermediate video into an animated GIF.
///
/// Two passes: generate a palette from the whole video, then apply it, so
/// the quantization does not degrade frame by frame.
pub fn video_to_gif(
    runner: &dyn CommandRunner,
    ffmpeg: &Path,
    video: &Path,
    palette: &Path,
    output: &Path,
) -> Result<()> {
    tracing::debug!("Converting {:?} to animated GIF {:?}", video, output);

    let mut generate = ToolCommand::new(ffmpeg);
    generate.args(["-hide_banner", "-loglevel", "error", "-y", "-i"]);
    generate.arg(video.to_string_lossy());
    generate.args(["-vf", "palettegen"]);
    generate.arg(palette.to_string_lossy());
    runner.run(&generate)?;

    let mut apply = ToolCommand::new(ffmpeg);
    apply.args(["-hide_banner", "-loglevel", "error", "-y", "-i"]);
    apply.arg(video.to_string_lossy());
    apply.arg("-i");
    apply.arg(palette.to_string_lossy());
    apply.args(["-lavfi", "paletteuse"]);
    apply.arg(output.to_string_lossy());
    runner.run(&apply)?;
    Ok(())
}
