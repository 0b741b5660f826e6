//! Stream-copy remux and concatenation.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::command::{CommandRunner, ToolCommand};
use crate::Result;

/// Remux a fragment into a directly concatenable transport stream.
///
/// Stream copy only; zero mux delay and preload so concatenated fragments
/// join without timestamp gaps.
pub fn remux_concat_ready(
    runner: &dyn CommandRunner,
    ffmpeg: &Path,
    input: &Path,
    output: &Path,
) -> Result<()> {
    tracing::debug!("Remuxing {:?} -> {:?}", input, output);

    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.args(["-hide_banner", "-loglevel", "error", "-y", "-i"]);
    cmd.arg(input.to_string_lossy());
    cmd.args(["-c", "copy", "-muxdelay", "0", "-muxpreload", "0"]);
    cmd.arg(output.to_string_lossy());
    runner.run(&cmd)?;
    Ok(())
}

/// Stream-copy a time window straight out of a source without an index.
///
/// `from` and `to` are seek strings as produced by
/// [`crate::timecode::frame_timecode`].
pub fn cut_stream_copy(
    runner: &dyn CommandRunner,
    ffmpeg: &Path,
    input: &Path,
    from: &str,
    to: &str,
    output: &Path,
) -> Result<()> {
    tracing::debug!("Cutting {:?} [{} .. {}] -> {:?}", input, from, to, output);

    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.args(["-hide_banner", "-loglevel", "error", "-y"]);
    cmd.args(["-ss", from, "-to", to, "-i"]);
    cmd.arg(input.to_string_lossy());
    cmd.args(["-c", "copy", "-muxdelay", "0", "-muxpreload", "0"]);
    cmd.arg(output.to_string_lossy());
    runner.run(&cmd)?;
    Ok(())
}

/// Concatenate remuxed fragments, in list order, with a stream copy.
///
/// Writes an ffconcat list at `list_path` naming every fragment, then runs
/// the concat demuxer over it.
pub fn concat_fragments(
    runner: &dyn CommandRunner,
    ffmpeg: &Path,
    fragments: &[PathBuf],
    list_path: &Path,
    output: &Path,
) -> Result<()> {
    let mut list = std::fs::File::create(list_path)?;
    for fragment in fragments {
        writeln!(list, "file '{}'", fragment.display())?;
    }
    list.flush()?;

    tracing::debug!(
        "Concatenating {} fragments -> {:?}",
        fragments.len(),
        output
    );

    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.args(["-hide_banner", "-loglevel", "error", "-y"]);
    cmd.args(["-f", "concat", "-safe", "0", "-i"]);
    cmd.arg(list_path.to_string_lossy());
    cmd.args(["-c", "copy"]);
    cmd.arg(output.to_string_lossy());
    runner.run(&cmd)?;
    Ok(())
}
