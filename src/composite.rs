//! Composition of rendered stills into tiles and animations.

use std::path::{Path, PathBuf};

use frameforge_av::actions::{stills_to_video, tile_stills, video_to_gif};
use frameforge_av::CommandRunner;

use crate::request::{RenderFormat, TileGrid};
use crate::workspace::RequestWorkspace;
use crate::{Error, Result};

/// Combines rendered stills into a tiled image or an animated sequence.
pub(crate) struct CompositeBuilder<'a> {
    pub runner: &'a dyn CommandRunner,
    pub ffmpeg: &'a Path,
    pub workspace: &'a RequestWorkspace,
}

impl CompositeBuilder<'_> {
    /// Compose stills into a single tiled image, left to right, top to
    /// bottom. A single still bypasses tiling and is returned untouched.
    pub fn tile(
        &self,
        stills: &[PathBuf],
        grid: Option<TileGrid>,
        format: RenderFormat,
    ) -> Result<Vec<u8>> {
        let count = stills.len();
        if count == 0 {
            return Err(Error::range("no stills to compose"));
        }
        if let Some(grid) = grid {
            if grid.capacity() < count as u64 {
                return Err(Error::range(format!(
                    "{}x{} grid cannot hold {} stills",
                    grid.cols, grid.rows, count
                )));
            }
        }
        if count == 1 {
            return Ok(std::fs::read(&stills[0])?);
        }

        let grid = grid.unwrap_or_else(|| TileGrid::auto(count));
        let pattern = self
            .workspace
            .artifact(&format!("still_%05d.{}", format.extension()));
        let output = self
            .workspace
            .artifact(&format!("tile.{}", format.extension()));
        tile_stills(
            self.runner,
            self.ffmpeg,
            &pattern,
            grid.cols,
            grid.rows,
            &output,
        )?;
        Ok(std::fs::read(output)?)
    }

    /// Compose the rendered stills into an animated artifact at `fps`.
    ///
    /// Stills are muxed into an intermediate video first; MP4 requests
    /// return it directly, GIF requests convert it with the two-pass
    /// palette graph.
    pub fn animate(&self, fps: f64, format: RenderFormat) -> Result<Vec<u8>> {
        if !(fps > 0.0) {
            return Err(Error::range(format!("invalid animation fps: {fps}")));
        }

        let pattern = self.workspace.artifact("still_%05d.png");
        let video = self.workspace.artifact("anim.mp4");
        stills_to_video(self.runner, self.ffmpeg, &pattern, fps, &video)?;

        match format {
            RenderFormat::Mp4 => Ok(std::fs::read(video)?),
            RenderFormat::Gif => {
                let palette = self.workspace.artifact("palette.png");
                let output = self.workspace.artifact("anim.gif");
                video_to_gif(self.runner, self.ffmpeg, &video, &palette, &output)?;
                Ok(std::fs::read(output)?)
            }
            other => Err(Error::range(format!("{other} is not an animated format"))),
        }
    }
}
