//! Top-level extraction engine.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use frameforge_av::{CommandRunner, SystemRunner, ToolInfo, ToolRegistry, ToolsConfig};

use crate::clip::{ClipAssembler, ClipOutput};
use crate::composite::CompositeBuilder;
use crate::error_image::render_error_image;
use crate::frames::FrameRenderer;
use crate::request::{FrameRange, RenderRequest};
use crate::source::MediaSource;
use crate::workspace::RequestWorkspace;
use crate::Result;

/// Engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// External tool overrides.
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Partial-video retrieval and frame/clip extraction engine.
///
/// Synchronous throughout: external tools are launched and awaited one at a
/// time, nothing is shared across requests, and every request's temporary
/// artifacts live in a workspace destroyed on all exit paths.
pub struct Engine {
    registry: ToolRegistry,
    runner: Arc<dyn CommandRunner>,
}

impl Engine {
    /// Create an engine using the system process runner.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            registry: ToolRegistry::discover(&config.tools),
            runner: Arc::new(SystemRunner),
        }
    }

    /// Create an engine with a custom command runner; used by tests to
    /// script tool behavior.
    pub fn with_runner(config: &EngineConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            registry: ToolRegistry::discover(&config.tools),
            runner,
        }
    }

    /// Availability diagnostics for the external tools the engine drives.
    pub fn check_tools(&self) -> Vec<ToolInfo> {
        self.registry.check_all()
    }

    /// Assemble a clip covering `ranges` and move it to `dest`.
    ///
    /// Returns the clip path plus, per requested range, the
    /// fragment-aligned span actually materialized.
    pub fn extract_clip(
        &self,
        source: &MediaSource,
        ranges: &[FrameRange],
        dest: &Path,
    ) -> Result<ClipOutput> {
        let ffmpeg = self.registry.require("ffmpeg")?.to_path_buf();
        let workspace = RequestWorkspace::new()?;
        let assembler = ClipAssembler {
            runner: self.runner.as_ref(),
            ffmpeg: &ffmpeg,
            workspace: &workspace,
        };
        assembler.assemble(source, ranges, dest)
        // The workspace drops here, removing every temporary artifact.
    }

    /// Render the requested frames into a still, tile, or animation and
    /// return the encoded bytes.
    pub fn render(&self, source: &MediaSource, request: &RenderRequest) -> Result<Vec<u8>> {
        let ffmpeg = self.registry.require("ffmpeg")?.to_path_buf();
        let workspace = RequestWorkspace::new()?;

        // Animation pipelines assemble from lossless intermediates; still
        // requests render directly in their target format.
        let extension = if request.format.is_animated() {
            "png"
        } else {
            request.format.extension()
        };

        let renderer = FrameRenderer {
            runner: self.runner.as_ref(),
            ffmpeg: &ffmpeg,
            workspace: &workspace,
        };
        let stills = renderer.render(
            source,
            &request.frames,
            request.regions.as_deref(),
            request.scale,
            extension,
        )?;

        let builder = CompositeBuilder {
            runner: self.runner.as_ref(),
            ffmpeg: &ffmpeg,
            workspace: &workspace,
        };
        if request.format.is_animated() {
            let fps = request.fps.unwrap_or_else(|| source.fps());
            builder.animate(fps, request.format)
        } else {
            builder.tile(&stills, request.grid, request.format)
        }
    }

    /// Render, converting any failure into placeholder image bytes so
    /// graphic-producing call sites always return a valid image payload.
    pub fn render_or_placeholder(&self, source: &MediaSource, request: &RenderRequest) -> Vec<u8> {
        match self.render(source, request) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!("Render failed, returning placeholder: {err}");
                render_error_image(err.status(), &err.to_string(), request.format)
                    .unwrap_or_default()
            }
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}
