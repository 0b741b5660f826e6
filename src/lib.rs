//! Frameforge - partial-video retrieval and frame/clip extraction engine.
//!
//! Given a large video file and a side-car segment index describing its
//! fragmented structure, the engine locates exactly the byte ranges needed
//! to satisfy a request for frames, clips, or composites without touching
//! the rest of the file, then drives external decode/encode tools to
//! materialize the result:
//!
//! - [`Engine::extract_clip`] stitches fragments covering one or more frame
//!   ranges into a playable clip via stream-copy remux and concatenation
//! - [`Engine::render`] decodes stills (optionally cropped and scaled) and
//!   composes them into a single image, a tiled contact sheet, or an
//!   animated GIF/MP4
//! - [`Engine::render_or_placeholder`] additionally converts failures into
//!   placeholder error images for call sites that must return image bytes
//!
//! Sources without an index fall back to whole-file access. Execution is
//! synchronous and request-scoped: segment indexes are immutable once
//! built, and every temporary artifact lives in a per-request workspace
//! removed on all exit paths.

pub mod clip;
mod composite;
pub mod engine;
pub mod error;
pub mod error_image;
mod frames;
pub mod request;
pub mod source;
pub mod workspace;

pub use clip::{ClipOutput, FrameSpan};
pub use engine::{Engine, EngineConfig};
pub use error::{Error, Result};
pub use error_image::render_error_image;
pub use request::{FrameRange, RegionOfInterest, RenderFormat, RenderRequest, TileGrid};
pub use source::{MediaDescriptor, MediaSource};
pub use workspace::RequestWorkspace;
