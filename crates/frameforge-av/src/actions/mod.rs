//! ffmpeg invocation builders for the extraction pipeline.
//!
//! Each action builds one [`crate::ToolCommand`] (or a short fixed sequence)
//! and hands it to the caller's [`crate::CommandRunner`]. Nothing here
//! inspects tool output beyond the exit status; argument construction is the
//! testable surface.

mod animate;
mod remux;
mod stills;
mod tile;

pub use animate::{stills_to_video, video_to_gif};
pub use remux::{concat_fragments, cut_stream_copy, remux_concat_ready};
pub use stills::{render_still_batch, CropRect, StillSpec};
pub use tile::tile_stills;
