//! Frameforge-AV: external tool orchestration for the extraction engine.
//!
//! Everything that touches an external process lives here:
//!
//! - **Tool discovery**: [`ToolRegistry`] locates ffmpeg via `PATH` or a
//!   configured override
//! - **Invocation**: [`ToolCommand`] is a typed command descriptor and
//!   [`CommandRunner`] the executor seam; the production [`SystemRunner`]
//!   blocks on `std::process`, tests script their own runner
//! - **Actions**: argument construction for the remux, concat, still,
//!   tile, and animation pipelines
//! - **Timecode**: the pure frame-number to seek-string conversion
//!
//! Execution is synchronous throughout; callers launch one tool at a time
//! and wait for it.

pub mod actions;
pub mod command;
pub mod error;
pub mod testing;
pub mod timecode;
pub mod tools;

pub use command::{CommandRunner, SystemRunner, ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use timecode::frame_timecode;
pub use tools::{ToolInfo, ToolRegistry, ToolsConfig};
