//! Unified error taxonomy for the extraction engine.
//!
//! All failures funnel into [`Error`], which carries enough context for the
//! surrounding request layer to derive a transport status via
//! [`Error::status`]. The member crates keep their own richer error types;
//! conversions collapse them into the four categories the engine exposes.

/// Result alias using the engine-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the extraction engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or structurally inconsistent segment index or media
    /// descriptor.
    #[error("format error: {0}")]
    Format(String),

    /// Requested frames, grid, or region fall entirely outside what the
    /// media can satisfy.
    #[error("range error: {0}")]
    Range(String),

    /// An external decode/encode/remux/concat/tile invocation failed.
    #[error("tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Captured diagnostic output.
        message: String,
    },

    /// The source could not be opened or mapped, or a temporary artifact
    /// could not be written.
    #[error("resource error: {0}")]
    Resource(String),
}

impl Error {
    /// Map this error to a transport status for the surrounding request
    /// layer (and for placeholder error images).
    pub fn status(&self) -> u16 {
        match self {
            Error::Format(_) => 400,
            Error::Range(_) => 416,
            Error::Tool { .. } => 502,
            Error::Resource(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::Format`].
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// Convenience constructor for [`Error::Range`].
    pub fn range(msg: impl Into<String>) -> Self {
        Error::Range(msg.into())
    }

    /// Convenience constructor for [`Error::Resource`].
    pub fn resource(msg: impl Into<String>) -> Self {
        Error::Resource(msg.into())
    }
}

impl From<frameforge_media::Error> for Error {
    fn from(err: frameforge_media::Error) -> Self {
        match err {
            frameforge_media::Error::Io(e) => Error::Resource(e.to_string()),
            other => Error::Format(other.to_string()),
        }
    }
}

impl From<frameforge_av::Error> for Error {
    fn from(err: frameforge_av::Error) -> Self {
        match err {
            frameforge_av::Error::ToolNotFound { tool } => Error::Tool {
                tool,
                message: "not found; is it installed and in PATH?".to_string(),
            },
            frameforge_av::Error::ToolFailed { tool, message } => Error::Tool { tool, message },
            frameforge_av::Error::Io(e) => Error::Resource(e.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Resource(err.to_string())
    }
}
