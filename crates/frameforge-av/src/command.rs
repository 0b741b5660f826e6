//! Typed external command invocation.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Error, Result};

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit code, if the process terminated normally.
    pub code: Option<i32>,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A typed descriptor of one external tool invocation: executable plus
/// argument list, independent of how it is executed.
///
/// # Example
///
/// ```no_run
/// use frameforge_av::{CommandRunner, SystemRunner, ToolCommand};
///
/// # fn example() -> frameforge_av::Result<()> {
/// let mut cmd = ToolCommand::new("ffmpeg");
/// cmd.args(["-hide_banner", "-i"]).arg("/media/input.mp4");
/// let output = SystemRunner.run(&cmd)?;
/// println!("{}", output.stderr);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// The program path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The argument list, in order.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Short tool name used in error messages.
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }
}

/// Executes tool commands and maps failures to structured errors.
///
/// The engine depends on this trait rather than on `std::process` directly,
/// so orchestration can be exercised in tests without real binaries.
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the executable does not exist.
    /// - [`Error::ToolFailed`] if the process exits with a non-zero status;
    ///   the message carries the captured stderr.
    fn run(&self, command: &ToolCommand) -> Result<ToolOutput>;
}

/// Runner backed by `std::process::Command`; blocks until the tool exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        let tool = command.tool_name();
        tracing::debug!("Running {} {:?}", tool, command.arguments());

        let output = Command::new(command.program())
            .args(command.arguments())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(&tool)
                } else {
                    Error::Io(e)
                }
            })?;

        let result = ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            return Err(Error::tool_failed(
                &tool,
                format!(
                    "exited with status {}: {}",
                    output.status,
                    result.stderr.trim()
                ),
            ));
        }

        Ok(result)
    }
}
