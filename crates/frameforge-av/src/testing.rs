//! Test support: a scripted command runner.
//!
//! Lets the extraction pipeline be exercised without real external binaries:
//! every invocation is recorded for inspection, failures can be injected at
//! a chosen ordinal, and output files can be materialized so downstream
//! stages find the artifacts they expect.

use std::sync::Mutex;

use crate::command::{CommandRunner, ToolCommand, ToolOutput};
use crate::{Error, Result};

/// File extensions the runner treats as tool outputs when asked to
/// materialize them.
const OUTPUT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "mp4", "ts"];

/// A [`CommandRunner`] that records invocations instead of spawning them.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<ToolCommand>>,
    fail_on: Option<usize>,
    touch_outputs: bool,
}

impl ScriptedRunner {
    /// Runner where every invocation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that fails the invocation with the given 0-based ordinal.
    pub fn failing_call(ordinal: usize) -> Self {
        Self {
            fail_on: Some(ordinal),
            ..Self::default()
        }
    }

    /// Runner that creates an empty file for every output-looking argument,
    /// so callers that read artifacts back find them on disk.
    pub fn touching_outputs() -> Self {
        Self {
            touch_outputs: true,
            ..Self::default()
        }
    }

    /// Runner that both materializes outputs and fails a chosen invocation.
    pub fn touching_outputs_failing_call(ordinal: usize) -> Self {
        Self {
            fail_on: Some(ordinal),
            touch_outputs: true,
            ..Self::default()
        }
    }

    /// Every recorded invocation, in order.
    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().expect("runner lock poisoned").clone()
    }

    /// Number of recorded invocations.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("runner lock poisoned").len()
    }
}

fn looks_like_output(arg: &str) -> bool {
    std::path::Path::new(arg)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| OUTPUT_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        let ordinal = {
            let mut calls = self.calls.lock().expect("runner lock poisoned");
            calls.push(command.clone());
            calls.len() - 1
        };

        if self.fail_on == Some(ordinal) {
            return Err(Error::tool_failed(command.tool_name(), "scripted failure"));
        }

        if self.touch_outputs {
            let args = command.arguments();
            for (i, arg) in args.iter().enumerate() {
                // Arguments following -i are inputs, everything else with a
                // media extension is an output to materialize.
                let is_input = i > 0 && args[i - 1] == "-i";
                if !is_input && looks_like_output(arg) {
                    let _ = std::fs::write(arg, b"");
                }
            }
        }

        Ok(ToolOutput {
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}
