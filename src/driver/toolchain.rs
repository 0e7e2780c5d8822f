//! External compiler invocation.

use std::io;
use std::process::{Command, Stdio};

use crate::error::ShimError;
use crate::verbosity::{quote_all, Verbosity};

/// How a finished tool run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Non-zero exit; `None` when killed by a signal.
    Failed { code: Option<i32> },
}

/// Seam between the driver and the real compiler process.
pub trait Toolchain {
    /// Name used in diagnostics and errors.
    fn name(&self) -> &str;

    /// Run the tool with `args` and wait for it. Stdio is inherited.
    fn execute(&self, args: &[String]) -> io::Result<Outcome>;

    /// Whether the tool can be reached at all.
    ///
    /// Only consulted after a failed run.
    fn is_reachable(&self) -> bool;
}

/// nvcc (or a stand-in) found through the executable search path.
#[derive(Debug, Clone)]
pub struct Nvcc {
    program: String,
}

impl Nvcc {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Toolchain for Nvcc {
    fn name(&self) -> &str {
        &self.program
    }

    fn execute(&self, args: &[String]) -> io::Result<Outcome> {
        let status = Command::new(&self.program).args(args).status()?;
        Ok(if status.success() {
            Outcome::Success
        } else {
            Outcome::Failed {
                code: status.code(),
            }
        })
    }

    fn is_reachable(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

/// Run `tool` with `args`, turning any failure into a [`ShimError`].
///
/// On failure the tool is probed once to tell "not installed" apart from
/// "rejected the input". The success path spawns exactly one process.
pub fn invoke(tool: &dyn Toolchain, args: &[String], verbosity: Verbosity) -> Result<(), ShimError> {
    verbosity.emit(format_args!("running: {} {}", tool.name(), quote_all(args)));
    tracing::info!(tool = tool.name(), args = ?args, "invoking external compiler");

    let code = match tool.execute(args) {
        Ok(Outcome::Success) => return Ok(()),
        Ok(Outcome::Failed { code }) => code,
        Err(e) => {
            tracing::debug!(tool = tool.name(), error = %e, "failed to spawn");
            None
        }
    };

    if tool.is_reachable() {
        Err(ShimError::ToolInvocation {
            tool: tool.name().to_string(),
            code,
        })
    } else {
        Err(ShimError::ToolNotFound {
            tool: tool.name().to_string(),
        })
    }
}
