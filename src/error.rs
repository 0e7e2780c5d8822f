//! Error taxonomy for a single shim invocation.
//!
//! Every variant is fatal to the current invocation. Nothing is retried;
//! the only internal recovery is the strategy fallback inside coercion.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a sibling file could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionReason {
    /// A file already occupies the sibling path.
    AlreadyExists,
    /// Every strategy failed for some other reason.
    Unknown,
}

impl fmt::Display for CoercionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionReason::AlreadyExists => f.write_str("already exists"),
            CoercionReason::Unknown => f.write_str("unknown"),
        }
    }
}

/// Errors that can occur while translating and running a compile or link.
#[derive(Debug, Error)]
pub enum ShimError {
    /// The invocation received zero arguments.
    #[error("no arguments given")]
    NoArguments,

    /// Classification found no positional source files.
    #[error("no source files given")]
    NoSourceFiles,

    /// The last token is a flag that needs a following value.
    #[error("flag '{flag}' requires a value but none was given")]
    DanglingValue { flag: String },

    /// A sibling file with the required extension could not be created.
    #[error("cannot create '{}' from '{}': {reason}", .target.display(), .path.display())]
    Coercion {
        path: PathBuf,
        target: PathBuf,
        reason: CoercionReason,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The external compiler is not reachable on the search path.
    #[error("'{tool}' not found; make sure it is installed and on PATH")]
    ToolNotFound { tool: String },

    /// The external compiler ran and rejected its input.
    #[error("'{tool}' failed ({})", describe_code(.code))]
    ToolInvocation { tool: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl ShimError {
    /// Process exit code to report for this error.
    ///
    /// A rejected compile keeps the compiler's own status so build tools see
    /// the same code they would have seen without the shim.
    pub fn exit_code(&self) -> u8 {
        match self {
            ShimError::ToolInvocation {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}
