//! Argument classifier — raw args → native / foreign / source partitions.

use crate::args::registry::{disposition_of, Disposition, FlagRule};
use crate::error::ShimError;
use crate::verbosity::Verbosity;

/// Result of classifying raw arguments.
///
/// Every input token lands in exactly one sequence, in input order. Values
/// of following-value flags sit right after their flag in `native`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyResult {
    /// Flags nvcc understands, with their values.
    pub native: Vec<String>,
    /// Flags forwarded opaquely to the host compiler.
    pub foreign: Vec<String>,
    /// Positional source file names.
    pub sources: Vec<String>,
}

impl ClassifyResult {
    /// Total number of tokens across all three sequences.
    pub fn len(&self) -> usize {
        self.native.len() + self.foreign.len() + self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify raw args against the rule table.
///
/// Fails with [`ShimError::DanglingValue`] when the last token is a flag
/// that needs a following value.
pub fn classify(
    raw_args: &[String],
    rules: &[FlagRule],
    verbosity: Verbosity,
) -> Result<ClassifyResult, ShimError> {
    let mut result = ClassifyResult::default();
    let mut expecting_value = false;

    for arg in raw_args {
        if expecting_value {
            // Taken verbatim, even if it looks like a flag (`-o -weird-name`).
            result.native.push(arg.clone());
            expecting_value = false;
            continue;
        }

        match disposition_of(rules, arg) {
            Disposition::Standalone | Disposition::InlineValue => {
                result.native.push(arg.clone());
            }
            Disposition::FollowingValue => {
                result.native.push(arg.clone());
                expecting_value = true;
            }
            Disposition::Foreign => result.foreign.push(arg.clone()),
            Disposition::Positional => result.sources.push(arg.clone()),
        }
    }

    if expecting_value {
        let flag = raw_args.last().cloned().unwrap_or_default();
        return Err(ShimError::DanglingValue { flag });
    }

    tracing::debug!(
        total = result.len(),
        native = result.native.len(),
        foreign = result.foreign.len(),
        sources = result.sources.len(),
        "classified arguments"
    );
    verbosity.emit_group("native flags", &result.native);
    verbosity.emit_group("foreign flags", &result.foreign);
    verbosity.emit_group("source files", &result.sources);

    Ok(result)
}
