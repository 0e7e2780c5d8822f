//! Verbose diagnostics context.
//!
//! Decided once at start-up and passed by value into every operation.
//! It gates human-readable stderr output only and never changes behavior.

use std::fmt::Display;

/// Whether diagnostic output is enabled for this invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verbosity {
    enabled: bool,
}

impl Verbosity {
    pub const QUIET: Verbosity = Verbosity { enabled: false };
    pub const VERBOSE: Verbosity = Verbosity { enabled: true };

    /// Verbose if any source asks for it. Repeated requests are idempotent.
    pub fn from_sources(sources: &[bool]) -> Self {
        Self {
            enabled: sources.iter().any(|s| *s),
        }
    }

    pub fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Print a diagnostic line to stderr when enabled.
    pub fn emit(self, message: impl Display) {
        if self.is_enabled() {
            eprintln!("nvshim: {message}");
        }
    }

    /// Print a labelled argument group, one quoted token per entry.
    pub fn emit_group(self, label: &str, tokens: &[String]) {
        if self.is_enabled() {
            eprintln!("nvshim: {label}: {}", quote_all(tokens));
        }
    }
}

/// Render tokens as a readable, space-separated list.
pub fn quote_all(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| {
            if t.is_empty() || t.contains(char::is_whitespace) {
                format!("'{t}'")
            } else {
                t.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
