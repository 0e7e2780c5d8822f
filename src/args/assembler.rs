//! Argument assembler — builds the nvcc command line in one place.

/// Builder for the argument vector passed to the external compiler.
///
/// Call order is output order: language, passthrough, native, sources.
#[derive(Debug, Clone, Default)]
pub struct ArgAssembler {
    args: Vec<String>,
}

impl ArgAssembler {
    /// Start with an empty arg list.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Force the source language (`-x cu`). `None` leaves it to the tool.
    pub fn with_language(mut self, language: Option<&str>) -> Self {
        if let Some(lang) = language {
            self.args.push("-x".into());
            self.args.push(lang.into());
        }
        self
    }

    /// Fold foreign flags into one passthrough option, if there are any.
    pub fn with_passthrough(mut self, flag: &str, foreign: &[String], separator: &str) -> Self {
        self.args.extend(passthrough_flag(flag, foreign, separator));
        self
    }

    /// Flags nvcc understands, unchanged and in order.
    pub fn with_native(mut self, native: &[String]) -> Self {
        self.args.extend(native.iter().cloned());
        self
    }

    /// Source file names (possibly coerced siblings).
    pub fn with_sources(mut self, sources: &[String]) -> Self {
        self.args.extend(sources.iter().cloned());
        self
    }

    /// Build the final argument list.
    pub fn build(self) -> Vec<String> {
        self.args
    }
}

/// `--compiler-options=-Wall,-std=c99` for foreign `["-Wall", "-std=c99"]`.
///
/// Returns `None` when there is nothing to forward. Foreign flags that
/// themselves contain the separator (`-Wl,-rpath,x`) are split by nvcc.
pub fn passthrough_flag(flag: &str, foreign: &[String], separator: &str) -> Option<String> {
    if foreign.is_empty() {
        return None;
    }
    Some(format!("{flag}={}", foreign.join(separator)))
}
