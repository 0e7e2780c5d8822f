//! Invocation driver — classify, coerce, assemble, invoke, clean up.
//!
//! Coerced siblings are held by a scope guard for the whole invocation, so
//! they are removed on every exit path: success, a failed coercion of a
//! later source, or a failed compiler run. Removal problems are logged and
//! never replace the error being returned.

mod toolchain;

use std::path::Path;

use crate::args::{classify, flag_rules, ArgAssembler, ClassifyResult, FlagRule};
use crate::coerce::{has_extension, CoercedFiles};
use crate::config::Config;
use crate::error::ShimError;
use crate::verbosity::Verbosity;

pub use toolchain::{invoke, Nvcc, Outcome, Toolchain};

/// Which stage of the build the shim stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// `cc -c foo.c ...`: sources are compiled as the target language.
    Compile,
    /// `cc -shared foo.o ...`: no coercion, host options go to the linker.
    Link,
}

/// Translation settings, derived from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSettings {
    /// Value of the `-x` flag in compile mode.
    pub language: String,
    /// Extension a source must carry to be left alone.
    pub source_extension: String,
    /// Joins foreign flags inside the passthrough option.
    pub separator: String,
    /// Passthrough option for compile mode.
    pub compiler_flag: String,
    /// Passthrough option for link mode.
    pub linker_flag: String,
}

impl From<&Config> for DriverSettings {
    fn from(config: &Config) -> Self {
        Self {
            language: config.toolchain.language.clone(),
            source_extension: config.toolchain.source_extension.clone(),
            separator: config.passthrough.separator.clone(),
            compiler_flag: config.passthrough.compiler_flag.clone(),
            linker_flag: config.passthrough.linker_flag.clone(),
        }
    }
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

pub struct Driver<T: Toolchain> {
    toolchain: T,
    settings: DriverSettings,
    rules: Vec<FlagRule>,
    verbosity: Verbosity,
}

impl<T: Toolchain> Driver<T> {
    pub fn new(toolchain: T, settings: DriverSettings, verbosity: Verbosity) -> Self {
        Self {
            toolchain,
            settings,
            rules: flag_rules(),
            verbosity,
        }
    }

    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// Dispatch on `mode`.
    pub fn run(&self, mode: InvocationMode, raw_args: &[String]) -> Result<(), ShimError> {
        tracing::debug!(?mode, count = raw_args.len(), "shim invocation");
        match mode {
            InvocationMode::Compile => self.compile(raw_args),
            InvocationMode::Link => self.link(raw_args),
        }
    }

    /// Compile `raw_args` as a gcc-style compile line.
    pub fn compile(&self, raw_args: &[String]) -> Result<(), ShimError> {
        let classified = self.prepare(raw_args)?;
        let extension = self.settings.source_extension.as_str();

        let verbosity = self.verbosity;
        let mut coerced = scopeguard::guard(CoercedFiles::new(), move |mut files| {
            files.remove_all(verbosity);
        });

        let mut sources = Vec::with_capacity(classified.sources.len());
        for source in &classified.sources {
            let path = Path::new(source);
            if has_extension(path, extension) {
                sources.push(source.clone());
            } else {
                let sibling = coerced.acquire(path, extension)?;
                sources.push(sibling.to_string_lossy().into_owned());
            }
        }

        let args = ArgAssembler::new()
            .with_language(Some(self.settings.language.as_str()))
            .with_passthrough(
                &self.settings.compiler_flag,
                &classified.foreign,
                &self.settings.separator,
            )
            .with_native(&classified.native)
            .with_sources(&sources)
            .build();

        invoke(&self.toolchain, &args, self.verbosity)
    }

    /// Link `raw_args` as a gcc-style link line.
    pub fn link(&self, raw_args: &[String]) -> Result<(), ShimError> {
        let classified = self.prepare(raw_args)?;

        let args = ArgAssembler::new()
            .with_passthrough(
                &self.settings.linker_flag,
                &classified.foreign,
                &self.settings.separator,
            )
            .with_native(&classified.native)
            .with_sources(&classified.sources)
            .build();

        invoke(&self.toolchain, &args, self.verbosity)
    }

    fn prepare(&self, raw_args: &[String]) -> Result<ClassifyResult, ShimError> {
        if raw_args.is_empty() {
            return Err(ShimError::NoArguments);
        }
        let classified = classify(raw_args, &self.rules, self.verbosity)?;
        if classified.sources.is_empty() {
            return Err(ShimError::NoSourceFiles);
        }
        Ok(classified)
    }
}
