use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Environment variable overriding `toolchain.program`.
pub const ENV_PROGRAM: &str = "NVSHIM_NVCC";
/// Environment variable enabling verbose diagnostics.
pub const ENV_VERBOSE: &str = "NVSHIM_VERBOSE";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/nvshim/config.toml` on Unix,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("nvshim").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `NVSHIM_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, then re-validate.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(program) = lookup(ENV_PROGRAM) {
            self.toolchain.program = program;
        }
        if let Some(value) = lookup(ENV_VERBOSE) {
            self.verbose = parse_flag(&value);
        }
        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Program, language and passthrough options are non-empty
    /// - The source extension is non-empty and has no leading dot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("toolchain.program", &self.toolchain.program),
            ("toolchain.language", &self.toolchain.language),
            ("toolchain.source_extension", &self.toolchain.source_extension),
            ("passthrough.separator", &self.passthrough.separator),
            ("passthrough.compiler_flag", &self.passthrough.compiler_flag),
            ("passthrough.linker_flag", &self.passthrough.linker_flag),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: format!("'{name}' must not be empty"),
            });
        }

        if self.toolchain.source_extension.starts_with('.') {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "'toolchain.source_extension' must not start with a dot (got '{}')",
                    self.toolchain.source_extension
                ),
            });
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
