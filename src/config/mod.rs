//! Configuration: TOML file, environment overrides, validation.

mod loader;
mod types;

pub use loader::{ConfigError, ENV_PROGRAM, ENV_VERBOSE};
pub use types::{Config, PassthroughConfig, ToolchainConfig};
