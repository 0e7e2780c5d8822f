use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Print diagnostics for every invocation.
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub passthrough: PassthroughConfig,
}

/// The external compiler and what it expects from sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Program name or path, resolved through PATH (default: "nvcc").
    #[serde(default = "default_program")]
    pub program: String,
    /// Value passed to `-x` in compile mode (default: "cu").
    #[serde(default = "default_language")]
    pub language: String,
    /// Extension, without the dot, a source must carry (default: "cu").
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
}

/// How foreign flags are forwarded to the host compiler and linker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassthroughConfig {
    /// Joins the forwarded flags (default: ",").
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Option that forwards to the host compiler (default: "--compiler-options").
    #[serde(default = "default_compiler_flag")]
    pub compiler_flag: String,
    /// Option that forwards to the host linker (default: "--linker-options").
    #[serde(default = "default_linker_flag")]
    pub linker_flag: String,
}

fn default_program() -> String {
    "nvcc".to_string()
}

fn default_language() -> String {
    "cu".to_string()
}

fn default_source_extension() -> String {
    "cu".to_string()
}

fn default_separator() -> String {
    ",".to_string()
}

fn default_compiler_flag() -> String {
    "--compiler-options".to_string()
}

fn default_linker_flag() -> String {
    "--linker-options".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            toolchain: ToolchainConfig::default(),
            passthrough: PassthroughConfig::default(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            language: default_language(),
            source_extension: default_source_extension(),
        }
    }
}

impl Default for PassthroughConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            compiler_flag: default_compiler_flag(),
            linker_flag: default_linker_flag(),
        }
    }
}
