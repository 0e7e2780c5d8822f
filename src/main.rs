use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use nvshim::config::Config;
use nvshim::driver::{Driver, DriverSettings, InvocationMode, Nvcc};
use nvshim::logging::init_tracing;
use nvshim::verbosity::Verbosity;
use nvshim::ShimError;

/// Run nvcc behind a gcc-style compiler command line.
#[derive(Parser, Debug)]
#[command(name = "nvshim", version)]
struct Cli {
    /// Print classified arguments, removed files and the final nvcc command
    #[arg(short, long)]
    verbose: bool,

    /// Config file to use instead of ~/.config/nvshim/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    mode: ModeCommand,
}

#[derive(Subcommand, Debug)]
enum ModeCommand {
    /// Compile sources given a gcc-style compile command line
    #[command(disable_help_flag = true)]
    Compile {
        /// gcc-style arguments, taken verbatim (a leading `--` is not forwarded)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Link objects given a gcc-style link command line
    #[command(disable_help_flag = true)]
    Link {
        /// gcc-style arguments, taken verbatim (a leading `--` is not forwarded)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl ModeCommand {
    /// The parser treats a `--` right after the mode name as its own
    /// separator, so `nvshim compile -- -c a.c` forwards `-c a.c`. Later
    /// `--` tokens reach the classifier unchanged.
    fn into_parts(self) -> (InvocationMode, Vec<String>) {
        match self {
            ModeCommand::Compile { args } => (InvocationMode::Compile, args),
            ModeCommand::Link { args } => (InvocationMode::Link, args),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<ShimError>()
                .map(ShimError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded
        .context("failed to load configuration")?
        .with_env_overrides()
        .context("invalid environment override")?;

    let verbosity = Verbosity::from_sources(&[cli.verbose, config.verbose]);
    let driver = Driver::new(
        Nvcc::new(config.toolchain.program.clone()),
        DriverSettings::from(&config),
        verbosity,
    );

    let (mode, args) = cli.mode.into_parts();
    driver.run(mode, &args)?;
    Ok(())
}
