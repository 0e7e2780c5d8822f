//! File-only diagnostics.
//!
//! Build tools parse what the compiler prints, so tracing never writes to
//! stdout or stderr. Setting `NVSHIM_LOG=/some/base` turns it on; every
//! process then writes `/some/base.<unix-secs>.<pid>`, which keeps the
//! shims of a parallel build out of each other's files. `RUST_LOG` filters
//! as usual and defaults to `info`.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Environment variable naming the log file base path.
pub const ENV_LOG: &str = "NVSHIM_LOG";

/// Install the file subscriber if `NVSHIM_LOG` is set.
pub fn init_tracing() {
    let Some(base) = log_base(std::env::var_os(ENV_LOG)) else {
        return;
    };
    let path = log_file_path(&base, SystemTime::now(), std::process::id());

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("nvshim: warning: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_timer(UtcTime::rfc_3339())
        .try_init();

    if let Err(e) = installed {
        eprintln!("nvshim: warning: logging disabled: {e}");
    }
}

/// An unset or empty variable disables logging.
fn log_base(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// `base` with `.<unix-secs>.<pid>` appended to its file name.
pub fn log_file_path(base: &Path, started: SystemTime, pid: u32) -> PathBuf {
    let secs = started
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = base.as_os_str().to_os_string();
    name.push(format!(".{secs}.{pid}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_value_disables() {
        assert_eq!(log_base(None), None);
        assert_eq!(log_base(Some(OsString::new())), None);
        assert_eq!(
            log_base(Some(OsString::from("/tmp/nvshim.log"))),
            Some(PathBuf::from("/tmp/nvshim.log"))
        );
    }

    #[test]
    fn file_name_carries_time_and_pid() {
        let started = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(
            log_file_path(Path::new("/tmp/nvshim.log"), started, 4242),
            PathBuf::from("/tmp/nvshim.log.1700000000.4242")
        );
    }

    #[test]
    fn clock_before_epoch_uses_zero() {
        let started = UNIX_EPOCH - Duration::from_secs(5);
        assert_eq!(
            log_file_path(Path::new("log"), started, 1),
            PathBuf::from("log.0.1")
        );
    }
}
