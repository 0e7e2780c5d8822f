//! Source file extension coercion.
//!
//! nvcc decides how to treat a file from its extension, so `foo.c` is
//! exposed as a sibling `foo.cu` for the duration of one invocation.
//!
//! Strategies are tried in order: symlink, hard link, copy. The two link
//! strategies pass the original's *base name* as the link target, which
//! is right for the symlink (resolved from the link's own directory) but
//! resolved from the current directory for the hard link. Copy uses the
//! full original path. When the base name does not resolve, the hard
//! link fails and copy takes over.

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CoercionReason, ShimError};
use crate::verbosity::Verbosity;

/// How a sibling file was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Symlink,
    HardLink,
    Copy,
}

impl Strategy {
    /// Preference order.
    pub const ALL: [Strategy; 3] = [Strategy::Symlink, Strategy::HardLink, Strategy::Copy];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Symlink => f.write_str("symlink"),
            Strategy::HardLink => f.write_str("hard link"),
            Strategy::Copy => f.write_str("copy"),
        }
    }
}

/// A sibling created for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercedFile {
    pub original: PathBuf,
    pub sibling: PathBuf,
    pub strategy: Strategy,
}

/// Whether `path` already carries `extension` (no leading dot).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension() == Some(OsStr::new(extension))
}

/// `dir/foo.c` → `dir/foo.cu`; `dir/foo` → `dir/foo.cu`.
pub fn sibling_path(path: &Path, extension: &str) -> PathBuf {
    path.with_extension(extension)
}

/// Create the sibling of `path` with `extension`.
pub fn coerce(path: &Path, extension: &str) -> Result<CoercedFile, ShimError> {
    let sibling = sibling_path(path, extension);

    // A symlink to a missing file would succeed and leave a dangling link.
    if let Err(e) = fs::metadata(path) {
        return Err(ShimError::Coercion {
            path: path.to_path_buf(),
            target: sibling,
            reason: CoercionReason::Unknown,
            source: Some(e),
        });
    }

    let mut last_err = None;

    for strategy in Strategy::ALL {
        match attempt(strategy, path, &sibling) {
            Ok(()) => {
                tracing::debug!(
                    original = %path.display(),
                    sibling = %sibling.display(),
                    %strategy,
                    "coerced source file"
                );
                return Ok(CoercedFile {
                    original: path.to_path_buf(),
                    sibling,
                    strategy,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(ShimError::Coercion {
                    path: path.to_path_buf(),
                    target: sibling,
                    reason: CoercionReason::AlreadyExists,
                    source: Some(e),
                });
            }
            Err(e) => {
                tracing::trace!(%strategy, error = %e, "coercion strategy failed");
                last_err = Some(e);
            }
        }
    }

    Err(ShimError::Coercion {
        path: path.to_path_buf(),
        target: sibling,
        reason: CoercionReason::Unknown,
        source: last_err,
    })
}

fn attempt(strategy: Strategy, original: &Path, sibling: &Path) -> io::Result<()> {
    match strategy {
        Strategy::Symlink => symlink(base_name(original)?, sibling),
        Strategy::HardLink => fs::hard_link(base_name(original)?, sibling),
        Strategy::Copy => {
            if fs::symlink_metadata(sibling).is_ok() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists", sibling.display()),
                ));
            }
            fs::copy(original, sibling).map(|_| ())
        }
    }
}

fn base_name(path: &Path) -> io::Result<&Path> {
    path.file_name().map(Path::new).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        )
    })
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(not(any(unix, windows)))]
fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ))
}

/// Siblings created during one invocation, removed together afterwards.
#[derive(Debug, Default)]
pub struct CoercedFiles {
    files: Vec<CoercedFile>,
}

impl CoercedFiles {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Sibling path for `original`, creating it on first request.
    ///
    /// A source listed twice is coerced once.
    pub fn acquire(&mut self, original: &Path, extension: &str) -> Result<&Path, ShimError> {
        let index = match self.files.iter().position(|f| f.original == original) {
            Some(index) => index,
            None => {
                self.files.push(coerce(original, extension)?);
                self.files.len() - 1
            }
        };
        Ok(&self.files[index].sibling)
    }

    pub fn files(&self) -> &[CoercedFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Remove every sibling. Failures are logged and returned, never raised.
    pub fn remove_all(&mut self, verbosity: Verbosity) -> Vec<(PathBuf, io::Error)> {
        let mut failures = Vec::new();
        for file in self.files.drain(..) {
            verbosity.emit(format_args!("removing {}", file.sibling.display()));
            if let Err(e) = fs::remove_file(&file.sibling) {
                tracing::warn!(
                    sibling = %file.sibling.display(),
                    error = %e,
                    "failed to remove coerced file"
                );
                verbosity.emit(format_args!(
                    "failed to remove {}: {e}",
                    file.sibling.display()
                ));
                failures.push((file.sibling, e));
            }
        }
        failures
    }
}
