//! Shared test utilities and a recording toolchain.

#![allow(dead_code, unused_imports)]

use std::cell::{Cell, RefCell};
use std::io;
use std::path::{Path, PathBuf};

use nvshim::driver::{Driver, DriverSettings, Outcome, Toolchain};
use nvshim::verbosity::Verbosity;
use tempfile::TempDir;

pub fn raw(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Create `name` with `content` inside `dir`, returning its full path as a string.
pub fn write_source(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write source file");
    path.to_string_lossy().into_owned()
}

/// Names of the regular files and links in `dir`, sorted.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// What the fake tool does when executed.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Succeed,
    Fail(i32),
    SpawnError,
}

/// Toolchain that records calls instead of spawning a process.
pub struct FakeTool {
    behavior: Behavior,
    reachable: bool,
    pub calls: RefCell<Vec<Vec<String>>>,
    pub probes: Cell<usize>,
    /// `(arg, content)` for every argument naming an existing file at execute time.
    pub seen_files: RefCell<Vec<(String, String)>>,
}

impl FakeTool {
    pub fn new(behavior: Behavior, reachable: bool) -> Self {
        Self {
            behavior,
            reachable,
            calls: RefCell::new(Vec::new()),
            probes: Cell::new(0),
            seen_files: RefCell::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(Behavior::Succeed, true)
    }

    pub fn last_call(&self) -> Vec<String> {
        self.calls.borrow().last().cloned().expect("tool was not called")
    }
}

impl Toolchain for FakeTool {
    fn name(&self) -> &str {
        "fake-nvcc"
    }

    fn execute(&self, args: &[String]) -> io::Result<Outcome> {
        self.calls.borrow_mut().push(args.to_vec());
        for arg in args {
            if let Ok(content) = std::fs::read_to_string(arg) {
                self.seen_files.borrow_mut().push((arg.clone(), content));
            }
        }
        match self.behavior {
            Behavior::Succeed => Ok(Outcome::Success),
            Behavior::Fail(code) => Ok(Outcome::Failed { code: Some(code) }),
            Behavior::SpawnError => Err(io::Error::new(io::ErrorKind::NotFound, "no such tool")),
        }
    }

    fn is_reachable(&self) -> bool {
        self.probes.set(self.probes.get() + 1);
        self.reachable
    }
}

pub fn driver(tool: FakeTool) -> Driver<FakeTool> {
    Driver::new(tool, DriverSettings::default(), Verbosity::QUIET)
}

pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn sibling(source: &str) -> PathBuf {
    Path::new(source).with_extension("cu")
}
