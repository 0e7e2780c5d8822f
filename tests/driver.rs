//! Tests for the compile and link drivers against a recording toolchain.

mod common;

use std::path::Path;

use common::*;
use nvshim::driver::{Driver, DriverSettings, InvocationMode};
use nvshim::verbosity::Verbosity;
use nvshim::{CoercionReason, ShimError};

// -- argument errors ---------------------------------------------------------

#[test]
fn compile_without_arguments() {
    let driver = driver(FakeTool::succeeding());
    let err = driver.compile(&[]).unwrap_err();
    assert!(matches!(err, ShimError::NoArguments));
    assert!(driver.toolchain().calls.borrow().is_empty());
}

#[test]
fn link_without_arguments() {
    let driver = driver(FakeTool::succeeding());
    assert!(matches!(driver.link(&[]), Err(ShimError::NoArguments)));
}

#[test]
fn compile_without_sources_spawns_nothing() {
    let driver = driver(FakeTool::succeeding());
    let err = driver.compile(&raw(&["-c", "-O2", "-Wall"])).unwrap_err();
    assert!(matches!(err, ShimError::NoSourceFiles));
    assert!(driver.toolchain().calls.borrow().is_empty());
    assert_eq!(driver.toolchain().probes.get(), 0);
}

#[test]
fn dangling_value_spawns_nothing() {
    let driver = driver(FakeTool::succeeding());
    let err = driver.compile(&raw(&["k.cu", "-o"])).unwrap_err();
    assert!(matches!(err, ShimError::DanglingValue { .. }));
    assert!(driver.toolchain().calls.borrow().is_empty());
}

// -- compile mode ------------------------------------------------------------

#[test]
fn compile_coerces_and_cleans_up() {
    let dir = temp_dir();
    let source = write_source(dir.path(), "kernel.c", "__global__ void k() {}\n");
    let object = dir.path().join("kernel.o").to_string_lossy().into_owned();
    let driver = driver(FakeTool::succeeding());

    driver
        .compile(&raw(&["-c", &source, "-o", &object, "-Wall", "-fPIC"]))
        .unwrap();

    let sibling = sibling(&source).to_string_lossy().into_owned();
    assert_eq!(
        driver.toolchain().last_call(),
        raw(&[
            "-x",
            "cu",
            "--compiler-options=-Wall,-fPIC",
            "-c",
            "-o",
            &object,
            &sibling,
        ])
    );

    // The sibling existed with the source's content while the tool ran.
    assert!(driver
        .toolchain()
        .seen_files
        .borrow()
        .contains(&(sibling.clone(), "__global__ void k() {}\n".to_string())));

    assert_eq!(dir_entries(dir.path()), vec!["kernel.c"]);
}

#[test]
fn compile_cleans_up_after_tool_failure() {
    let dir = temp_dir();
    let source = write_source(dir.path(), "bad.c", "syntax error\n");
    let driver = driver(FakeTool::new(Behavior::Fail(2), true));

    let err = driver.compile(&raw(&["-c", &source])).unwrap_err();

    match err {
        ShimError::ToolInvocation { code, .. } => assert_eq!(code, Some(2)),
        other => panic!("expected ToolInvocation, got {other:?}"),
    }
    assert_eq!(dir_entries(dir.path()), vec!["bad.c"]);
}

#[test]
fn compile_cleans_up_when_a_later_source_cannot_be_coerced() {
    let dir = temp_dir();
    let first = write_source(dir.path(), "a.c", "int a;\n");
    let second = write_source(dir.path(), "b.c", "int b;\n");
    write_source(dir.path(), "b.cu", "already here\n");
    let driver = driver(FakeTool::succeeding());

    let err = driver.compile(&raw(&["-c", &first, &second])).unwrap_err();

    assert!(matches!(
        err,
        ShimError::Coercion {
            reason: CoercionReason::AlreadyExists,
            ..
        }
    ));
    assert!(driver.toolchain().calls.borrow().is_empty());
    assert_eq!(dir_entries(dir.path()), vec!["a.c", "b.c", "b.cu"]);
}

#[test]
fn sources_with_required_extension_are_left_alone() {
    let dir = temp_dir();
    let source = write_source(dir.path(), "native.cu", "int n;\n");
    let driver = driver(FakeTool::succeeding());

    driver.compile(&raw(&["-c", &source])).unwrap();

    assert_eq!(driver.toolchain().last_call(), raw(&["-x", "cu", "-c", &source]));
    assert_eq!(dir_entries(dir.path()), vec!["native.cu"]);
}

#[test]
fn repeated_source_is_coerced_once() {
    let dir = temp_dir();
    let source = write_source(dir.path(), "dup.c", "int d;\n");
    let driver = driver(FakeTool::succeeding());

    driver.compile(&raw(&["-c", &source, &source])).unwrap();

    let sibling = sibling(&source).to_string_lossy().into_owned();
    assert_eq!(
        driver.toolchain().last_call(),
        raw(&["-x", "cu", "-c", &sibling, &sibling])
    );
    assert_eq!(dir_entries(dir.path()), vec!["dup.c"]);
}

#[test]
fn no_passthrough_without_foreign_flags() {
    let dir = temp_dir();
    let source = write_source(dir.path(), "plain.cu", "");
    let driver = driver(FakeTool::succeeding());

    driver.compile(&raw(&["-c", "-O3", &source])).unwrap();

    let call = driver.toolchain().last_call();
    assert!(!call.iter().any(|a| a.starts_with("--compiler-options")));
}

// -- link mode ---------------------------------------------------------------

#[test]
fn link_forwards_foreign_flags_to_linker() {
    let driver = driver(FakeTool::succeeding());

    driver
        .link(&raw(&["-shared", "a.o", "b.o", "-Wl,-O1", "-pthread", "-o", "ext.so", "-lcudart"]))
        .unwrap();

    assert_eq!(
        driver.toolchain().last_call(),
        raw(&[
            "--linker-options=-Wl,-O1,-pthread",
            "-shared",
            "-o",
            "ext.so",
            "-lcudart",
            "a.o",
            "b.o",
        ])
    );
}

#[test]
fn link_does_not_coerce() {
    let dir = temp_dir();
    let object = write_source(dir.path(), "a.o", "obj");
    let driver = driver(FakeTool::succeeding());

    driver.link(&raw(&["-shared", &object])).unwrap();

    assert_eq!(driver.toolchain().last_call(), raw(&["-shared", &object]));
    assert_eq!(dir_entries(dir.path()), vec!["a.o"]);
}

#[test]
fn run_dispatches_on_mode() {
    let driver = driver(FakeTool::succeeding());
    driver.run(InvocationMode::Link, &raw(&["a.o", "-Wall"])).unwrap();
    assert_eq!(
        driver.toolchain().last_call(),
        raw(&["--linker-options=-Wall", "a.o"])
    );
}

// -- tool failures -----------------------------------------------------------

#[test]
fn missing_tool_is_not_found() {
    let driver = driver(FakeTool::new(Behavior::SpawnError, false));
    let err = driver.link(&raw(&["a.o"])).unwrap_err();
    match err {
        ShimError::ToolNotFound { tool } => assert_eq!(tool, "fake-nvcc"),
        other => panic!("expected ToolNotFound, got {other:?}"),
    }
}

#[test]
fn failing_unreachable_tool_is_not_found() {
    let driver = driver(FakeTool::new(Behavior::Fail(127), false));
    assert!(matches!(
        driver.link(&raw(&["a.o"])),
        Err(ShimError::ToolNotFound { .. })
    ));
}

#[test]
fn success_does_not_probe() {
    let driver = driver(FakeTool::succeeding());
    driver.link(&raw(&["a.o"])).unwrap();
    assert_eq!(driver.toolchain().probes.get(), 0);
}

#[test]
fn failure_probes_once() {
    let driver = driver(FakeTool::new(Behavior::Fail(1), true));
    let _ = driver.link(&raw(&["a.o"]));
    assert_eq!(driver.toolchain().probes.get(), 1);
}

// -- settings ----------------------------------------------------------------

#[test]
fn custom_settings_change_language_and_passthrough() {
    let dir = temp_dir();
    let source = write_source(dir.path(), "k.c", "int k;\n");
    let settings = DriverSettings {
        language: "cuda".into(),
        source_extension: "cuda".into(),
        separator: " ".into(),
        compiler_flag: "-Xcompiler".into(),
        linker_flag: "-Xlinker".into(),
    };
    let driver = Driver::new(FakeTool::succeeding(), settings, Verbosity::VERBOSE);

    driver.compile(&raw(&["-Wall", "-Wextra", &source])).unwrap();

    let sibling = Path::new(&source)
        .with_extension("cuda")
        .to_string_lossy()
        .into_owned();
    assert_eq!(
        driver.toolchain().last_call(),
        raw(&[
            "-x",
            "cuda",
            "-Xcompiler=-Wall -Wextra",
            &sibling,
        ])
    );
    assert_eq!(dir_entries(dir.path()), vec!["k.c"]);
}
