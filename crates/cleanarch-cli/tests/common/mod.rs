//! Helpers shared by the integration test binaries.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// The binary with a clean, colourless environment. Plain output comes from
/// the config environment layer so tests can still pass `--output-format`.
pub fn cleanarch(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cleanarch").unwrap();
    cmd.current_dir(cwd)
        .env("NO_COLOR", "1")
        .env_remove("CLEANARCH_CONFIG")
        .env_remove("CLEANARCH_TOOLCHAIN__PROGRAM")
        .env_remove("RUST_LOG")
        .env("CLEANARCH_OUTPUT__FORMAT", "plain");
    cmd
}

/// A config file pointing the toolchain at `program`.
pub fn config_with_program(dir: &Path, program: &str) -> PathBuf {
    let path = dir.join("cleanarch.toml");
    fs::write(&path, format!("[toolchain]\nprogram = \"{program}\"\n")).unwrap();
    path
}

/// An executable shell script standing in for `dotnet`.
#[cfg(unix)]
pub fn fake_toolchain(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-dotnet");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
