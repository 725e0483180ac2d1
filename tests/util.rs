//! Shared test utilities for integration tests
//!
//! Provides the binary launcher and sample documents used across
//! multiple test files.
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// Two sentences sharing the eight-word run "it was a bright cold day in april"
pub const SHARED_A: &str = "It was a bright cold day in April, and the clocks were striking thirteen.";
pub const SHARED_B: &str =
    "Winston remembered: it was a bright cold day in April when everything changed.";

/// Launch the compiled `plag` binary in `dir` with colors disabled so
/// output is byte-stable across terminals.
pub fn plag(dir: &Path) -> Command
{
    let mut cmd = Command::cargo_bin("plag").expect("bin");
    cmd.current_dir(dir)
        .env_remove("PLAGCHECK_LOG")
        .arg("--no-color");
    cmd
}
