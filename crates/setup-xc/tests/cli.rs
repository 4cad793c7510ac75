//! Binary-level tests for setup-xc.

use assert_cmd::Command;
use predicates::prelude::*;
use setup_xc_core::tools::{FsToolCache, Platform, ToolCache};
use setup_xc_tools_xc::binary_name;
use tempfile::TempDir;

fn setup_xc() -> Command {
    let mut cmd = Command::cargo_bin("setup-xc").unwrap();
    cmd.env_remove("INPUT_VERSION")
        .env_remove("GITHUB_OUTPUT")
        .env_remove("GITHUB_PATH")
        .env_remove("RUNNER_TOOL_CACHE")
        .env_remove("SETUP_XC_CACHE_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    setup_xc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--xc-version"));
}

#[test]
fn test_missing_version_input_fails() {
    setup_xc()
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            "::error::Input required and not supplied: version",
        ));
}

#[test]
fn test_cached_version_is_published() {
    let temp = TempDir::new().unwrap();
    let platform = Platform::current();
    let binary = binary_name("xc", &platform);

    let source = temp.path().join("extracted");
    std::fs::create_dir_all(&source).unwrap();
    std::fs::write(source.join(&binary), b"binary").unwrap();
    let cache_root = temp.path().join("cache");
    let cached_dir = FsToolCache::new(cache_root.clone(), platform.arch.clone())
        .commit_dir(&source, &binary, "xc", "v0.4.0")
        .unwrap();

    let output_file = temp.path().join("github_output");
    let path_file = temp.path().join("github_path");

    setup_xc()
        .env("INPUT_VERSION", "v0.4.0")
        .env("GITHUB_OUTPUT", &output_file)
        .env("GITHUB_PATH", &path_file)
        .env("RUNNER_TEMP", temp.path().join("tmp"))
        .arg("--cache-dir")
        .arg(&cache_root)
        .assert()
        .success();

    let outputs = std::fs::read_to_string(&output_file).unwrap();
    let expected = cached_dir.join(&binary);
    assert!(outputs.starts_with("xc-path<<ghadelimiter_"));
    assert!(outputs.contains(&*expected.to_string_lossy()));

    let paths = std::fs::read_to_string(&path_file).unwrap();
    assert_eq!(paths.trim_end(), cached_dir.to_string_lossy());
}
