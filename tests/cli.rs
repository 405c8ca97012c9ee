//! Black-box tests for the `activeshot` binary.
//!
//! The real `screencapture` is swapped for a shell script through
//! `ACTIVESHOT_SCREENCAPTURE`, and `--interactive` skips the window lookup,
//! so these run on any Unix host.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{DynamicImage, RgbaImage};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_activeshot");

fn activeshot(args: &[&str], fake_tool: Option<&Path>) -> Output {
    let mut cmd = Command::new(BIN);
    cmd.args(args)
        .env_remove("ACTIVESHOT_CAPTURE_TIMEOUT")
        .env("RUST_LOG", "off");
    match fake_tool {
        Some(tool) => cmd.env("ACTIVESHOT_SCREENCAPTURE", tool),
        None => cmd.env("ACTIVESHOT_SCREENCAPTURE", "/nonexistent/activeshot/screencapture"),
    };
    cmd.output().expect("failed to run activeshot")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Writes an executable `/bin/sh` script named `screencapture` into `dir`.
fn write_tool(dir: &Path, body: &str) -> PathBuf {
    let script = dir.join("screencapture");
    std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

/// A tool that copies a `width`x`height` PNG to its last argument.
fn copying_tool(dir: &TempDir, width: u32, height: u32) -> PathBuf {
    let fixture = dir.path().join("fixture.png");
    DynamicImage::ImageRgba8(RgbaImage::new(width, height))
        .save(&fixture)
        .unwrap();
    write_tool(
        dir.path(),
        &format!(
            "for last; do :; done\ncp '{}' \"$last\"",
            fixture.display()
        ),
    )
}

// ── Argument handling ───────────────────────────────────────────────

#[test]
fn help_exits_zero_and_prints_usage() {
    for flag in ["-h", "--help"] {
        let output = activeshot(&[flag], None);
        assert!(output.status.success());
        let text = stdout(&output);
        assert!(text.contains("--clipboard"), "usage should list flags: {}", text);
    }
}

#[test]
fn help_ignores_later_invalid_flags() {
    let output = activeshot(&["--help", "--bogus", "--clipboard", "--file", "x.png"], None);
    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).contains("Error:"));
}

#[test]
fn unknown_flag_fails_naming_token() {
    let output = activeshot(&["--interactive", "--frobnicate"], None);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.starts_with("Error: "), "{}", text);
    assert!(text.contains("--frobnicate"), "{}", text);
}

#[test]
fn clipboard_with_file_conflicts() {
    for args in [
        ["--clipboard", "--file", "x.png"],
        ["--file", "x.png", "--clipboard"],
    ] {
        let output = activeshot(&args, None);
        assert_eq!(output.status.code(), Some(1));
        let text = stdout(&output);
        assert!(text.contains("--clipboard") && text.contains("--file"), "{}", text);
    }
}

#[test]
fn trailing_file_flag_is_missing_filename() {
    let output = activeshot(&["--file"], None);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("missing filename"));
}

#[test]
fn missing_destination_directory_fails_before_capture() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let tool = write_tool(dir.path(), &format!("touch '{}'", marker.display()));
    let dest = dir.path().join("no-such-dir").join("shot.png");

    let output = activeshot(
        &["--interactive", "--file", dest.to_str().unwrap()],
        Some(&tool),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("does not exist"));
    assert!(!marker.exists(), "capture tool must not run");
}

// ── Capture tool outcomes ───────────────────────────────────────────

#[test]
fn failing_tool_reports_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let tool = write_tool(dir.path(), "exit 1");
    let dest = dir.path().join("shot.png");

    let output = activeshot(
        &["--interactive", "--file", dest.to_str().unwrap()],
        Some(&tool),
    );
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.starts_with("Error: "), "{}", text);
    assert!(text.contains("exit code 1"), "{}", text);
    assert!(!dest.exists());
}

#[test]
fn cancelled_capture_is_silent_success() {
    let dir = tempfile::tempdir().unwrap();
    let tool = write_tool(dir.path(), "exit 0");
    let dest = dir.path().join("shot.png");

    let output = activeshot(
        &["--interactive", "--file", dest.to_str().unwrap()],
        Some(&tool),
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "");
    assert!(!dest.exists());
}

#[test]
fn unstartable_tool_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("shot.png");
    let output = activeshot(&["--interactive", "--file", dest.to_str().unwrap()], None);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("could not start"));
}

#[test]
fn hung_tool_respects_configured_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let tool = write_tool(dir.path(), "exec sleep 10");
    let dest = dir.path().join("shot.png");

    let output = Command::new(BIN)
        .args(["--interactive", "--file", dest.to_str().unwrap()])
        .env("ACTIVESHOT_SCREENCAPTURE", &tool)
        .env("ACTIVESHOT_CAPTURE_TIMEOUT", "0.3")
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("did not finish"));
}

#[test]
fn malformed_timeout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("shot.png");
    for raw in ["soon", "1e300"] {
        let output = Command::new(BIN)
            .args(["--interactive", "--file", dest.to_str().unwrap()])
            .env("ACTIVESHOT_CAPTURE_TIMEOUT", raw)
            .env("RUST_LOG", "off")
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1), "timeout {:?}", raw);
        let text = stdout(&output);
        assert!(text.starts_with("Error: "), "{}", text);
        assert!(text.contains("ACTIVESHOT_CAPTURE_TIMEOUT"), "{}", text);
    }
}

// ── Saving ──────────────────────────────────────────────────────────

#[test]
fn saves_capture_and_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let tool = copying_tool(&dir, 64, 48);
    let dest = dir.path().join("shot.png");

    let output = activeshot(
        &["--interactive", "--no-resize", "--file", dest.to_str().unwrap()],
        Some(&tool),
    );
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert_eq!(
        stdout(&output).trim_end(),
        format!("Screenshot saved to {}", dest.display())
    );

    let saved = image::open(&dest).unwrap();
    assert_eq!((saved.width(), saved.height()), (64, 48));
}

#[test]
fn quiet_save_prints_only_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let tool = copying_tool(&dir, 20, 10);
    let dest = dir.path().join("quiet.png");

    let output = activeshot(
        &["-q", "--interactive", "--file", dest.to_str().unwrap()],
        Some(&tool),
    );
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert_eq!(stdout(&output), format!("{}\n", dest.display()));
    assert!(dest.exists());
}

#[test]
fn existing_destination_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let tool = copying_tool(&dir, 16, 16);
    let dest = dir.path().join("shot.png");
    std::fs::write(&dest, b"stale").unwrap();

    let output = activeshot(
        &["-q", "--interactive", "--no-resize", "--file", dest.to_str().unwrap()],
        Some(&tool),
    );
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    let saved = image::open(&dest).unwrap();
    assert_eq!((saved.width(), saved.height()), (16, 16));
}

#[test]
fn undecodable_capture_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let tool = write_tool(
        dir.path(),
        "for last; do :; done\nprintf 'not a png' > \"$last\"",
    );
    let dest = dir.path().join("shot.png");

    let output = activeshot(
        &["--interactive", "--file", dest.to_str().unwrap()],
        Some(&tool),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("decode"));
    assert!(!dest.exists());
}
