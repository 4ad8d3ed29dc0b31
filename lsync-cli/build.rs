//! Build script for lsync-cli.
//!
//! Sets compile-time environment variables for the `info` command:
//! - `LSYNC_VERSION`: Package version (from Cargo.toml or env)
//! - `LSYNC_COMMIT_SHA`: Git commit hash (from `git rev-parse HEAD` or env)
//! - `LSYNC_BUILT_AT`: UTC build time
//! - `LSYNC_TARGET`: Target triple

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-env-changed=LSYNC_VERSION");
    println!("cargo:rerun-if-env-changed=LSYNC_COMMIT_SHA");

    let version = std::env::var("LSYNC_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=LSYNC_VERSION={}", version);

    let commit = std::env::var("LSYNC_COMMIT_SHA")
        .ok()
        .or_else(get_git_commit)
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=LSYNC_COMMIT_SHA={}", commit);

    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    println!("cargo:rustc-env=LSYNC_BUILT_AT={}", built_at);

    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=LSYNC_TARGET={}", target);
}

/// Try to get the current git commit SHA.
fn get_git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;

    if output.status.success() {
        let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !sha.is_empty() {
            return Some(sha);
        }
    }

    None
}
