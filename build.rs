//! Stamps the crate with a release version and commit.
//!
//! `DARKMODE_VERSION` falls back to the package version. The commit comes
//! from `DARKMODE_GIT_SHA`, then CI's `GITHUB_SHA`, then the local checkout.

use std::env;
use std::process::Command;

const SHA_LEN: usize = 7;

const WATCHED_ENV: &[&str] = &["DARKMODE_VERSION", "DARKMODE_GIT_SHA", "GITHUB_SHA"];

fn main() {
    for key in WATCHED_ENV {
        println!("cargo:rerun-if-env-changed={key}");
    }
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = env::var("DARKMODE_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "unknown".to_string());

    let sha = env::var("DARKMODE_GIT_SHA")
        .ok()
        .or_else(|| env::var("GITHUB_SHA").ok().map(|sha| short(&sha)))
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=DARKMODE_VERSION={version}");
    println!("cargo:rustc-env=DARKMODE_GIT_SHA={sha}");
}

fn short(sha: &str) -> String {
    sha.trim().chars().take(SHA_LEN).collect()
}

/// Commit of the working tree, when built from a git checkout.
fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = short(std::str::from_utf8(&output.stdout).ok()?);
    (!sha.is_empty()).then_some(sha)
}
