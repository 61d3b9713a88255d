//! Stamps the binary version with the commit it was built from.
//!
//! `BRIDGE_VERSION` is `<package version>` or `<package version> (<commit>)`,
//! with `-dirty` appended when the work tree has uncommitted changes.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let package = env!("CARGO_PKG_VERSION");
    let version = match commit() {
        Some(commit) => format!("{package} ({commit})"),
        None => package.to_string(),
    };

    println!("cargo:rustc-env=BRIDGE_VERSION={version}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn commit() -> Option<String> {
    let hash = git(&["rev-parse", "--short", "HEAD"]).filter(|hash| !hash.is_empty())?;
    let dirty = git(&["status", "--porcelain"]).is_some_and(|status| !status.is_empty());

    Some(if dirty { format!("{hash}-dirty") } else { hash })
}
