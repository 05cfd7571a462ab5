use std::path::{Path, PathBuf};
use std::process::Command;

/// Trimmed stdout of a successful git invocation.
fn git(repo_root: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git").arg("-C").arg(repo_root).args(args).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn main() {
    let manifest_dir = PathBuf::from(std::env::var_os("CARGO_MANIFEST_DIR").unwrap_or_else(|| ".".into()));
    let repo_root = manifest_dir.parent().unwrap_or(&manifest_dir);

    let sha = git(repo_root, &["rev-parse", "--short=10", "HEAD"]).filter(|s| !s.is_empty());
    let dirty = git(repo_root, &["status", "--porcelain", "--untracked-files=no"])
        .is_some_and(|s| !s.is_empty());

    let stamp = match sha {
        Some(sha) if dirty => format!("{sha}-dirty"),
        Some(sha) => sha,
        None => "unknown".to_string(),
    };

    println!("cargo:rustc-env=FOLIOSCAN_BUILD_SHA={stamp}");
    for tracked in [".git/HEAD", ".git/index"] {
        println!("cargo:rerun-if-changed={}", repo_root.join(tracked).display());
    }
}
