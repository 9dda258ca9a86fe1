//! Build script of dankcli.
//!
//! Records the Git revision the binary is built from, for `--version`.

use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::str;


/// File in the $OUT_DIR where the current revision is written.
const REVISION_FILE: &str = "revision";

/// Written instead of the SHA when it cannot be determined
/// (e.g. when building from a source tarball).
const UNKNOWN_REVISION: &str = "unknown";


fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    let revision = git_head_sha().unwrap_or_else(|e| {
        println!("cargo:warning=Failed to obtain current Git SHA: {}", e);
        UNKNOWN_REVISION.to_owned()
    });

    // Cargo has no way to pass it as an env!() variable,
    // so the crate picks it up with include_str!() instead.
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set by Cargo");
    let rev_path = Path::new(&out_dir).join(REVISION_FILE);
    fs::write(&rev_path, revision).expect("failed to write the revision file");
}

fn git_head_sha() -> Result<String, Box<dyn Error>> {
    let output = Command::new("git").args(&["rev-parse", "--short", "HEAD"]).output()?;
    if !output.status.success() {
        return Err(format!("git exited with {}", output.status).into());
    }
    let sha = str::from_utf8(&output.stdout[..])?.trim().to_owned();
    if sha.is_empty() {
        return Err("empty output from git".into());
    }
    Ok(sha)
}
