//! Locates `llvm-config` and bakes the LLVM version into the crate.

use std::env;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use semver::Version;

/// The prefix variable llvm-sys reads for this LLVM generation; reuse it so
/// both crates resolve the same installation.
const PREFIX_VAR: &str = "LLVM_SYS_181_PREFIX";

fn llvm_config_path() -> PathBuf {
    if let Ok(prefix) = env::var(PREFIX_VAR) {
        return PathBuf::from(prefix).join("bin").join("llvm-config");
    }
    PathBuf::from("llvm-config")
}

fn llvm_version() -> Result<Version> {
    let config = llvm_config_path();
    let output = Command::new(&config)
        .arg("--version")
        .output()
        .with_context(|| format!("couldn't execute {}", config.display()))?;
    let stdout = String::from_utf8(output.stdout).context("llvm-config output was not UTF-8")?;
    parse_lenient(stdout.trim())
}

/// Accepts suffixed versions such as `18.1.8git` that are not valid semver.
fn parse_lenient(raw: &str) -> Result<Version> {
    if let Ok(version) = Version::parse(raw) {
        return Ok(version);
    }
    let numeric: String = raw
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let mut parts = numeric.split('.');
    let mut next = || -> Result<u64> {
        match parts.next() {
            Some("") | None => Ok(0),
            Some(part) => part
                .parse()
                .with_context(|| format!("unparseable LLVM version {raw:?}")),
        }
    };
    Ok(Version::new(next()?, next()?, next()?))
}

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={PREFIX_VAR}");

    let version = llvm_version()?;
    if version.major < 18 {
        bail!("LLVM 18 or higher is required (found {version})");
    }

    println!("cargo:rustc-env=LLVM_EXT_VERSION_MAJOR={}", version.major);
    println!("cargo:rustc-env=LLVM_EXT_VERSION_MINOR={}", version.minor);
    Ok(())
}
