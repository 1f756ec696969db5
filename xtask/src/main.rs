//! Custom cargo commands for the chunkweave crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask kani      - Run Kani proofs of the interleave arithmetic
//!   cargo xtask check     - Quick check (no Kani)
//!   cargo xtask fuzz      - Run every fuzz target for a short while

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Fuzz targets declared in fuzz/Cargo.toml.
const FUZZ_TARGETS: &[&str] = &["chunk_merge", "loose_config"];

/// Contract functions every merge runs through in debug builds.
const CONTRACTS: &[&str] = &[
    "check_merged_len",
    "check_primary_order",
    "check_injected_prefix",
    "check_fetch_size",
];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("kani") => kani()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("fuzz") => fuzz()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (contracts + tests + clippy + Kani)
  test      Run all Rust tests
  kani      Run Kani proofs only
  check     Quick check (cargo test + clippy, no Kani)
  bench     Run benchmarks
  fuzz      Run each fuzz target for 60 seconds (needs cargo-fuzz, nightly)
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("chunkweave Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Checking contract call sites...");
    check_contract_call_sites()?;
    println!("✓ Contracts wired into the merge and planner\n");

    println!("[2/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/5] Running arithmetic tests in kani-proofs...");
    run_cargo(&["test", "--quiet", "--manifest-path", "kani-proofs/Cargo.toml"])?;
    println!("✓ kani-proofs tests passed\n");

    println!("[5/5] Running Kani proofs...");
    kani()?;

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");
    println!("\nSafe to commit changes.");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Run Kani proofs, skipping when cargo-kani is not installed
fn kani() -> Result<()> {
    let root = project_root()?;
    let proofs_dir = root.join("kani-proofs");

    let probe = Command::new("cargo").args(["kani", "--version"]).output();
    if !matches!(probe, Ok(ref out) if out.status.success()) {
        println!("  (cargo-kani not installed, skipping)\n");
        return Ok(());
    }

    let status = Command::new("cargo")
        .arg("kani")
        .current_dir(&proofs_dir)
        .status()
        .context("Failed to run cargo kani")?;

    if !status.success() {
        bail!("Kani proofs failed");
    }

    println!("✓ Kani proofs verified\n");
    Ok(())
}

/// Quick check without Kani
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Run every fuzz target briefly
fn fuzz() -> Result<()> {
    let root = project_root()?;
    for target in FUZZ_TARGETS {
        println!("Fuzzing {}...", target);
        let status = Command::new("cargo")
            .args(["+nightly", "fuzz", "run", target, "--", "-max_total_time=60"])
            .current_dir(&root)
            .status()
            .with_context(|| format!("Failed to run cargo fuzz for {}", target))?;

        if !status.success() {
            bail!("fuzz target {} failed", target);
        }
    }
    println!("\n✓ Fuzz targets ran clean");
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// Every contract must be defined in contracts.rs and called from the code
/// it guards.
fn check_contract_call_sites() -> Result<()> {
    let root = project_root()?;
    let read = |rel: &str| {
        std::fs::read_to_string(root.join(rel)).with_context(|| format!("Failed to read {}", rel))
    };

    let contracts = read("src/contracts.rs")?;
    let callers = [read("src/interleave/mod.rs")?, read("src/planner.rs")?].join("\n");

    for name in CONTRACTS {
        if !contracts.contains(&format!("pub fn {}", name)) {
            bail!("contract {} is missing from src/contracts.rs", name);
        }
        if !callers.contains(&format!("contracts::{}", name)) {
            bail!(
                "contract {} is no longer called. Someone may have removed a safety check!",
                name
            );
        }
    }

    Ok(())
}
