//! Development automation tasks for the `StudyBuddy` workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use std::{env, fs};

use anyhow::{anyhow, Context};

/// Where `ts-rs` writes bindings for the domain crate.
const BINDINGS_DIR: &str = "crates/domain/bindings";

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("codegen") => run_codegen(env::args().nth(2).map(PathBuf::from)),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("StudyBuddy Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci              Run fmt, clippy and test in sequence");
    println!("    fmt             Check Rust code formatting");
    println!("    clippy          Run Clippy lints on every target");
    println!("    test            Run all workspace tests");
    println!("    codegen [DIR]   Export TypeScript types for the domain models");
    println!("    help            Show this help message");
}

fn run_ci() -> anyhow::Result<()> {
    println!("==> Step 1/3: Checking Rust format...");
    run_fmt()?;

    println!("\n==> Step 2/3: Running Clippy...");
    run_clippy()?;

    println!("\n==> Step 3/3: Running tests...");
    run_test()?;

    println!("\nAll CI checks passed");
    Ok(())
}

fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("failed to spawn cargo {}", args.join(" ")))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("cargo {} exited with {status}", args.join(" ")))
    }
}

fn run_fmt() -> anyhow::Result<()> {
    cargo(&["fmt", "--all", "--", "--check"]).context("Format check failed. Run 'cargo fmt --all' to fix.")
}

fn run_clippy() -> anyhow::Result<()> {
    cargo(&["clippy", "--workspace", "--all-targets", "--all-features", "--", "-D", "warnings"])
}

fn run_test() -> anyhow::Result<()> {
    cargo(&["test", "--workspace", "--all-features"])
}

/// Export the domain models through `ts-rs`, optionally copying them into
/// `dest` with an `index.ts` re-exporting every type.
fn run_codegen(dest: Option<PathBuf>) -> anyhow::Result<()> {
    println!("Step 1/2: Running ts-gen tests to export bindings...");
    cargo(&["test", "-p", "studybuddy-domain", "--features", "ts-gen", "--lib"])
        .context("TypeScript generation tests failed")?;

    let bindings = PathBuf::from(BINDINGS_DIR);
    if !bindings.exists() {
        anyhow::bail!("Bindings directory not found at {}", bindings.display());
    }

    let Some(dest) = dest else {
        println!("\nBindings written to {}", bindings.display());
        return Ok(());
    };

    println!("\nStep 2/2: Syncing bindings to {}...", dest.display());
    let synced = sync_bindings(&bindings, &dest)?;
    generate_index_ts(&dest)?;
    println!("  Synced {synced} files");
    Ok(())
}

fn is_ts(path: &Path) -> bool {
    path.extension().and_then(std::ffi::OsStr::to_str) == Some("ts")
}

fn sync_bindings(src: &Path, dest: &Path) -> anyhow::Result<usize> {
    fs::create_dir_all(dest).context("Failed to create destination directory")?;

    let mut synced = 0;
    for entry in fs::read_dir(src).context("Failed to read bindings directory")?.filter_map(Result::ok) {
        let path = entry.path();
        if !is_ts(&path) {
            continue;
        }
        let file_name = path.file_name().ok_or_else(|| anyhow!("Invalid file name"))?;
        let dest_path = dest.join(file_name);
        fs::copy(&path, &dest_path).with_context(|| {
            format!("Failed to copy {} to {}", path.display(), dest_path.display())
        })?;
        synced += 1;
    }
    Ok(synced)
}

fn generate_index_ts(types_dir: &Path) -> anyhow::Result<()> {
    let mut type_names: Vec<String> = fs::read_dir(types_dir)
        .context("Failed to read types directory")?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_ts(path))
        .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
        .filter(|name| name != "index")
        .collect();
    type_names.sort();

    let mut content = String::from(
        "// Generated by ts-rs via: cargo xtask codegen\n\
         // DO NOT EDIT MANUALLY - changes will be overwritten\n\n",
    );
    for name in &type_names {
        let _ = writeln!(content, "export type {{ {name} }} from './{name}';");
    }

    let index_path = types_dir.join("index.ts");
    fs::write(&index_path, content).with_context(|| format!("Failed to write {}", index_path.display()))
}
