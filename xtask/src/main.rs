//! Build automation for nautilus
//!
//! Usage: cargo xtask <command>

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const BIN: &str = "nautilus";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for nautilus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the binary
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run unit and integration tests
    Test {
        /// Also run tests that need a reachable cluster (current kubeconfig context)
        #[arg(long)]
        live: bool,
    },
    /// Format code
    Format {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy with warnings denied
    Clippy,
    /// Format check, clippy and tests
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;
    sh.change_dir(project_root());

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { live } => test(&sh, live),
        Commands::Format { check } => format(&sh, check),
        Commands::Clippy => clippy(&sh),
        Commands::Ci => {
            format(&sh, true)?;
            clippy(&sh)?;
            test(&sh, false)
        }
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    let profile = if release { "release" } else { "debug" };
    let release_flag = release.then_some("--release");
    cmd!(sh, "cargo build --bin {BIN} {release_flag...}")
        .run()
        .context("cargo build failed")?;
    println!("built target/{}/{}", profile, BIN);
    Ok(())
}

fn test(sh: &Shell, live: bool) -> Result<()> {
    cmd!(sh, "cargo test --workspace").run()?;
    if live {
        cmd!(sh, "cargo test --workspace -- --ignored")
            .run()
            .context("live cluster tests failed")?;
    }
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    let check_flag: &[&str] = if check { &["--", "--check"] } else { &[] };
    cmd!(sh, "cargo fmt --all {check_flag...}").run()?;
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?;
    Ok(())
}

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
