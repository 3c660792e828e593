//! Command-line interface for the `motifscan` crate.
//!
//! Subcommands live in separate files under `src/bin/motifscan/`:
//! - `exact_cmd.rs`
//! - `gapped_cmd.rs`
//! - `generate_cmd.rs`
//! - `diff_cmd.rs`
//!
//! Log verbosity is read from `MOTIFSCAN_LOG`, then `RUST_LOG`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name="motifscan", version=env!("CARGO_PKG_VERSION"), about="Exact and gapped multi-pattern search in DNA sequences", disable_help_subcommand=true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count exact pattern occurrences with an Aho–Corasick automaton.
    Exact(exact_cmd::ExactCmd),
    /// Search patterns containing fixed-length gaps (`.`, `N`, `{n}`).
    Gapped(gapped_cmd::GappedCmd),
    /// Cut random motifs out of a FASTA sequence.
    Generate(generate_cmd::GenerateCmd),
    /// Classify the differences between two sequences.
    Diff(diff_cmd::DiffCmd),
}

#[path = "motifscan/exact_cmd.rs"] mod exact_cmd;
#[path = "motifscan/gapped_cmd.rs"] mod gapped_cmd;
#[path = "motifscan/generate_cmd.rs"] mod generate_cmd;
#[path = "motifscan/diff_cmd.rs"] mod diff_cmd;

fn init_logging() {
    let filter = EnvFilter::try_from_env("MOTIFSCAN_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Exact(cmd) => exact_cmd::run(cmd),
        Command::Gapped(cmd) => gapped_cmd::run(cmd),
        Command::Generate(cmd) => generate_cmd::run(cmd),
        Command::Diff(cmd) => diff_cmd::run(cmd),
    }
}
