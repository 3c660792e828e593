//! CLI for `motifscan diff`: classify differences between the first records
//! of two FASTA files.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use motifscan::fasta::{load_fasta, FastaRecord};
use motifscan::mutations::compare_sequences;

#[derive(Debug, Args)]
pub struct DiffCmd {
    /// Reference FASTA (first record used).
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,
    /// Compared FASTA (first record used).
    #[arg(value_name = "OTHER")]
    pub other: PathBuf,
}

fn read_first(path: &Path) -> Result<FastaRecord> {
    load_fasta(path)?
        .into_iter()
        .next()
        .with_context(|| format!("no FASTA records in {}", path.display()))
}

pub fn run(cmd: DiffCmd) -> Result<()> {
    let a = read_first(&cmd.reference)?;
    let b = read_first(&cmd.other)?;

    let changes = compare_sequences(&a.seq, &b.seq);
    tracing::info!(reference = %a.id, other = %b.id, changes = changes.len(), "comparison finished");

    for change in &changes {
        println!("{change}");
    }
    if changes.is_empty() {
        println!("No differences.");
    }
    Ok(())
}
