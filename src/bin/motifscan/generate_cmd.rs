//! CLI for `motifscan generate`: cut random (optionally gapped) motifs out of
//! a FASTA sequence.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use motifscan::fasta::load_fasta_text;
use motifscan::generator::generate_patterns;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Args)]
pub struct GenerateCmd {
    /// FASTA file the motifs are cut from.
    #[arg(value_name = "FASTA")]
    pub fasta: PathBuf,
    /// Number of motifs.
    #[arg(long, default_value_t = 50)]
    pub count: usize,
    /// Motif length.
    #[arg(long, default_value_t = 12)]
    pub length: usize,
    /// Fraction of each motif replaced by `.` (0.0 – 0.9).
    #[arg(long, default_value_t = 0.2)]
    pub gaps: f64,
    /// RNG seed; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output file (stdout if omitted).
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

pub fn run(cmd: GenerateCmd) -> Result<()> {
    if !(0.0..1.0).contains(&cmd.gaps) {
        bail!("--gaps must be in [0, 1), got {}", cmd.gaps);
    }

    let text = load_fasta_text(&cmd.fasta)?;
    let mut rng = match cmd.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let patterns = generate_patterns(text.as_bytes(), cmd.count, cmd.length, cmd.gaps, &mut rng);
    if patterns.is_empty() && cmd.count > 0 {
        bail!(
            "sequence in {} is too short for motifs of length {}",
            cmd.fasta.display(),
            cmd.length
        );
    }

    let mut out: Box<dyn Write> = match &cmd.out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    for p in &patterns {
        writeln!(out, "{p}")?;
    }
    out.flush()?;

    if let Some(path) = &cmd.out {
        tracing::info!(count = patterns.len(), path = %path.display(), "patterns written");
    }
    Ok(())
}
