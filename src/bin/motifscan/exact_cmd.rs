//! CLI for `motifscan exact`: build an automaton over a pattern list and count
//! occurrences in a FASTA sequence.
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use motifscan::dot::{write_dot, DotOptions, DEFAULT_MAX_NODES};
use motifscan::fasta::{load_fasta_text, load_patterns, PatternFilter};
use motifscan::Automaton;

#[derive(Debug, Args)]
pub struct ExactCmd {
    /// FASTA file to search (all records concatenated; `.gz` accepted).
    #[arg(value_name = "FASTA")]
    pub fasta: PathBuf,
    /// Pattern list, one per line. Lines outside `ACGTN` are skipped.
    #[arg(value_name = "PATTERNS")]
    pub patterns: PathBuf,
    /// Write the automaton as Graphviz DOT.
    #[arg(long, value_name = "FILE")]
    pub dot: Option<PathBuf>,
    /// Largest node id included in the DOT output.
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    pub max_dot_nodes: usize,
}

pub fn run(cmd: ExactCmd) -> Result<()> {
    let text = load_fasta_text(&cmd.fasta)?;
    let patterns = load_patterns(&cmd.patterns, PatternFilter::Exact)?;

    let t0 = Instant::now();
    let automaton = Automaton::from_patterns(&patterns);
    let build_time = t0.elapsed();

    let t1 = Instant::now();
    let matches = automaton.search(&text);
    let search_time = t1.elapsed();

    tracing::info!(?build_time, ?search_time, "exact search finished");

    println!("Text length: {}", text.len());
    println!("Patterns: {}", automaton.pattern_count());
    println!("Nodes: {}", automaton.node_count());
    println!("Build time: {:.6} s", build_time.as_secs_f64());
    println!("Search time: {:.6} s", search_time.as_secs_f64());
    println!("Matches: {matches}");

    if let Some(path) = &cmd.dot {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let options = DotOptions {
            max_nodes: cmd.max_dot_nodes,
        };
        write_dot(&automaton, BufWriter::new(file), options)
            .with_context(|| format!("write DOT to {}", path.display()))?;
        tracing::info!(path = %path.display(), "DOT automaton saved");
    }

    Ok(())
}
