//! CLI for `motifscan gapped`: search gapped patterns and report per-pattern
//! occurrence counts.
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use motifscan::config::EnvConfig;
use motifscan::fasta::{load_fasta_text, load_patterns, PatternFilter};
use motifscan::{GappedMatcher, SearchConfig};

#[derive(Debug, Args)]
pub struct GappedCmd {
    /// FASTA file to search (all records concatenated; `.gz` accepted).
    #[arg(value_name = "FASTA")]
    pub fasta: PathBuf,
    /// Gapped pattern list, one per line.
    #[arg(value_name = "PATTERNS")]
    pub patterns: PathBuf,
    /// Shortest literal run used as a seed. Defaults to `MOTIFSCAN_MIN_SEED_LEN` or 3.
    #[arg(long)]
    pub min_seed_len: Option<usize>,
    /// Report each occurrence once even when several seeds confirm it.
    #[arg(long)]
    pub dedup: bool,
    /// Also list every interval, not only the counts.
    #[arg(long)]
    pub intervals: bool,
}

pub fn run(cmd: GappedCmd) -> Result<()> {
    let mut config = SearchConfig::from_env_config(&EnvConfig::default());
    if let Some(min) = cmd.min_seed_len {
        config = config.min_seed_len(min);
    }
    if cmd.dedup {
        config = config.dedup_intervals(true);
    }

    let text = load_fasta_text(&cmd.fasta)?;
    let patterns = load_patterns(&cmd.patterns, PatternFilter::Gapped)?;

    let t0 = Instant::now();
    let matcher = GappedMatcher::new(&patterns, config)
        .with_context(|| format!("parse patterns from {}", cmd.patterns.display()))?;
    let build_time = t0.elapsed();

    let t1 = Instant::now();
    let found = matcher.search(&text);
    let search_time = t1.elapsed();

    let total: usize = found.values().map(Vec::len).sum();
    tracing::info!(
        ?build_time,
        ?search_time,
        unindexed = matcher.unindexed().len(),
        "gapped search finished"
    );

    println!("Text length: {}", text.len());
    let gapped = matcher.patterns().iter().filter(|p| p.has_gaps()).count();
    let config = matcher.config();
    println!("Patterns: {} ({} gapped)", patterns.len(), gapped);
    println!(
        "Min seed length: {}, dedup: {}",
        config.min_seed_len, config.dedup_intervals
    );
    println!("Seed nodes: {}", matcher.automaton().node_count());
    println!("Build time: {:.6} s", build_time.as_secs_f64());
    println!("Search time: {:.6} s", search_time.as_secs_f64());
    println!("Total matches: {total}");

    let mut ids: Vec<_> = found.keys().copied().collect();
    ids.sort_unstable();
    for id in ids {
        let intervals = &found[&id];
        println!("{}\t{}\t{}", id, patterns[id], intervals.len());
        if cmd.intervals {
            for (start, end) in intervals {
                println!("\t{start}..{end}");
            }
        }
    }

    Ok(())
}
