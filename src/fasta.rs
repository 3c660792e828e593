//! FASTA and pattern-list input.
//!
//! Files ending in `.gz` are decompressed transparently.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::alphabet;
use crate::error::{Error, Result};

/// One FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// First word of the header line, without `>`.
    pub id: String,
    /// Sequence lines joined and uppercased.
    pub seq: String,
}

/// Parse FASTA text into records.
///
/// Lines starting with `>` open a new record; every other line is appended to
/// the current sequence with whitespace removed. Sequence lines before the
/// first header belong to a record with an empty id.
///
/// ```
/// use motifscan::fasta::parse_fasta;
///
/// let recs = parse_fasta(">chr1 test\nac\nGT\n>chr2\nNN\n");
/// assert_eq!(recs.len(), 2);
/// assert_eq!(recs[0].id, "chr1");
/// assert_eq!(recs[0].seq, "ACGT");
/// ```
pub fn parse_fasta(text: &str) -> Vec<FastaRecord> {
    let mut out = Vec::new();
    let mut current: Option<FastaRecord> = None;

    for line in text.lines() {
        if let Some(header) = line.strip_prefix('>') {
            out.extend(current.take());
            current = Some(FastaRecord {
                id: header.split_whitespace().next().unwrap_or_default().to_string(),
                seq: String::new(),
            });
        } else {
            let record = current.get_or_insert_with(|| FastaRecord {
                id: String::new(),
                seq: String::new(),
            });
            record.seq.extend(
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| c.to_ascii_uppercase()),
            );
        }
    }
    out.extend(current);
    out
}

/// Which lines of a pattern file to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternFilter {
    /// Only lines made entirely of scanner symbols (`ACGTN`).
    #[default]
    Exact,
    /// Every non-blank line; the gap parser decides what is valid.
    Gapped,
}

/// Split a pattern list into patterns, one per line.
///
/// Lines are trimmed and uppercased; blank lines are dropped, and with
/// [`PatternFilter::Exact`] so is any line holding a symbol outside `ACGTN`.
pub fn parse_patterns(text: &str, filter: PatternFilter) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().to_ascii_uppercase())
        .filter(|line| !line.is_empty())
        .filter(|line| match filter {
            PatternFilter::Exact => {
                let valid = alphabet::is_valid_sequence(line.as_bytes());
                if !valid {
                    tracing::debug!(pattern = %line, "skipping pattern outside the alphabet");
                }
                valid
            }
            PatternFilter::Gapped => true,
        })
        .collect()
}

/// Read a whole file as text, decompressing `.gz` files.
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(MultiGzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(io_err)?;
    Ok(text)
}

/// Load a FASTA file and concatenate all of its sequences.
pub fn load_fasta_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let records = parse_fasta(&read_text(path)?);
    let text: String = records.iter().map(|r| r.seq.as_str()).collect();
    tracing::debug!(
        path = %path.display(),
        records = records.len(),
        len = text.len(),
        "loaded FASTA"
    );
    Ok(text)
}

/// Load a FASTA file as separate records.
pub fn load_fasta(path: impl AsRef<Path>) -> Result<Vec<FastaRecord>> {
    Ok(parse_fasta(&read_text(path)?))
}

/// Load a pattern list; see [`parse_patterns`].
pub fn load_patterns(path: impl AsRef<Path>, filter: PatternFilter) -> Result<Vec<String>> {
    let path = path.as_ref();
    let patterns = parse_patterns(&read_text(path)?, filter);
    tracing::debug!(path = %path.display(), count = patterns.len(), "loaded patterns");
    Ok(patterns)
}
