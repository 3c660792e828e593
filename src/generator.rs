//! Random motif generation for benchmarks and tests.

use rand::seq::index;
use rand::Rng;

/// Marker written over positions turned into gaps.
pub const GAP: u8 = b'.';

/// Cut `count` motifs of `length` symbols from random positions of `text`.
///
/// With a positive `gap_fraction`, that fraction of each motif's positions
/// (rounded down, but at least one) is replaced by `.`. Texts shorter than
/// `length + 1` yield no motifs.
pub fn generate_patterns<R: Rng>(
    text: &[u8],
    count: usize,
    length: usize,
    gap_fraction: f64,
    rng: &mut R,
) -> Vec<String> {
    if text.len() <= length {
        tracing::warn!(text_len = text.len(), length, "text too short to cut motifs from");
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let start = rng.random_range(0..text.len() - length);
            let mut motif = text[start..start + length].to_vec();
            add_gaps(&mut motif, gap_fraction, rng);
            String::from_utf8_lossy(&motif).into_owned()
        })
        .collect()
}

/// Overwrite a random `gap_fraction` of `motif` with [`GAP`].
pub fn add_gaps<R: Rng>(motif: &mut [u8], gap_fraction: f64, rng: &mut R) {
    if gap_fraction <= 0.0 || motif.is_empty() {
        return;
    }
    let wanted = ((motif.len() as f64 * gap_fraction) as usize).max(1);
    for i in index::sample(rng, motif.len(), wanted.min(motif.len())) {
        motif[i] = GAP;
    }
}
