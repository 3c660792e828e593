//! Seed extraction from gapped patterns.
//!
//! Seeds are the literal runs used to index a gapped pattern in the
//! automaton. Each remembers where it sits inside its pattern so a seed hit
//! can be turned back into a candidate pattern start.

use smallvec::SmallVec;

use super::parser::{GappedPattern, Token};

/// A literal run of a pattern together with its offset from the pattern start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed<'p> {
    pub literal: &'p [u8],
    pub offset: usize,
}

impl Seed<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.literal.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literal.is_empty()
    }
}

/// Extract the seeds that will index `pattern`.
///
/// Every literal run of at least `min_seed_len` symbols is a seed. When none
/// qualifies, the first non-empty literal run is used whatever its length, so
/// any pattern with literal content gets indexed. A pattern made only of gaps
/// yields no seeds.
///
/// Offsets are prefix sums of the token spans, so none exceeds
/// [`GappedPattern::span`].
pub fn extract_seeds(pattern: &GappedPattern, min_seed_len: usize) -> SmallVec<[Seed<'_>; 2]> {
    let mut seeds = SmallVec::new();
    let mut fallback = None;
    let mut offset = 0;

    for token in pattern.tokens() {
        if let Token::Literal(run) = token {
            let seed = Seed {
                literal: run,
                offset,
            };
            if run.len() >= min_seed_len && !run.is_empty() {
                seeds.push(seed);
            } else if fallback.is_none() && !run.is_empty() {
                fallback = Some(seed);
            }
        }
        offset += token.span();
    }

    if seeds.is_empty() {
        seeds.extend(fallback);
    }
    seeds
}
