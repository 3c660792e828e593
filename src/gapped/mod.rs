//! Gapped pattern search.
//!
//! Patterns such as `AC..GT{4}TTA` are split into literal seeds, all seeds of
//! all patterns are indexed in one [`Automaton`], and the text is scanned
//! once. Every seed hit fixes a candidate start for its pattern, which is then
//! confirmed by replaying the pattern's tokens against the text.
//!
//! ```
//! use motifscan::gapped::search_with_gaps;
//!
//! // Both seeds, `AC` and `GT`, confirm the same occurrence.
//! let found = search_with_gaps("ACXGT", &["AC.GT"], 2).unwrap();
//! assert_eq!(found[&0], vec![(0, 5), (0, 5)]);
//! ```

mod parser;
mod seeds;

pub use parser::{parse_gapped_pattern, GapParseError, GappedPattern, Token};
pub use seeds::{extract_seeds, Seed};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::automaton::{Automaton, AutomatonBuilder, PatternId};
use crate::config::SearchConfig;
use crate::error::{Error, Result};

/// Where a seed sits inside its pattern; attached to every seed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedMeta {
    /// Offset of the seed from the pattern start.
    pub offset: usize,
    /// Seed length.
    pub len: usize,
}

/// Half-open `(start, end)` text interval of one occurrence.
pub type Interval = (usize, usize);

/// Verified occurrences keyed by pattern index. Patterns that never matched
/// have no entry.
pub type GappedMatches = FxHashMap<PatternId, Vec<Interval>>;

/// Seed automaton plus the parsed patterns it verifies against.
#[derive(Debug, Clone)]
pub struct GappedMatcher {
    patterns: Vec<GappedPattern>,
    automaton: Automaton<SeedMeta>,
    unindexed: Vec<PatternId>,
    config: SearchConfig,
}

impl GappedMatcher {
    /// Parse `patterns` and build the seed automaton.
    ///
    /// Fails on the first malformed pattern; nothing is built in that case.
    pub fn new<S: AsRef<str>>(patterns: &[S], config: SearchConfig) -> Result<Self> {
        let parsed = patterns
            .iter()
            .enumerate()
            .map(|(index, p)| {
                parse_gapped_pattern(p.as_ref()).map_err(|source| Error::Parse { index, source })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parsed(parsed, config))
    }

    /// Build the seed automaton over already parsed patterns.
    pub fn from_parsed(patterns: Vec<GappedPattern>, config: SearchConfig) -> Self {
        let config = config.min_seed_len(config.min_seed_len);
        let mut builder = AutomatonBuilder::new();
        let mut unindexed = Vec::new();
        let mut seed_count = 0;

        for (id, pattern) in patterns.iter().enumerate() {
            let seeds = extract_seeds(pattern, config.min_seed_len);
            if seeds.is_empty() {
                tracing::debug!(pattern = id, "pattern has no literal content, not indexed");
                unindexed.push(id);
                continue;
            }
            for seed in &seeds {
                builder.insert(
                    seed.literal,
                    id,
                    SeedMeta {
                        offset: seed.offset,
                        len: seed.len(),
                    },
                );
            }
            seed_count += seeds.len();
        }

        let automaton = builder.build();
        tracing::debug!(
            patterns = patterns.len(),
            seeds = seed_count,
            unindexed = unindexed.len(),
            nodes = automaton.node_count(),
            min_seed_len = config.min_seed_len,
            "prepared gapped matcher"
        );

        Self {
            patterns,
            automaton,
            unindexed,
            config,
        }
    }

    pub fn patterns(&self) -> &[GappedPattern] {
        &self.patterns
    }

    /// The seed automaton.
    pub fn automaton(&self) -> &Automaton<SeedMeta> {
        &self.automaton
    }

    /// Patterns without literal content; they can never match.
    pub fn unindexed(&self) -> &[PatternId] {
        &self.unindexed
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find every verified occurrence of every pattern.
    ///
    /// Every seed hit that verifies adds one interval, so a pattern with
    /// several seeds lists the same occurrence once per seed unless
    /// [`SearchConfig::dedup_intervals`] is set. Intervals are listed per
    /// pattern in the order they were confirmed, which follows the end
    /// position of the confirming seed.
    pub fn search<T: AsRef<[u8]> + ?Sized>(&self, text: &T) -> GappedMatches {
        let text = text.as_ref();
        let mut found = GappedMatches::default();
        let mut seen: FxHashSet<(PatternId, usize)> = FxHashSet::default();
        let mut rejected = 0usize;

        for hit in self.automaton.search_stream(text) {
            let id = hit.pattern();
            let Some(start) = self.anchor(hit.end, hit.meta()) else {
                rejected += 1;
                continue;
            };
            let pattern = &self.patterns[id];
            if !pattern.matches_at(text, start) {
                tracing::trace!(pattern = id, start, "seed hit failed verification");
                rejected += 1;
                continue;
            }
            if self.config.dedup_intervals && !seen.insert((id, start)) {
                continue;
            }
            found
                .entry(id)
                .or_default()
                .push((start, start + pattern.span()));
        }

        tracing::debug!(
            text_len = text.len(),
            matched_patterns = found.len(),
            rejected,
            "gapped search finished"
        );
        found
    }

    /// Total number of verified occurrences.
    pub fn count<T: AsRef<[u8]> + ?Sized>(&self, text: &T) -> usize {
        self.search(text).values().map(Vec::len).sum()
    }

    /// Candidate pattern start for a seed hit ending at `end`, or `None` if the
    /// pattern would begin before the text does.
    #[inline]
    fn anchor(&self, end: usize, seed: &SeedMeta) -> Option<usize> {
        (end + 1).checked_sub(seed.len + seed.offset)
    }
}

/// Parse, index and search in one go.
pub fn search_with_gaps<T, S>(text: &T, patterns: &[S], min_seed_len: usize) -> Result<GappedMatches>
where
    T: AsRef<[u8]> + ?Sized,
    S: AsRef<str>,
{
    let matcher = GappedMatcher::new(patterns, SearchConfig::with_min_seed_len(min_seed_len))?;
    Ok(matcher.search(text))
}
