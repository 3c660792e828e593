//! motifscan: multi-pattern search over DNA sequences
//!
//! Two matchers share one Aho–Corasick core:
//!
//! - [`Automaton`] finds every occurrence of a set of exact patterns in a
//!   single pass over the text.
//! - [`GappedMatcher`] handles patterns with fixed-length gaps
//!   (`AC..GT`, `AC{12}GT`) by indexing their literal seeds and verifying
//!   each seed hit.
//!
//! ```
//! use motifscan::{Automaton, GappedMatcher, SearchConfig};
//!
//! let exact = Automaton::from_patterns(["AC", "CG"]);
//! assert_eq!(exact.search("ACG"), 2);
//!
//! let gapped = GappedMatcher::new(&["AC.GT"], SearchConfig::with_min_seed_len(2)).unwrap();
//! assert_eq!(gapped.search("TTACAGT")[&0], vec![(2, 7), (2, 7)]);
//! ```
//!
//! Around the core sit FASTA loading ([`fasta`]), Graphviz export ([`dot`]),
//! a greedy sequence differ ([`mutations`]) and a motif generator
//! ([`generator`]).

pub mod alphabet;
pub mod automaton;
pub mod config;
pub mod dot;
mod error;
pub mod fasta;
pub mod gapped;
pub mod generator;
pub mod mutations;

pub use automaton::{
    Automaton, AutomatonBuilder, Match, Matches, NodeId, PatternId, Scanner, SharedAutomaton,
};
pub use config::SearchConfig;
pub use error::{Error, Result};
pub use gapped::{search_with_gaps, GapParseError, GappedMatcher, GappedMatches, GappedPattern};
