//! Streaming search over a built automaton.
//!
//! All per-search state (current node, pending outputs) lives in a
//! [`Scanner`] or a [`Matches`] iterator created for that search, never in the
//! automaton itself.

use std::iter::FusedIterator;

use crate::alphabet;

use super::arena::{NodeId, Output, PatternId};
use super::trie::Automaton;

/// One reported occurrence.
#[derive(Debug, PartialEq, Eq)]
pub struct Match<'a, M> {
    /// Text index of the last symbol of the occurrence.
    pub end: usize,
    /// The output entry that fired.
    pub output: &'a Output<M>,
}

impl<M> Clone for Match<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Match<'_, M> {}

impl<'a, M> Match<'a, M> {
    #[inline]
    pub fn pattern(&self) -> PatternId {
        self.output.pattern
    }

    #[inline]
    pub fn meta(&self) -> &'a M {
        &self.output.meta
    }
}

/// Step-at-a-time driver for an automaton.
#[derive(Debug)]
pub struct Scanner<'a, M> {
    automaton: &'a Automaton<M>,
    state: NodeId,
}

impl<M> Clone for Scanner<'_, M> {
    fn clone(&self) -> Self {
        Self {
            automaton: self.automaton,
            state: self.state,
        }
    }
}

impl<'a, M> Scanner<'a, M> {
    pub fn new(automaton: &'a Automaton<M>) -> Self {
        Self {
            automaton,
            state: NodeId::ROOT,
        }
    }

    /// Current node.
    pub fn state(&self) -> NodeId {
        self.state
    }

    /// Back to the root, forgetting any partial match.
    pub fn reset(&mut self) {
        self.state = NodeId::ROOT;
    }

    /// Consume one symbol and return the outputs of the state reached.
    ///
    /// A symbol outside the alphabet is a hard reset: the state goes back to
    /// the root without consulting any transition and nothing is reported.
    #[inline]
    pub fn step(&mut self, symbol: u8) -> &'a [Output<M>] {
        if !alphabet::is_symbol(symbol) {
            self.state = NodeId::ROOT;
            return &[];
        }

        let arena = &self.automaton.arena;
        let mut node = self.state;
        loop {
            if let Some(next) = arena[node].child(symbol) {
                node = next;
                break;
            }
            if node.is_root() {
                break;
            }
            node = arena[node].fail;
        }

        self.state = node;
        &arena[node].outputs
    }
}

/// Lazy sequence of matches produced by [`Automaton::search_stream`].
///
/// Finite and single-use: it ends with the text and cannot be restarted.
pub struct Matches<'a, 't, M> {
    scanner: Scanner<'a, M>,
    text: &'t [u8],
    pos: usize,
    pending: std::slice::Iter<'a, Output<M>>,
    pending_end: usize,
}

impl<'a, M> Iterator for Matches<'a, '_, M> {
    type Item = Match<'a, M>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(output) = self.pending.next() {
                return Some(Match {
                    end: self.pending_end,
                    output,
                });
            }

            let &symbol = self.text.get(self.pos)?;
            self.pending = self.scanner.step(symbol).iter();
            self.pending_end = self.pos;
            self.pos += 1;
        }
    }
}

impl<M> FusedIterator for Matches<'_, '_, M> {}

impl<M> Automaton<M> {
    /// Start a step-at-a-time scan.
    pub fn scanner(&self) -> Scanner<'_, M> {
        Scanner::new(self)
    }

    /// Count every occurrence of every pattern in `text`.
    pub fn search<T: AsRef<[u8]> + ?Sized>(&self, text: &T) -> usize {
        let mut scanner = self.scanner();
        text.as_ref()
            .iter()
            .map(|&symbol| scanner.step(symbol).len())
            .sum()
    }

    /// Count and list every occurrence, in scan order.
    ///
    /// Matches ending at the same position come in output-set order: the
    /// node's direct outputs first, then those inherited along its failure
    /// chain.
    pub fn search_detailed<T: AsRef<[u8]> + ?Sized>(
        &self,
        text: &T,
    ) -> (usize, Vec<Match<'_, M>>) {
        let matches: Vec<_> = self.search_stream(text).collect();
        (matches.len(), matches)
    }

    /// Iterate occurrences lazily.
    pub fn search_stream<'t, T: AsRef<[u8]> + ?Sized>(
        &self,
        text: &'t T,
    ) -> Matches<'_, 't, M> {
        Matches {
            scanner: self.scanner(),
            text: text.as_ref(),
            pos: 0,
            pending: Default::default(),
            pending_end: 0,
        }
    }

    /// True if at least one pattern occurs in `text`.
    pub fn is_match<T: AsRef<[u8]> + ?Sized>(&self, text: &T) -> bool {
        self.search_stream(text).next().is_some()
    }
}
