//! Shared automaton that accepts new patterns while others search.
//!
//! A built [`Automaton`] is already `Send + Sync` and can be searched from
//! many threads through an `Arc`. [`SharedAutomaton`] adds growth on top:
//! pattern addition is serialized via a mutex and every addition publishes a
//! freshly built automaton atomically, while searching is lock-free and always
//! sees a complete automaton.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use super::arena::PatternId;
use super::trie::{Automaton, AutomatonBuilder};

/// Patterns accumulated so far (protected by mutex).
struct BuildState<M> {
    patterns: Vec<(Box<[u8]>, PatternId, M)>,
    nodes_hint: usize,
}

impl<M: Clone> BuildState<M> {
    fn rebuild(&mut self) -> Automaton<M> {
        let mut builder = AutomatonBuilder::with_capacity(self.nodes_hint);
        for (pattern, id, meta) in &self.patterns {
            builder.insert(pattern, *id, meta.clone());
        }
        let automaton = builder.build();
        self.nodes_hint = automaton.node_count();
        automaton
    }
}

/// Thread-safe, growable automaton.
///
/// See `tests::test_shared_automaton_concurrent_readers` for usage example.
pub struct SharedAutomaton<M = ()> {
    /// The frozen automaton - atomically swappable, lock-free reads
    current: ArcSwap<Automaton<M>>,
    /// Mutex protecting pattern building
    build_lock: Mutex<BuildState<M>>,
}

impl<M: Clone> Default for SharedAutomaton<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> SharedAutomaton<M> {
    /// Create an empty shared automaton; it matches nothing until patterns
    /// are added.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(AutomatonBuilder::new().build()),
            build_lock: Mutex::new(BuildState {
                patterns: Vec::new(),
                nodes_hint: 1,
            }),
        }
    }

    /// Add one pattern and publish the rebuilt automaton.
    ///
    /// Thread-safe but serialized: only one addition runs at a time.
    pub fn insert(&self, pattern: impl AsRef<[u8]>, id: PatternId, meta: M) {
        self.extend([(pattern, id, meta)]);
    }

    /// Add a batch of patterns with a single rebuild.
    pub fn extend<I, P>(&self, patterns: I)
    where
        I: IntoIterator<Item = (P, PatternId, M)>,
        P: AsRef<[u8]>,
    {
        let mut state = self.build_lock.lock();
        let before = state.patterns.len();
        state.patterns.extend(
            patterns
                .into_iter()
                .map(|(p, id, meta)| (Box::from(p.as_ref()), id, meta)),
        );
        if state.patterns.len() == before {
            return;
        }

        let automaton = state.rebuild();
        tracing::debug!(
            added = state.patterns.len() - before,
            total = state.patterns.len(),
            "published rebuilt automaton"
        );
        self.current.store(Arc::new(automaton));
    }

    /// The automaton currently published.
    ///
    /// The snapshot stays valid (and unchanged) even if patterns are added
    /// afterwards.
    pub fn snapshot(&self) -> Arc<Automaton<M>> {
        self.current.load_full()
    }

    /// Count occurrences against the current automaton. Lock-free.
    pub fn search<T: AsRef<[u8]> + ?Sized>(&self, text: &T) -> usize {
        self.current.load().search(text)
    }

    pub fn pattern_count(&self) -> usize {
        self.current.load().pattern_count()
    }
}
