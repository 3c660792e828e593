//! Trie construction and the one-time build step.
//!
//! Patterns are inserted into an arena trie through [`AutomatonBuilder`].
//! [`AutomatonBuilder::build`] consumes the builder, computes failure links
//! breadth-first with an explicit queue, propagates output sets along them
//! and hands back a frozen [`Automaton`]. Since the builder is gone after
//! that, inserting into a built automaton cannot be expressed.

use std::collections::VecDeque;

use super::arena::{Node, NodeArena, NodeId, Output, PatternId};

/// An automaton still open for insertion.
#[derive(Clone, Debug)]
pub struct AutomatonBuilder<M = ()> {
    arena: NodeArena<M>,
    patterns: usize,
}

impl<M> Default for AutomatonBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> AutomatonBuilder<M> {
    /// Create a builder holding only the root.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            patterns: 0,
        }
    }

    /// Create a builder with room for `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(nodes),
            patterns: 0,
        }
    }

    /// Insert a pattern.
    ///
    /// Walks/creates the trie path one symbol at a time and appends
    /// `(id, meta)` to the output set of the final node. Symbols are not
    /// checked against the alphabet here; anything outside it simply never
    /// matches at scan time. Empty patterns are ignored.
    pub fn insert(&mut self, pattern: impl AsRef<[u8]>, id: PatternId, meta: M) {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            tracing::debug!(pattern = id, "ignoring empty pattern");
            return;
        }

        let mut node = NodeId::ROOT;
        for &symbol in pattern {
            node = self.arena.get_or_create_child(node, symbol);
        }

        self.arena[node].outputs.push(Output { pattern: id, meta });
        self.patterns += 1;
    }

    /// Number of patterns inserted so far (empty ones excluded).
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    /// Number of trie nodes allocated so far, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }
}

impl<M: Clone> AutomatonBuilder<M> {
    /// Compute failure links and output propagation, then freeze.
    pub fn build(mut self) -> Automaton<M> {
        let arena = &mut self.arena;
        let mut queue: VecDeque<NodeId> = VecDeque::with_capacity(arena.len());

        arena[NodeId::ROOT].fail = NodeId::ROOT;
        for &(_, child) in arena[NodeId::ROOT].transitions.iter() {
            queue.push_back(child);
        }
        for &child in &queue {
            arena[child].fail = NodeId::ROOT;
        }

        while let Some(r) = queue.pop_front() {
            let r_fail = arena[r].fail;

            for i in 0..arena[r].transitions.len() {
                let (symbol, u) = arena[r].transitions[i];
                queue.push_back(u);

                // Longest proper suffix that can be extended by `symbol`
                let mut v = r_fail;
                while !v.is_root() && arena[v].child(symbol).is_none() {
                    v = arena[v].fail;
                }
                let fail = arena[v].child(symbol).unwrap_or(NodeId::ROOT);
                arena[u].fail = fail;

                // `fail` is strictly shallower than `u`, so its output set is
                // already complete.
                if !arena[fail].outputs.is_empty() {
                    let inherited = arena[fail].outputs.clone();
                    arena[u].outputs.extend(inherited);
                }
            }
        }

        // Indices come from `alloc`, so they fit in u32.
        for (i, node) in arena.nodes_mut().iter_mut().enumerate() {
            node.id = Some(i as u32);
        }

        tracing::debug!(
            nodes = self.arena.len(),
            patterns = self.patterns,
            "built automaton"
        );

        Automaton {
            arena: self.arena,
            patterns: self.patterns,
        }
    }
}

impl<M, P: AsRef<[u8]>> Extend<(P, PatternId, M)> for AutomatonBuilder<M> {
    fn extend<I: IntoIterator<Item = (P, PatternId, M)>>(&mut self, iter: I) {
        for (pattern, id, meta) in iter {
            self.insert(pattern, id, meta);
        }
    }
}

/// A built, immutable automaton.
///
/// Searching never mutates it, so one automaton can serve any number of
/// searches, including from several threads at once.
#[derive(Clone, Debug)]
pub struct Automaton<M = ()> {
    pub(crate) arena: NodeArena<M>,
    patterns: usize,
}

impl Automaton<()> {
    /// Build an automaton over plain patterns, numbering them in order.
    pub fn from_patterns<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut builder = AutomatonBuilder::new();
        for (id, pattern) in patterns.into_iter().enumerate() {
            builder.insert(pattern, id, ());
        }
        builder.build()
    }
}

impl<M> Automaton<M> {
    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of (non-empty) patterns indexed.
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    /// True if no pattern was indexed; such an automaton matches nothing.
    pub fn is_empty(&self) -> bool {
        self.patterns == 0
    }

    pub fn root(&self) -> &Node<M> {
        &self.arena[NodeId::ROOT]
    }

    /// All nodes in id order, for diagnostics.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<M>)> {
        self.arena.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Follow trie edges from the root.
    fn walk<M>(automaton: &Automaton<M>, path: &[u8]) -> NodeId {
        let mut node = NodeId::ROOT;
        for &symbol in path {
            node = automaton.arena[node]
                .child(symbol)
                .unwrap_or_else(|| panic!("no edge on {}", symbol as char));
        }
        node
    }

    #[test]
    fn test_shared_prefix() {
        let mut builder = AutomatonBuilder::new();
        builder.insert("ACGT", 0, ());
        builder.insert("ACGA", 1, ());

        // root + A, C, G shared + T, A leaves
        assert_eq!(builder.node_count(), 6);
        assert_eq!(builder.pattern_count(), 2);
    }

    #[test]
    fn test_empty_pattern_ignored() {
        let mut builder: AutomatonBuilder = AutomatonBuilder::new();
        builder.insert("", 0, ());
        let automaton = builder.build();

        assert!(automaton.is_empty());
        assert_eq!(automaton.node_count(), 1);
        assert!(automaton.root().outputs().is_empty());
    }

    #[test]
    fn test_root_fails_to_itself() {
        let automaton = Automaton::from_patterns(["AC"]);
        assert_eq!(automaton.root().fail(), NodeId::ROOT);
    }

    #[test]
    fn test_failure_links_longest_suffix() {
        // Classic example over the DNA alphabet: ACA, CAT, AT
        let automaton = Automaton::from_patterns(["ACA", "CAT", "AT"]);

        let aca = walk(&automaton, b"ACA");
        let ca = walk(&automaton, b"CA");
        let a = walk(&automaton, b"A");
        let c = walk(&automaton, b"C");
        let ac = walk(&automaton, b"AC");
        let cat = walk(&automaton, b"CAT");
        let at = walk(&automaton, b"AT");

        assert_eq!(automaton.arena[a].fail(), NodeId::ROOT);
        assert_eq!(automaton.arena[c].fail(), NodeId::ROOT);
        assert_eq!(automaton.arena[ac].fail(), c);
        assert_eq!(automaton.arena[aca].fail(), ca);
        assert_eq!(automaton.arena[ca].fail(), a);
        assert_eq!(automaton.arena[cat].fail(), at);
    }

    #[test]
    fn test_output_propagation_keeps_direct_outputs_first() {
        let automaton = Automaton::from_patterns(["CAT", "AT", "T"]);
        let cat = walk(&automaton, b"CAT");

        let ids: Vec<PatternId> = automaton.arena[cat]
            .outputs()
            .iter()
            .map(|o| o.pattern)
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_ids_assigned_in_arena_order() {
        let automaton = Automaton::from_patterns(["GATTACA", "TACA"]);
        for (i, (id, node)) in automaton.nodes().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(node.id(), Some(i as u32));
        }
    }

    #[test]
    fn test_builder_ids_unassigned() {
        let mut builder = AutomatonBuilder::new();
        builder.insert("AC", 0, ());
        assert!(builder.arena.iter().all(|(_, node)| node.id().is_none()));
    }

    #[test]
    fn test_extend() {
        let mut builder: AutomatonBuilder<u8> = AutomatonBuilder::new();
        builder.extend([("AC", 0, 7u8), ("CG", 1, 9u8)]);
        let automaton = builder.build();
        assert_eq!(automaton.pattern_count(), 2);

        let ac = walk(&automaton, b"AC");
        assert_eq!(automaton.arena[ac].outputs()[0].meta, 7);
    }

    #[test]
    fn test_deep_pattern_builds_without_recursion() {
        let long = "ACGT".repeat(10_000);
        let automaton = Automaton::from_patterns([long.as_str(), "GTAC"]);
        assert_eq!(automaton.pattern_count(), 2);
        assert!(automaton.node_count() > 40_000);
    }
}
