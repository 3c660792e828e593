//! Arena storage for automaton nodes.
//!
//! The node graph mixes forward trie edges with failure links that point back
//! towards the root (the root's own failure link is a self-loop). `NodeId` is
//! just an index (u32), so those back references are plain copies and never
//! own anything.

use smallvec::SmallVec;

/// Identifier of the pattern an output belongs to.
pub type PatternId = usize;

/// Most nodes one arena can hold; ids are `u32`.
pub const MAX_NODES: u64 = u32::MAX as u64 + 1;

/// A node identifier - an index into the arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root is always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);

    /// Id for arena slot `index`, or `None` past the `u32` id space.
    #[inline]
    pub fn from_index(index: usize) -> Option<NodeId> {
        u32::try_from(index).ok().map(NodeId)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of a node's output set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output<M> {
    /// Pattern that ends at this node.
    pub pattern: PatternId,
    /// Caller-supplied data attached at insertion.
    pub meta: M,
}

/// One automaton state.
#[derive(Clone, Debug)]
pub struct Node<M> {
    /// Children as (symbol, node) pairs, kept sorted by symbol.
    pub(crate) transitions: SmallVec<[(u8, NodeId); 4]>,
    /// Failure link. Meaningless until the automaton is built.
    pub(crate) fail: NodeId,
    /// Direct outputs first, then those inherited along the failure link.
    pub(crate) outputs: Vec<Output<M>>,
    /// Numeric id, assigned once by the build step.
    pub(crate) id: Option<u32>,
}

impl<M> Default for Node<M> {
    fn default() -> Self {
        Self {
            transitions: SmallVec::new(),
            fail: NodeId::ROOT,
            outputs: Vec::new(),
            id: None,
        }
    }
}

impl<M> Node<M> {
    /// Outgoing trie edges in symbol order.
    pub fn transitions(&self) -> &[(u8, NodeId)] {
        &self.transitions
    }

    /// Target of the transition on `symbol`, if any.
    #[inline]
    pub fn child(&self, symbol: u8) -> Option<NodeId> {
        self.transitions
            .iter()
            .find(|&&(s, _)| s == symbol)
            .map(|&(_, target)| target)
    }

    pub fn fail(&self) -> NodeId {
        self.fail
    }

    pub fn outputs(&self) -> &[Output<M>] {
        &self.outputs
    }

    /// Diagnostic id. `None` only while the automaton is still being built.
    pub fn id(&self) -> Option<u32> {
        self.id
    }
}

/// Arena owning every node of one automaton.
///
/// Nodes are allocated contiguously and referenced by `NodeId`. The arena is
/// never shrunk, so ids stay valid for its whole lifetime.
#[derive(Clone)]
pub struct NodeArena<M> {
    nodes: Vec<Node<M>>,
}

impl<M> std::fmt::Debug for NodeArena<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeArena")
            .field("nodes_count", &self.nodes.len())
            .finish()
    }
}

impl<M> Default for NodeArena<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> NodeArena<M> {
    /// Create an arena holding only the root.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::default());
        Self { nodes }
    }

    /// Allocate a new empty node, returning its id.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds [`MAX_NODES`] nodes.
    pub fn alloc(&mut self) -> NodeId {
        let Some(id) = NodeId::from_index(self.nodes.len()) else {
            panic!("node arena is full ({MAX_NODES} nodes)");
        };
        self.nodes.push(Node::default());
        id
    }

    /// Find or create the child of `parent` on `symbol`.
    pub fn get_or_create_child(&mut self, parent: NodeId, symbol: u8) -> NodeId {
        let children = &self.nodes[parent.index()].transitions;
        match children.binary_search_by_key(&symbol, |&(s, _)| s) {
            Ok(pos) => children[pos].1,
            Err(pos) => {
                let child = self.alloc();
                self.nodes[parent.index()]
                    .transitions
                    .insert(pos, (symbol, child));
                child
            }
        }
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node<M>> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the arena, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root is always present.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes paired with their ids, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<M>)> {
        self.nodes
            .iter()
            .enumerate()
            // `alloc` never hands out an index past the u32 range.
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node<M>] {
        &mut self.nodes
    }
}

impl<M> std::ops::Index<NodeId> for NodeArena<M> {
    type Output = Node<M>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

impl<M> std::ops::IndexMut<NodeId> for NodeArena<M> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_arena_has_root() {
        let arena: NodeArena<()> = NodeArena::new();
        assert_eq!(arena.len(), 1);
        assert!(!arena.is_empty());
        assert!(arena[NodeId::ROOT].transitions().is_empty());
        assert_eq!(arena[NodeId::ROOT].fail(), NodeId::ROOT);
    }

    #[test]
    fn test_arena_alloc() {
        let mut arena: NodeArena<()> = NodeArena::new();
        let id1 = arena.alloc();
        let id2 = arena.alloc();

        assert_eq!(id1.index(), 1);
        assert_eq!(id2.index(), 2);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_node_id_range() {
        assert_eq!(NodeId::from_index(0), Some(NodeId::ROOT));
        assert_eq!(NodeId::from_index(7).map(NodeId::index), Some(7));
        assert_eq!(
            NodeId::from_index(u32::MAX as usize).map(NodeId::index),
            Some(u32::MAX as usize)
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_node_id_past_u32_rejected() {
        assert_eq!(NodeId::from_index(u32::MAX as usize + 1), None);
        assert_eq!(NodeId::from_index(usize::MAX), None);
    }

    #[test]
    fn test_children_sorted_and_reused() {
        let mut arena: NodeArena<()> = NodeArena::new();
        let t = arena.get_or_create_child(NodeId::ROOT, b'T');
        let a = arena.get_or_create_child(NodeId::ROOT, b'A');
        let again = arena.get_or_create_child(NodeId::ROOT, b'T');

        assert_eq!(t, again);
        assert_eq!(arena.len(), 3);
        let symbols: Vec<u8> = arena[NodeId::ROOT]
            .transitions()
            .iter()
            .map(|&(s, _)| s)
            .collect();
        assert_eq!(symbols, b"AT");
        assert_eq!(arena[NodeId::ROOT].child(b'A'), Some(a));
        assert_eq!(arena[NodeId::ROOT].child(b'G'), None);
    }

    #[test]
    fn test_failure_link_cycle() {
        // A failure link pointing back at the root is just an index copy.
        let mut arena: NodeArena<()> = NodeArena::new();
        let child = arena.get_or_create_child(NodeId::ROOT, b'C');
        arena[child].fail = NodeId::ROOT;
        arena[NodeId::ROOT].fail = NodeId::ROOT;

        assert_eq!(arena[child].fail(), NodeId::ROOT);
        assert_eq!(arena[NodeId::ROOT].fail(), NodeId::ROOT);
    }
}
