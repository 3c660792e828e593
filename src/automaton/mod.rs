//! Aho–Corasick automaton over the nucleotide alphabet
//!
//! The key components are:
//!
//! - `NodeArena`: index-addressed storage owning every node
//! - `AutomatonBuilder`: the open trie, accepting insertions
//! - `Automaton`: the frozen result of `AutomatonBuilder::build`
//! - `Scanner` / `Matches`: per-search state driving a text through it
//!
//! # Module Organization
//!
//! - `arena`: Core data structures (NodeId, Node, Output, NodeArena)
//! - `trie`: Insertion, failure-link construction and output propagation
//! - `scanner`: Counting, detailed and streaming search
//! - `thread_safe`: Growable automaton with lock-free readers (SharedAutomaton)

mod arena;
mod scanner;
mod thread_safe;
mod trie;

// Re-export from arena
pub use arena::{Node, NodeArena, NodeId, Output, PatternId, MAX_NODES};

// Re-export from trie
pub use trie::{Automaton, AutomatonBuilder};

// Re-export from scanner
pub use scanner::{Match, Matches, Scanner};

// Re-export from thread_safe
pub use thread_safe::SharedAutomaton;
