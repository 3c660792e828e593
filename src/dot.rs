//! Graphviz export of an automaton.
//!
//! Transitions are drawn as solid labelled edges, failure links as dashed gray
//! edges labelled `f`. Large automata are cut at `max_nodes`: only nodes below
//! that id, and edges between them, are written.

use std::io::{self, Write};

use crate::automaton::Automaton;

/// Node cap used unless told otherwise.
pub const DEFAULT_MAX_NODES: usize = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotOptions {
    pub max_nodes: usize,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Write `automaton` as a DOT digraph.
pub fn write_dot<M, W: Write>(
    automaton: &Automaton<M>,
    mut out: W,
    options: DotOptions,
) -> io::Result<()> {
    let limit = automaton.node_count().min(options.max_nodes);
    let shown = || automaton.nodes().take(limit);

    writeln!(out, "digraph aho {{")?;
    writeln!(out, "  rankdir=LR;")?;
    writeln!(out, "  node [shape=circle,fontname=Helvetica];")?;

    for (id, node) in shown() {
        let outputs = node.outputs().len();
        if outputs > 0 {
            writeln!(
                out,
                "  n{id} [label=\"{id}\\nout={outputs}\",style=filled,fillcolor=lightblue];"
            )?;
        } else {
            writeln!(out, "  n{id} [label=\"{id}\"];")?;
        }
    }

    for (id, node) in shown() {
        for &(symbol, next) in node.transitions() {
            if next.index() < limit {
                writeln!(out, "  n{id} -> n{next} [label=\"{}\"];", symbol as char)?;
            }
        }
    }

    for (id, node) in shown() {
        let fail = node.fail();
        if !id.is_root() && fail.index() < limit {
            writeln!(out, "  n{id} -> n{fail} [style=dashed,color=gray,label=\"f\"];")?;
        }
    }

    writeln!(out, "}}")?;
    out.flush()
}

/// Render `automaton` as a DOT string.
pub fn to_dot<M>(automaton: &Automaton<M>, options: DotOptions) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_dot(automaton, &mut buf, options);
    String::from_utf8_lossy(&buf).into_owned()
}
