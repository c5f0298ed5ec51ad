use super::node_arena::NodeId;

/// Read-only view of a trie as a deterministic automaton over byte labels.
///
/// Implemented by both the mutable [`Trie`](super::owned::Trie) and the
/// [`FrozenTrie`](super::frozen::FrozenTrie), so lookups, split finding,
/// the walker and serialization work the same way on either.
pub trait Automaton {
    /// The start state.
    fn root(&self) -> NodeId;

    /// Follows the edge labelled `label` out of `node`, if there is one.
    fn transition(&self, node: NodeId, label: u8) -> Option<NodeId>;

    /// The payload of the word ending at `node`, `None` if it is non-terminal.
    fn value(&self, node: NodeId) -> Option<i32>;

    /// Number of outgoing edges of `node`.
    fn edge_count(&self, node: NodeId) -> usize;

    /// The `index`-th outgoing edge of `node` in edge order.
    fn edge(&self, node: NodeId, index: usize) -> Option<(u8, NodeId)>;
}

/// An iterator over the outgoing edges of a node, in edge order.
#[derive(Clone)]
pub struct Edges<'a, A: Automaton + ?Sized> {
    automaton: &'a A,
    node: NodeId,
    index: usize,
    len: usize,
}

/// Returns an iterator over the `(label, child)` pairs leaving `node`.
pub fn edges<A: Automaton + ?Sized>(automaton: &A, node: NodeId) -> Edges<'_, A> {
    Edges {
        automaton,
        node,
        index: 0,
        len: automaton.edge_count(node),
    }
}

impl<A: Automaton + ?Sized> Iterator for Edges<'_, A> {
    type Item = (u8, NodeId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let edge = self.automaton.edge(self.node, self.index);
        self.index += 1;
        edge
    }

    /// Since we know the exact size, we can do better than the default implementation.
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<A: Automaton + ?Sized> ExactSizeIterator for Edges<'_, A> {}

/// Returns every word stored in the automaton with its value, depth-first in
/// edge order.
pub fn words<A: Automaton + ?Sized>(automaton: &A) -> Vec<(Vec<u8>, i32)> {
    let mut words = Vec::new();
    let mut prefix = Vec::new();
    // (node, depth of node, label leading to it)
    let mut stack = vec![(automaton.root(), 0usize, None)];
    while let Some((node, depth, label)) = stack.pop() {
        prefix.truncate(depth.saturating_sub(1));
        if let Some(label) = label {
            prefix.push(label);
        }
        if let Some(value) = automaton.value(node) {
            words.push((prefix.clone(), value));
        }
        let children: Vec<_> = edges(automaton, node).collect();
        for (label, child) in children.into_iter().rev() {
            stack.push((child, depth + 1, Some(label)));
        }
    }
    words
}
