use super::node_arena::NodeId;

/// A compact representation of the outgoing edges of a [`TrieNode`] that doesn't
/// allocate until there are at least three edges.
///
/// Edges keep insertion order; lookups are a linear scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Children {
    /// No edges.
    #[default]
    None,
    /// Exactly one edge (label, child).
    One((u8, NodeId)),
    /// Exactly two edges (label1, child1, label2, child2).
    Two((u8, NodeId, u8, NodeId)),
    /// Three or more edges stored in a vector.
    Many(Vec<(u8, NodeId)>),
}

impl Children {
    /// Gets the edge at the specified index.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<(u8, NodeId)> {
        match self {
            Children::None => None,
            Children::One(edge) => match index {
                0 => Some(*edge),
                _ => None,
            },
            Children::Two((l1, n1, l2, n2)) => match index {
                0 => Some((*l1, *n1)),
                1 => Some((*l2, *n2)),
                _ => None,
            },
            Children::Many(edges) => edges.get(index).copied(),
        }
    }

    /// Returns the child reached through `label`, if any.
    #[inline]
    pub fn find(&self, label: u8) -> Option<NodeId> {
        match self {
            Children::None => None,
            Children::One((l, node)) => (*l == label).then_some(*node),
            Children::Two((l1, n1, l2, n2)) => {
                if label == *l1 {
                    Some(*n1)
                } else if label == *l2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            Children::Many(edges) => {
                // Unrolling by 2 exposes load-level parallelism and beats a scalar loop
                // on the short edge lists typical of natural-language tries.
                let chunks = edges.chunks_exact(2);
                let remainder = chunks.remainder();
                for chunk in chunks {
                    if chunk[0].0 == label {
                        return Some(chunk[0].1);
                    }
                    if chunk[1].0 == label {
                        return Some(chunk[1].1);
                    }
                }
                remainder
                    .iter()
                    .find(|&&(l, _)| l == label)
                    .map(|&(_, node)| node)
            }
        }
    }

    /// Appends an edge after the existing ones.
    ///
    /// The caller must have checked that `label` is not present yet.
    pub(crate) fn push(&mut self, label: u8, child: NodeId) {
        debug_assert!(self.find(label).is_none(), "push: label already exists");
        let edge = (label, child);
        match self {
            Children::None => *self = Children::One(edge),
            Children::One((l1, n1)) => *self = Children::Two((*l1, *n1, edge.0, edge.1)),
            Children::Two((l1, n1, l2, n2)) => {
                *self = Children::Many(vec![(*l1, *n1), (*l2, *n2), edge])
            }
            Children::Many(edges) => edges.push(edge),
        }
    }

    /// Returns the number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::One(_) => 1,
            Children::Two(_) => 2,
            Children::Many(edges) => edges.len(),
        }
    }

    /// True if there are no outgoing edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Children::None)
    }
}

/// A vertex of the mutable [`Trie`](super::owned::Trie).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrieNode {
    children: Children,
    value: Option<i32>,
}

impl TrieNode {
    /// Creates a non-terminal node without edges.
    pub fn new() -> Self {
        TrieNode::default()
    }

    /// The payload of a word ending here, `None` for non-terminal nodes.
    #[inline]
    pub fn value(&self) -> Option<i32> {
        self.value
    }

    /// True if this node corresponds to the end of a word.
    #[inline]
    pub fn is_word(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the edges of this node.
    #[inline]
    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Returns the child that `label`'s edge leads to, or `None` if no such edge exists.
    #[inline]
    pub fn get(&self, label: u8) -> Option<NodeId> {
        self.children.find(label)
    }

    /// Returns the number of edges.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub(crate) fn set_value(&mut self, value: Option<i32>) -> Option<i32> {
        std::mem::replace(&mut self.value, value)
    }

    pub(crate) fn push_child(&mut self, label: u8, child: NodeId) {
        self.children.push(label, child);
    }
}
