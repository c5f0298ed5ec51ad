//! Index-addressed node storage shared by the mutable and frozen tries.
//!
//! Nodes are never removed, so a [`NodeId`] handed out by an arena stays
//! valid for the arena's whole lifetime. Dropping the arena drops every node
//! at once.

use std::fmt;

/// Index of a node within the arena of the trie that produced it.
///
/// A `NodeId` is only meaningful for the trie it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root is always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);

    /// Returns the arena slot this id refers to.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "node index overflow");
        NodeId(index as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A growable arena that hands out [`NodeId`]s instead of references.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeArena<T> {
    nodes: Vec<T>,
}

impl<T> NodeArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    /// Creates an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Stores a value and returns its id.
    pub fn alloc(&mut self, value: T) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(value);
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &T {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id.index()]
    }

    /// Returns the number of values allocated in this arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
