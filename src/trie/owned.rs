use super::automaton::Automaton;
use super::builder::{check_labels, IntoWord};
use super::children::TrieNode;
use super::error::TrieError;
use super::lookup::{find_prefixes, find_word, PrefixTrace, WordMatch};
use super::node_arena::{NodeArena, NodeId};
use super::EMPTY_VALUE;

/// A mutable trie that owns all of its nodes.
///
/// Nodes live in an internal arena and are addressed by [`NodeId`]. Words are
/// only ever added, so ids stay valid for the life of the trie; dropping the
/// trie releases every node together.
///
/// # Examples
///
/// ```
/// use chartrie::trie::{Trie, WordMatch};
///
/// let mut trie = Trie::new();
/// let node = trie.insert("CAKE").unwrap();
/// trie.set_value(node, 7).unwrap();
///
/// assert_eq!(trie.find_word("CAKE"), WordMatch::Found(7));
/// assert_eq!(trie.find_word("CAR"), WordMatch::Missing { matched: 2 });
/// assert!(!trie.contains("CA"));
/// ```
#[derive(Clone, Debug)]
pub struct Trie {
    arena: NodeArena<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Trie::new()
    }
}

impl Trie {
    /// Creates a trie holding only a non-terminal root.
    pub fn new() -> Self {
        let mut arena = NodeArena::new();
        arena.alloc(TrieNode::new());
        Trie { arena }
    }

    /// Returns the id of the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this trie.
    #[inline]
    pub fn node(&self, id: NodeId) -> &TrieNode {
        self.arena.get(id)
    }

    /// Walks `word` from the root, creating missing edges, and returns the
    /// node reached after the last byte.
    ///
    /// New edges are appended after a node's existing ones. The reached node's
    /// value is left untouched; assign one with [`set_value`](Trie::set_value).
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::NulLabel`] if the word contains a zero byte. The trie
    /// is not modified in that case.
    pub fn insert(&mut self, word: impl IntoWord) -> Result<NodeId, TrieError> {
        let word = word.collect_word();
        check_labels(&word)?;

        let mut current = self.root();
        for &label in word.iter() {
            current = match self.arena.get(current).get(label) {
                Some(child) => child,
                None => {
                    let child = self.arena.alloc(TrieNode::new());
                    self.arena.get_mut(current).push_child(label, child);
                    child
                }
            };
        }
        Ok(current)
    }

    /// Marks `node` terminal with `value` and returns its previous value.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::ReservedValue`] for [`EMPTY_VALUE`], which the
    /// stream format uses for non-terminal nodes.
    pub fn set_value(&mut self, node: NodeId, value: i32) -> Result<Option<i32>, TrieError> {
        if value == EMPTY_VALUE {
            return Err(TrieError::ReservedValue(value));
        }
        Ok(self.arena.get_mut(node).set_value(Some(value)))
    }

    /// Inserts `word` and gives it `value` unless it is already a word.
    ///
    /// Returns `true` if the value was assigned, `false` if the word was
    /// already present (its value is kept).
    ///
    /// # Examples
    ///
    /// ```
    /// use chartrie::trie::Trie;
    ///
    /// let mut trie = Trie::new();
    /// assert!(trie.add_word("FAKE", 1).unwrap());
    /// assert!(!trie.add_word("FAKE", 2).unwrap()); // already present
    /// assert_eq!(trie.find_word("FAKE").value(), Some(1));
    /// ```
    pub fn add_word(&mut self, word: impl IntoWord, value: i32) -> Result<bool, TrieError> {
        if value == EMPTY_VALUE {
            return Err(TrieError::ReservedValue(value));
        }
        let node = self.insert(word)?;
        if self.arena.get(node).is_word() {
            return Ok(false);
        }
        self.arena.get_mut(node).set_value(Some(value));
        Ok(true)
    }

    /// Looks up `word` exactly.
    pub fn find_word(&self, word: impl IntoWord) -> WordMatch {
        find_word(self, &word.collect_word())
    }

    /// Records the value of every node visited while walking `s`.
    pub fn find_prefixes(&self, s: impl IntoWord) -> PrefixTrace {
        find_prefixes(self, &s.collect_word())
    }

    /// Returns `true` if the given word is in the trie.
    pub fn contains(&self, word: impl IntoWord) -> bool {
        self.find_word(word).is_found()
    }

    /// Returns the number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns the number of edges, which is one less than the node count.
    pub fn edge_count(&self) -> usize {
        self.arena.len() - 1
    }
}

impl Automaton for Trie {
    #[inline]
    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    fn transition(&self, node: NodeId, label: u8) -> Option<NodeId> {
        self.arena.get(node).get(label)
    }

    #[inline]
    fn value(&self, node: NodeId) -> Option<i32> {
        self.arena.get(node).value()
    }

    #[inline]
    fn edge_count(&self, node: NodeId) -> usize {
        self.arena.get(node).child_count()
    }

    #[inline]
    fn edge(&self, node: NodeId, index: usize) -> Option<(u8, NodeId)> {
        self.arena.get(node).children().get(index)
    }
}
