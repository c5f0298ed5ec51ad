//! Incremental, one-label-at-a-time traversal.

use std::collections::VecDeque;

use super::automaton::Automaton;
use super::node_arena::NodeId;

/// A position inside an automaton.
///
/// States are `Copy`: duplicating one is how a consumer branches. A state
/// borrows its automaton, so a [`Trie`](super::owned::Trie) cannot be
/// modified while any state into it is alive.
///
/// # Examples
///
/// ```
/// use chartrie::trie::{builder::build_trie, walker::State};
///
/// let trie = build_trie(["in", "int"]).unwrap();
/// let mut state = State::new(&trie);
/// assert!(state.step(b'i'));
/// assert!(state.step(b'n'));
/// assert!(state.is_accepting());
/// assert!(!state.step(b'k'));
/// assert_eq!(state.value(), Some(0)); // unchanged by the failed step
/// ```
#[derive(Debug)]
pub struct State<'a, A: Automaton + ?Sized> {
    automaton: &'a A,
    node: NodeId,
}

impl<A: Automaton + ?Sized> Clone for State<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Automaton + ?Sized> Copy for State<'_, A> {}

impl<'a, A: Automaton + ?Sized> State<'a, A> {
    /// A state at the root.
    pub fn new(automaton: &'a A) -> Self {
        State {
            automaton,
            node: automaton.root(),
        }
    }

    /// A state at an arbitrary node of `automaton`.
    pub fn at(automaton: &'a A, node: NodeId) -> Self {
        State { automaton, node }
    }

    /// Follows `label` if the current node has such an edge and returns
    /// whether it moved. A failed step leaves the state where it was.
    #[inline]
    pub fn step(&mut self, label: u8) -> bool {
        match self.automaton.transition(self.node, label) {
            Some(next) => {
                self.node = next;
                true
            }
            None => false,
        }
    }

    /// True if a word ends at the current node.
    #[inline]
    pub fn is_accepting(&self) -> bool {
        self.automaton.value(self.node).is_some()
    }

    /// The value of the word ending at the current node.
    #[inline]
    pub fn value(&self) -> Option<i32> {
        self.automaton.value(self.node)
    }

    /// The current node.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Finds every word whose `i`-th byte is one of the candidates in `slots[i]`.
///
/// Only words of exactly `slots.len()` bytes are returned, in breadth-first
/// discovery order (shorter partial paths expand first, and candidates within a
/// slot are tried in the order given). An empty `slots` yields nothing.
///
/// # Examples
///
/// ```
/// use chartrie::trie::{builder::build_trie, walker::find_candidates};
///
/// let trie = build_trie(["cat", "cot", "cut", "dot"]).unwrap();
/// let found = find_candidates(&trie, &["cd", "ao", "t"]);
/// assert_eq!(found, vec![b"cat".to_vec(), b"cot".to_vec(), b"dot".to_vec()]);
/// ```
pub fn find_candidates<A, S>(automaton: &A, slots: &[S]) -> Vec<Vec<u8>>
where
    A: Automaton + ?Sized,
    S: AsRef<[u8]>,
{
    let mut found = Vec::new();
    let Some(last) = slots.len().checked_sub(1) else {
        return found;
    };

    let mut queue = VecDeque::new();
    queue.push_back((State::new(automaton), Vec::new()));
    while let Some((state, trace)) = queue.pop_front() {
        let depth = trace.len();
        for &label in slots[depth].as_ref() {
            let mut next = state;
            if !next.step(label) {
                continue;
            }
            let mut path = trace.clone();
            path.push(label);
            if depth == last {
                if next.is_accepting() {
                    found.push(path);
                }
            } else {
                queue.push_back((next, path));
            }
        }
    }
    found
}
