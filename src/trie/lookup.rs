//! Exact-match and prefix-trace traversal over any [`Automaton`].

use super::automaton::Automaton;

/// Outcome of an exact lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordMatch {
    /// The whole word was consumed and ends on a terminal node.
    Found(i32),
    /// The word is not stored. `matched` is the number of leading bytes that
    /// could be followed before an edge was missing, or the full length if
    /// the path exists but does not end on a terminal node.
    Missing {
        /// Length of the matched prefix.
        matched: usize,
    },
}

impl WordMatch {
    /// The stored value, if the word was found.
    pub fn value(self) -> Option<i32> {
        match self {
            WordMatch::Found(value) => Some(value),
            WordMatch::Missing { .. } => None,
        }
    }

    /// True if the word was found.
    pub fn is_found(self) -> bool {
        matches!(self, WordMatch::Found(_))
    }
}

/// Looks up `word` exactly.
pub fn find_word<A: Automaton + ?Sized>(automaton: &A, word: &[u8]) -> WordMatch {
    let mut node = automaton.root();
    for (matched, &label) in word.iter().enumerate() {
        match automaton.transition(node, label) {
            Some(child) => node = child,
            None => return WordMatch::Missing { matched },
        }
    }
    match automaton.value(node) {
        Some(value) => WordMatch::Found(value),
        None => WordMatch::Missing {
            matched: word.len(),
        },
    }
}

/// The values of every node visited while walking a string from the root.
///
/// Entry `i` is the value of the node reached after consuming `i` bytes,
/// `None` where that node is non-terminal. The trace stops at the first byte
/// without an edge, so its length is always the number of bytes consumed
/// plus one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixTrace(Vec<Option<i32>>);

impl PrefixTrace {
    /// Number of entries, i.e. bytes consumed plus one.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true: the root is always recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of bytes of the input that were consumed.
    pub fn consumed(&self) -> usize {
        self.0.len() - 1
    }

    /// Value recorded after consuming `len` bytes; `None` when that prefix is
    /// not a word or was never reached.
    pub fn get(&self, len: usize) -> Option<i32> {
        self.0.get(len).copied().flatten()
    }

    /// The raw trace entries.
    pub fn as_slice(&self) -> &[Option<i32>] {
        &self.0
    }

    /// Iterates over `(prefix length, value)` for every prefix that is a word.
    pub fn terminals(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(len, value)| value.map(|v| (len, v)))
    }
}

/// Walks `s` from the root, recording each visited node's value.
pub fn find_prefixes<A: Automaton + ?Sized>(automaton: &A, s: &[u8]) -> PrefixTrace {
    let mut trace = Vec::with_capacity(s.len() + 1);
    let mut node = automaton.root();
    for &label in s {
        trace.push(automaton.value(node));
        match automaton.transition(node, label) {
            Some(child) => node = child,
            None => return PrefixTrace(trace),
        }
    }
    trace.push(automaton.value(node));
    PrefixTrace(trace)
}

#[cfg(test)]
mod test {
    use super::super::builder::build_trie;
    use super::*;

    #[test]
    fn found_and_missing() {
        let trie = build_trie(["class", "switch"]).unwrap();
        assert_eq!(find_word(&trie, b"class"), WordMatch::Found(0));
        assert_eq!(find_word(&trie, b"switch"), WordMatch::Found(1));
        assert_eq!(find_word(&trie, b"cla"), WordMatch::Missing { matched: 3 });
        assert_eq!(find_word(&trie, b"classy"), WordMatch::Missing { matched: 5 });
        assert_eq!(find_word(&trie, b"x"), WordMatch::Missing { matched: 0 });
        assert_eq!(find_word(&trie, b""), WordMatch::Missing { matched: 0 });
    }

    #[test]
    fn word_match_accessors() {
        assert_eq!(WordMatch::Found(4).value(), Some(4));
        assert!(WordMatch::Found(0).is_found());
        assert_eq!(WordMatch::Missing { matched: 2 }.value(), None);
        assert!(!WordMatch::Missing { matched: 2 }.is_found());
    }

    #[test]
    fn trace_stops_at_divergence() {
        let trie = build_trie(["class", "switch"]).unwrap();
        let trace = find_prefixes(&trie, b"classic");
        assert_eq!(trace.len(), 6);
        assert_eq!(trace.consumed(), 5);
        assert_eq!(trace.get(5), Some(0));
        assert_eq!(trace.terminals().collect::<Vec<_>>(), vec![(5, 0)]);
    }

    #[test]
    fn trace_of_unknown_first_byte() {
        let trie = build_trie(["class"]).unwrap();
        let trace = find_prefixes(&trie, b"hack");
        assert_eq!(trace.as_slice(), &[None]);
        assert_eq!(trace.consumed(), 0);
    }

    #[test]
    fn trace_of_full_match_has_trailing_entry() {
        let trie = build_trie(["a", "abc"]).unwrap();
        let trace = find_prefixes(&trie, b"abc");
        assert_eq!(trace.as_slice(), &[None, Some(0), None, Some(1)]);
        assert_eq!(trace.get(10), None);
    }

    #[test]
    fn trace_of_empty_string() {
        let trie = build_trie(["a"]).unwrap();
        assert_eq!(find_prefixes(&trie, b"").as_slice(), &[None]);
    }
}
