//! Two-word decomposition of a key using a forward trie and a reversed-word trie.

use smallvec::SmallVec;

use super::automaton::Automaton;
use super::builder::IntoWord;
use super::error::TrieError;
use super::lookup::find_prefixes;
use super::owned::Trie;

/// A position where a key splits into two dictionary words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split {
    /// Length of the leading word, in bytes.
    pub index: usize,
    /// Value of `key[..index]` in the prefix trie.
    pub prefix_value: i32,
    /// Value of `key[index..]`, reversed, in the suffix trie.
    pub suffix_value: i32,
}

/// Finds every `i` in `1..key.len()` such that `key[..i]` is a word of
/// `prefixes` and the reverse of `key[i..]` is a word of `suffixes`.
///
/// Splits are returned in increasing order of `i`. Only two walks are made,
/// one forwards over the key and one backwards, so the cost is linear in the
/// key length.
pub fn find_splits<P, S>(prefixes: &P, suffixes: &S, key: &[u8]) -> Vec<Split>
where
    P: Automaton + ?Sized,
    S: Automaton + ?Sized,
{
    let len = key.len();
    let reversed: SmallVec<[u8; 32]> = key.iter().rev().copied().collect();
    let forward = find_prefixes(prefixes, key);
    let backward = find_prefixes(suffixes, &reversed);

    // forward reaches i when i < forward.len(); backward reaches len - i when
    // len - i < backward.len().
    let lo = (len + 1).saturating_sub(backward.len()).max(1);
    let hi = forward.len().min(len);

    (lo..hi)
        .filter_map(|index| {
            let prefix_value = forward.get(index)?;
            let suffix_value = backward.get(len - index)?;
            Some(Split {
                index,
                prefix_value,
                suffix_value,
            })
        })
        .collect()
}

/// A dictionary kept as a forward trie and a trie of reversed words, ready
/// for split queries.
///
/// # Examples
///
/// ```
/// use chartrie::trie::split::{Split, SplitDictionary};
///
/// let mut dict = SplitDictionary::new();
/// dict.insert("foot", 0).unwrap();
/// dict.insert("ball", 1).unwrap();
/// dict.insert("football", 2).unwrap();
///
/// assert_eq!(
///     dict.find_splits("football"),
///     vec![Split { index: 4, prefix_value: 0, suffix_value: 1 }]
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct SplitDictionary {
    forward: Trie,
    reverse: Trie,
}

impl SplitDictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        SplitDictionary::default()
    }

    /// Builds a dictionary giving each word its position in `words`.
    pub fn from_words<W: IntoWord>(words: impl IntoIterator<Item = W>) -> Result<Self, TrieError> {
        let mut dict = SplitDictionary::new();
        for (index, word) in words.into_iter().enumerate() {
            let value = i32::try_from(index).map_err(|_| TrieError::TooLarge(index))?;
            dict.insert(word, value)?;
        }
        Ok(dict)
    }

    /// Adds `word` with `value` to both tries. A word already present keeps its
    /// value; returns whether the value was assigned.
    pub fn insert(&mut self, word: impl IntoWord, value: i32) -> Result<bool, TrieError> {
        let word = word.collect_word();
        let reversed: SmallVec<[u8; 32]> = word.iter().rev().copied().collect();
        let added = self.forward.add_word(&word[..], value)?;
        self.reverse.add_word(&reversed[..], value)?;
        Ok(added)
    }

    /// The trie of words as written.
    pub fn forward(&self) -> &Trie {
        &self.forward
    }

    /// The trie of reversed words.
    pub fn reverse(&self) -> &Trie {
        &self.reverse
    }

    /// Splits `key` into two words of this dictionary in every possible way.
    pub fn find_splits(&self, key: impl IntoWord) -> Vec<Split> {
        find_splits(&self.forward, &self.reverse, &key.collect_word())
    }
}
