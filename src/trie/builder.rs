use smallvec::SmallVec;

#[cfg(feature = "fs")]
use std::fs::File;
#[cfg(feature = "fs")]
use std::io::{BufRead, BufReader};
#[cfg(feature = "fs")]
use std::path::Path;

#[cfg(feature = "fs")]
use tracing::debug;

use super::error::TrieError;
use super::owned::Trie;

/// Trait for types that can be used as a word when inserting into a trie.
///
/// Implemented for common string and byte-sequence types so that
/// [`Trie::insert`] and [`build_trie`] accept them directly without manual
/// conversion. Strings are inserted as their UTF-8 bytes.
pub trait IntoWord {
    /// Collects this word into a byte buffer.
    fn collect_word(self) -> SmallVec<[u8; 32]>;
}

// String types

impl IntoWord for &str {
    fn collect_word(self) -> SmallVec<[u8; 32]> {
        SmallVec::from_slice(self.as_bytes())
    }
}

impl IntoWord for &&str {
    fn collect_word(self) -> SmallVec<[u8; 32]> {
        SmallVec::from_slice(self.as_bytes())
    }
}

impl IntoWord for String {
    fn collect_word(self) -> SmallVec<[u8; 32]> {
        SmallVec::from_vec(self.into_bytes())
    }
}

impl IntoWord for &String {
    fn collect_word(self) -> SmallVec<[u8; 32]> {
        SmallVec::from_slice(self.as_bytes())
    }
}

// Byte sequences

impl IntoWord for &[u8] {
    fn collect_word(self) -> SmallVec<[u8; 32]> {
        SmallVec::from_slice(self)
    }
}

impl IntoWord for Vec<u8> {
    fn collect_word(self) -> SmallVec<[u8; 32]> {
        SmallVec::from_vec(self)
    }
}

impl IntoWord for &Vec<u8> {
    fn collect_word(self) -> SmallVec<[u8; 32]> {
        SmallVec::from_slice(self)
    }
}

impl<const N: usize> IntoWord for [u8; N] {
    fn collect_word(self) -> SmallVec<[u8; 32]> {
        SmallVec::from_slice(&self)
    }
}

impl<const N: usize> IntoWord for &[u8; N] {
    fn collect_word(self) -> SmallVec<[u8; 32]> {
        SmallVec::from_slice(self)
    }
}

/// Returns the position of the first zero byte, which cannot be an edge label.
pub(crate) fn check_labels(word: &[u8]) -> Result<(), TrieError> {
    match word.iter().position(|&b| b == 0) {
        Some(position) => Err(TrieError::NulLabel { position }),
        None => Ok(()),
    }
}

/// Builds a trie from an iterator of words and returns it.
///
/// Each word's value is its zero-based position in `words`. A word that
/// appears more than once keeps the value of its first occurrence.
///
/// # Examples
///
/// ```
/// use chartrie::trie::builder::build_trie;
/// use chartrie::trie::WordMatch;
///
/// let trie = build_trie(["APPLE", "BANANA", "CHERRY"]).unwrap();
/// assert_eq!(trie.find_word("BANANA"), WordMatch::Found(1));
/// assert_eq!(trie.find_word("APRICOT"), WordMatch::Missing { matched: 2 });
/// ```
pub fn build_trie<W>(words: impl IntoIterator<Item = W>) -> Result<Trie, TrieError>
where
    W: IntoWord,
{
    let mut trie = Trie::new();
    for (index, word) in words.into_iter().enumerate() {
        trie.add_word(word, index_value(index)?)?;
    }
    Ok(trie)
}

/// Builds a trie from a dictionary file and returns it.
///
/// Reads words from a text file (one word per line). Lines starting with '#'
/// are treated as comments and ignored, and empty lines are skipped. Values
/// are assigned by position among the accepted words.
///
/// # Examples
///
/// ```no_run
/// use chartrie::trie::builder::build_trie_from_file;
///
/// let trie = build_trie_from_file("dictionary.txt").unwrap();
/// ```
#[cfg(feature = "fs")]
pub fn build_trie_from_file(path: impl AsRef<Path>) -> Result<Trie, TrieError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut trie = Trie::new();

    // Reuse one line buffer instead of allocating a string per line.
    let mut buf = String::with_capacity(80);
    let mut lines = 0usize;
    let mut accepted = 0usize;
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        lines += 1;
        let word = buf.trim_end();
        if !word.is_empty() && !is_comment(word) {
            trie.add_word(word, index_value(accepted)?)?;
            accepted += 1;
        }
    }
    debug!(
        path = %path.display(),
        lines,
        words = accepted,
        nodes = trie.node_count(),
        "built trie from word file"
    );
    Ok(trie)
}

fn index_value(index: usize) -> Result<i32, TrieError> {
    i32::try_from(index).map_err(|_| TrieError::TooLarge(index))
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
