//! # chartrie
//!
//! A byte-labelled [trie](https://en.wikipedia.org/wiki/Trie) with a compact
//! stream format, an immutable arena-backed reload path, and a compound-word
//! split finder built from a forward trie and a trie of reversed words.
//!
//! ## Features
//!
//! - **Incremental construction**: [`Trie`](trie::Trie) grows one edge per byte,
//!   keeping each node's edges in insertion order
//! - **Lookups with partial-match information**: exact lookups report how far a
//!   missing word matched; prefix traces report every word along a path
//! - **Frozen tries**: [`save`](trie::save) flattens a trie into a
//!   self-describing byte stream and [`FrozenTrie::load`](trie::FrozenTrie::load)
//!   rebuilds it into two contiguous arenas in a single validated pass
//! - **Split finding**: [`find_splits`](trie::find_splits) lists every way to cut a
//!   key into two dictionary words
//! - **Streaming**: [`State`](trie::State) steps through a trie one byte at a time
//!
//! ## Quick Start
//!
//! ```
//! use chartrie::trie::builder::build_trie;
//! use chartrie::trie::WordMatch;
//!
//! let trie = build_trie(["BAKE", "CAKE", "FAKE", "LAKE", "MAKE"]).unwrap();
//!
//! assert_eq!(trie.find_word("CAKE"), WordMatch::Found(1));
//! assert_eq!(trie.find_word("CAR"), WordMatch::Missing { matched: 2 });
//! ```
//!
//! ## Save and reload
//!
//! ```
//! use chartrie::trie::{builder::build_trie, save, FrozenTrie};
//!
//! let trie = build_trie(["enum", "if", "int"]).unwrap();
//! let stream = save(&trie).unwrap();
//!
//! let frozen = FrozenTrie::load(stream.as_bytes()).unwrap();
//! assert!(frozen.contains("int"));
//! assert_eq!(frozen.find_prefixes("intx").terminals().collect::<Vec<_>>(), vec![(3, 2)]);
//! ```
//!
//! ## Split finding
//!
//! ```
//! use chartrie::trie::split::{Split, SplitDictionary};
//!
//! let dict = SplitDictionary::from_words(["enum", "if"]).unwrap();
//! assert_eq!(
//!     dict.find_splits("enumif"),
//!     vec![Split { index: 4, prefix_value: 0, suffix_value: 1 }]
//! );
//! ```

#![warn(missing_docs)]

/// Core trie data structures: mutable and frozen tries, lookups, codec and split finder.
pub mod trie;
