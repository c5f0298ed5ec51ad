//! Property-based tests for lookups, the stream codec and the split finder.

use hashbrown::HashMap;
use proptest::prelude::*;

use chartrie::trie::{
    find_splits, save, words, FrozenTrie, SplitDictionary, Trie, TrieError, WordMatch,
};

// Small alphabet so that words share prefixes and queries hit often.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[abc]{0,6}").unwrap()
}

fn dictionary_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word_strategy(), 0..40)
}

/// Builds the trie and a reference map, first value wins.
fn build(words: &[String]) -> (Trie, HashMap<String, i32>) {
    let mut trie = Trie::new();
    let mut model = HashMap::new();
    for (i, word) in words.iter().enumerate() {
        trie.add_word(word, i as i32).unwrap();
        model.entry(word.clone()).or_insert(i as i32);
    }
    (trie, model)
}

fn reversed(s: &str) -> String {
    s.chars().rev().collect()
}

proptest! {
    // Property: exact lookups agree with a map, and misses report the longest
    // matched prefix among stored paths.
    #[test]
    fn prop_find_word_matches_model(dict in dictionary_strategy(), query in word_strategy()) {
        let (trie, model) = build(&dict);
        match trie.find_word(&query) {
            WordMatch::Found(value) => prop_assert_eq!(model.get(&query), Some(&value)),
            WordMatch::Missing { matched } => {
                prop_assert!(!model.contains_key(&query));
                let longest = dict
                    .iter()
                    .map(|w| w.bytes().zip(query.bytes()).take_while(|(a, b)| a == b).count())
                    .max()
                    .unwrap_or(0);
                prop_assert_eq!(matched, longest);
            }
        }
    }

    // Property: the prefix trace has at most len+1 entries and its terminals are
    // exactly the stored prefixes of the query.
    #[test]
    fn prop_prefix_trace_lists_stored_prefixes(dict in dictionary_strategy(), query in word_strategy()) {
        let (trie, model) = build(&dict);
        let trace = trie.find_prefixes(&query);
        prop_assert!(trace.len() <= query.len() + 1);
        prop_assert!(!trace.is_empty());

        let expected: Vec<(usize, i32)> = (0..trace.len())
            .filter_map(|len| model.get(&query[..len]).map(|&v| (len, v)))
            .collect();
        prop_assert_eq!(trace.terminals().collect::<Vec<_>>(), expected);

        if let WordMatch::Found(value) = trie.find_word(&query) {
            prop_assert_eq!(trace.len(), query.len() + 1);
            prop_assert_eq!(trace.get(query.len()), Some(value));
        }
    }

    // Property: load(save(trie)) answers every query like the source trie and
    // re-serializes to the same bytes.
    #[test]
    fn prop_round_trip(dict in dictionary_strategy(), queries in prop::collection::vec(word_strategy(), 1..20)) {
        let (trie, model) = build(&dict);
        let stream = save(&trie).unwrap();
        prop_assert_eq!(stream.node_count(), trie.node_count());
        prop_assert_eq!(stream.char_count(), 2 * trie.node_count() - 1);

        let frozen = FrozenTrie::load(stream.as_bytes()).unwrap();
        for query in queries.iter().chain(&dict) {
            prop_assert_eq!(frozen.find_word(query), trie.find_word(query));
            prop_assert_eq!(frozen.find_prefixes(query), trie.find_prefixes(query));
        }
        prop_assert_eq!(words(&frozen).len(), model.len());
        prop_assert_eq!(save(&frozen).unwrap(), stream);
    }

    // Property: inserting a word again never changes the shape of the trie.
    #[test]
    fn prop_reinsert_keeps_shape(dict in dictionary_strategy()) {
        let (mut trie, _) = build(&dict);
        let before = save(&trie).unwrap();
        for word in &dict {
            trie.insert(word).unwrap();
        }
        prop_assert_eq!(save(&trie).unwrap(), before);
    }

    // Property: any single corrupted header length is rejected, never half-loaded.
    #[test]
    fn prop_wrong_total_length_rejected(dict in dictionary_strategy(), delta in 1i32..64) {
        let (trie, _) = build(&dict);
        let mut bytes = save(&trie).unwrap().into_bytes();
        let declared = bytes.len() as i32 - delta;
        bytes[..4].copy_from_slice(&declared.to_le_bytes());
        let is_corrupt = matches!(FrozenTrie::load(&bytes), Err(TrieError::Corrupt(_)));
        prop_assert!(is_corrupt);
    }

    // Property: splits are exactly the indices whose halves are both words.
    #[test]
    fn prop_splits_match_brute_force(dict in dictionary_strategy(), key in word_strategy()) {
        let mut split_dict = SplitDictionary::new();
        let (_, model) = build(&dict);
        for (i, word) in dict.iter().enumerate() {
            split_dict.insert(word, i as i32).unwrap();
        }

        let expected: Vec<(usize, i32, i32)> = (1..key.len())
            .filter_map(|i| {
                let head = model.get(&key[..i])?;
                let tail = model.get(&key[i..])?;
                Some((i, *head, *tail))
            })
            .collect();
        let got: Vec<(usize, i32, i32)> = split_dict
            .find_splits(&key)
            .into_iter()
            .map(|s| (s.index, s.prefix_value, s.suffix_value))
            .collect();
        prop_assert_eq!(got, expected);

        let reverse = FrozenTrie::load(save(split_dict.reverse()).unwrap().as_bytes()).unwrap();
        let mixed = find_splits(split_dict.forward(), &reverse, key.as_bytes());
        prop_assert_eq!(mixed, split_dict.find_splits(&key));
        for s in split_dict.find_splits(&key) {
            prop_assert!(split_dict.reverse().contains(reversed(&key[s.index..])));
        }
    }
}
