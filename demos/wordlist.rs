//! Example: a keyword dictionary built on the trie.
//!
//! Builds a trie of JavaScript-style keywords, runs exact and prefix lookups,
//! walks it one byte at a time, splits compound keys, and reloads it from its
//! serialized form.
//!
//! Run with: RUST_LOG=debug cargo run --example wordlist

use chartrie::trie::builder::build_trie;
use chartrie::trie::split::SplitDictionary;
use chartrie::trie::walker::{find_candidates, State};
use chartrie::trie::{save, words, FrozenTrie, TrieError, WordMatch};
use tracing_subscriber::EnvFilter;

const KEYWORDS: [&str; 20] = [
    "abstract", "boolean", "break", "case", "catch", "class", "do", "double", "enum", "if",
    "implements", "import", "in", "int", "interface", "a", "ab", "abst", "var", "void",
];

fn main() -> Result<(), TrieError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let trie = build_trie(KEYWORDS)?;

    println!("Word lookup:");
    for word in ["class", "cla", "classic", "interface", "inter"] {
        match trie.find_word(word) {
            WordMatch::Found(value) => println!("  {word}: found ({value})"),
            WordMatch::Missing { matched } => println!("  {word}: missing, matched {matched}"),
        }
    }

    println!("\nWords along \"abstracted\":");
    let key = "abstracted";
    for (len, value) in trie.find_prefixes(key).terminals() {
        println!("  {} ({value})", &key[..len]);
    }

    println!("\nStepping through \"impl\":");
    let mut state = State::new(&trie);
    for &label in b"impl" {
        let moved = state.step(label);
        println!(
            "  {}: moved={moved} accepting={}",
            label as char,
            state.is_accepting()
        );
    }

    println!("\nCandidate spellings for [i][mn][pt]:");
    for word in find_candidates(&trie, &["i", "mn", "pt"]) {
        println!("  {}", String::from_utf8_lossy(&word));
    }

    println!("\nSplits:");
    let dict = SplitDictionary::from_words(KEYWORDS)?;
    for key in ["enumif", "intab", "doubleabst", "catchall"] {
        let splits = dict.find_splits(key);
        if splits.is_empty() {
            println!("  {key}: none");
        }
        for split in splits {
            let (head, tail) = key.split_at(split.index);
            println!("  {key}: {head} + {tail}");
        }
    }

    let stream = save(&trie)?;
    println!(
        "\nSerialized {} nodes into {} bytes",
        stream.node_count(),
        stream.total_len()
    );
    let frozen = FrozenTrie::load(stream.as_bytes())?;
    assert_eq!(words(&frozen), words(&trie));
    println!("Reloaded {} words", words(&frozen).len());
    Ok(())
}
