/// Read-only automaton interface shared by the mutable and frozen tries.
pub mod automaton;
/// Word conversion trait and whole-dictionary builders.
pub mod builder;
/// Variable-fanout edge storage and the mutable trie node.
pub mod children;
/// Error types.
pub mod error;
/// Immutable arena-backed trie decoded from a stream.
pub mod frozen;
/// Exact and prefix lookups.
pub mod lookup;
/// Index-addressed node storage.
pub mod node_arena;
/// Mutable trie that owns its nodes.
pub mod owned;
/// Stream format and serializer.
pub mod serial;
/// Compound-word split finder.
pub mod split;
/// Incremental single-step traversal.
pub mod walker;

pub use automaton::{edges, words, Automaton};
pub use builder::IntoWord;
pub use error::{CorruptStream, TrieError};
pub use frozen::FrozenTrie;
pub use lookup::{find_prefixes, find_word, PrefixTrace, WordMatch};
pub use node_arena::NodeId;
pub use owned::Trie;
pub use serial::{measure, save, SerializedTrie};
pub use split::{find_splits, Split, SplitDictionary};
pub use walker::State;

/// Value the stream format stores for nodes that do not end a word.
pub const EMPTY_VALUE: i32 = -1;
