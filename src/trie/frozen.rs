use std::io::Read;
#[cfg(feature = "fs")]
use std::path::Path;

use tracing::{debug, warn};

use super::automaton::Automaton;
use super::builder::IntoWord;
use super::error::{CorruptStream, TrieError};
use super::lookup::{find_prefixes, find_word, PrefixTrace, WordMatch};
use super::node_arena::{NodeArena, NodeId};
use super::serial::{ReadCursor, HEADER_LEN, VALUE_LEN};
use super::EMPTY_VALUE;

/// A node of a [`FrozenTrie`]. Its labels and children are slices of the
/// trie's two arenas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct FrozenNode {
    value: Option<i32>,
    /// Start of this node's labels in the character arena.
    labels: u32,
    /// First of this node's children in the node arena; the children are
    /// contiguous and in label order.
    first_child: u32,
    /// Number of outgoing edges.
    len: u32,
}

/// An immutable trie decoded from a serialized stream.
///
/// All nodes live in one contiguous node arena and all edge labels in one
/// contiguous character arena, laid out in the stream's depth-first order.
/// There is no way to mutate a frozen trie, so it can be shared freely between
/// threads.
///
/// # Examples
///
/// ```
/// use chartrie::trie::{save, FrozenTrie, Trie, WordMatch};
///
/// let mut trie = Trie::new();
/// trie.add_word("enum", 16).unwrap();
/// let stream = save(&trie).unwrap();
///
/// let frozen = FrozenTrie::load(stream.as_bytes()).unwrap();
/// assert_eq!(frozen.find_word("enum"), WordMatch::Found(16));
/// ```
#[derive(Clone, Debug)]
pub struct FrozenTrie {
    nodes: NodeArena<FrozenNode>,
    chars: Vec<u8>,
    char_count: usize,
}

impl FrozenTrie {
    /// Decodes a stream produced by [`save`](super::serial::save).
    ///
    /// The buffer must hold exactly one stream.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::Corrupt`] if the header disagrees with the encoded
    /// nodes in any way; no partially decoded trie is ever returned.
    pub fn load(bytes: &[u8]) -> Result<FrozenTrie, TrieError> {
        decode(bytes).map_err(|err| {
            warn!(error = %err, len = bytes.len(), "rejected corrupt trie stream");
            TrieError::Corrupt(err)
        })
    }

    /// Reads a complete stream from `reader` and decodes it.
    pub fn read_from<R: Read>(mut reader: R) -> Result<FrozenTrie, TrieError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        FrozenTrie::load(&bytes)
    }

    /// Reads and decodes a stream file.
    #[cfg(feature = "fs")]
    pub fn load_path(path: impl AsRef<Path>) -> Result<FrozenTrie, TrieError> {
        let bytes = std::fs::read(path.as_ref())?;
        FrozenTrie::load(&bytes)
    }

    /// Returns the id of the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
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

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Size of the character arena as declared by the stream header.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// The concatenated edge labels of all nodes, in node order.
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    #[inline]
    fn labels(&self, node: &FrozenNode) -> &[u8] {
        let start = node.labels as usize;
        &self.chars[start..start + node.len as usize]
    }
}

impl Automaton for FrozenTrie {
    #[inline]
    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    fn transition(&self, node: NodeId, label: u8) -> Option<NodeId> {
        let node = self.nodes.get(node);
        self.labels(node)
            .iter()
            .position(|&l| l == label)
            .map(|i| NodeId(node.first_child + i as u32))
    }

    #[inline]
    fn value(&self, node: NodeId) -> Option<i32> {
        self.nodes.get(node).value
    }

    #[inline]
    fn edge_count(&self, node: NodeId) -> usize {
        self.nodes.get(node).len as usize
    }

    #[inline]
    fn edge(&self, node: NodeId, index: usize) -> Option<(u8, NodeId)> {
        let node = self.nodes.get(node);
        self.labels(node)
            .get(index)
            .map(|&label| (label, NodeId(node.first_child + index as u32)))
    }
}

fn header_field(cursor: &mut ReadCursor<'_>, field: &'static str) -> Result<usize, CorruptStream> {
    let value = cursor.get_i32()?;
    usize::try_from(value).map_err(|_| CorruptStream::NegativeField { field, value })
}

fn decode(bytes: &[u8]) -> Result<FrozenTrie, CorruptStream> {
    if bytes.len() < HEADER_LEN {
        return Err(CorruptStream::MissingHeader {
            len: bytes.len(),
            header: HEADER_LEN,
        });
    }
    let mut cursor = ReadCursor::new(bytes);
    let total_len = header_field(&mut cursor, "total_length")?;
    let node_count = header_field(&mut cursor, "node_count")?;
    let char_count = header_field(&mut cursor, "char_count")?;
    debug!(
        bytes = total_len,
        nodes = node_count,
        chars = char_count,
        "loading trie stream"
    );

    if total_len != bytes.len() {
        return Err(CorruptStream::LengthMismatch {
            declared: total_len,
            actual: bytes.len(),
        });
    }
    // Each node needs at least its value and a terminator.
    let body = total_len - HEADER_LEN;
    if node_count == 0 || node_count > body / (VALUE_LEN + 1) {
        return Err(CorruptStream::ImpossibleNodeCount {
            nodes: node_count,
            len: total_len,
        });
    }
    if char_count > body {
        return Err(CorruptStream::CharOverflow {
            declared: char_count,
        });
    }

    let mut nodes = NodeArena::with_capacity(node_count);
    let mut chars = Vec::with_capacity(char_count);
    // Label-run bytes consumed so far, terminators included.
    let mut run_bytes = 0usize;
    let mut pending = vec![nodes.alloc(FrozenNode::default())];

    while let Some(id) = pending.pop() {
        let raw = cursor.get_i32()?;
        let offset = cursor.position();
        let labels = cursor.get_label_run()?;

        run_bytes += labels.len() + 1;
        if run_bytes > char_count {
            return Err(CorruptStream::CharOverflow {
                declared: char_count,
            });
        }
        if nodes.len() + labels.len() > node_count {
            return Err(CorruptStream::NodeOverflow {
                declared: node_count,
            });
        }
        check_distinct(labels, offset)?;

        let node = FrozenNode {
            value: (raw != EMPTY_VALUE).then_some(raw),
            labels: chars.len() as u32,
            first_child: nodes.len() as u32,
            len: labels.len() as u32,
        };
        chars.extend_from_slice(labels);
        *nodes.get_mut(id) = node;

        let first_pending = pending.len();
        for _ in labels {
            pending.push(nodes.alloc(FrozenNode::default()));
        }
        // Children are decoded in label order.
        pending[first_pending..].reverse();
    }

    if nodes.len() != node_count {
        return Err(CorruptStream::NodeCountMismatch {
            declared: node_count,
            decoded: nodes.len(),
        });
    }
    if cursor.remaining() != 0 {
        return Err(CorruptStream::TrailingBytes {
            remaining: cursor.remaining(),
        });
    }

    Ok(FrozenTrie {
        nodes,
        chars,
        char_count,
    })
}

fn check_distinct(labels: &[u8], offset: usize) -> Result<(), CorruptStream> {
    let mut seen = [false; 256];
    for (i, &label) in labels.iter().enumerate() {
        if std::mem::replace(&mut seen[label as usize], true) {
            return Err(CorruptStream::DuplicateLabel {
                label,
                offset: offset + i,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::super::builder::build_trie;
    use super::super::owned::Trie;
    use super::super::serial::save;
    use super::*;

    fn corrupt(bytes: &[u8]) -> CorruptStream {
        match FrozenTrie::load(bytes) {
            Err(TrieError::Corrupt(err)) => err,
            other => panic!("expected corrupt stream, got {other:?}"),
        }
    }

    fn set_i32(bytes: &mut [u8], offset: usize, value: i32) {
        bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    #[test]
    fn load_matches_source() {
        let trie = build_trie(["class", "switch", "super", "case", "catch"]).unwrap();
        let frozen = FrozenTrie::load(save(&trie).unwrap().as_bytes()).unwrap();
        assert_eq!(frozen.node_count(), trie.node_count());
        for word in ["class", "switch", "super", "case", "catch", "cas", "sw", "", "z"] {
            assert_eq!(frozen.find_word(word), trie.find_word(word), "{word}");
            assert_eq!(frozen.find_prefixes(word), trie.find_prefixes(word), "{word}");
        }
    }

    #[test]
    fn arenas_follow_stream_order() {
        let mut trie = Trie::new();
        trie.add_word("ab", 5).unwrap();
        trie.add_word("c", 6).unwrap();
        let serialized = save(&trie).unwrap();
        let frozen = FrozenTrie::load(serialized.as_bytes()).unwrap();
        assert_eq!(frozen.chars(), b"acb");
        assert_eq!(frozen.char_count(), 7);
        assert!(frozen.chars().len() <= frozen.char_count());
        // root's children occupy slots 1 and 2, the child of "a" slot 3
        assert_eq!(frozen.transition(frozen.root(), b'a'), Some(NodeId(1)));
        assert_eq!(frozen.transition(frozen.root(), b'c'), Some(NodeId(2)));
        assert_eq!(frozen.transition(NodeId(1), b'b'), Some(NodeId(3)));
        assert_eq!(frozen.value(NodeId(2)), Some(6));
        assert_eq!(frozen.value(NodeId(3)), Some(5));
    }

    #[test]
    fn resave_is_identical() {
        let trie = build_trie(["do", "double", "default", "delete", "debugger"]).unwrap();
        let first = save(&trie).unwrap();
        let frozen = FrozenTrie::load(first.as_bytes()).unwrap();
        assert_eq!(save(&frozen).unwrap(), first);
    }

    #[test]
    fn shortened_total_length_is_rejected() {
        let trie = build_trie(["enum", "finally"]).unwrap();
        let mut bytes = save(&trie).unwrap().into_bytes();
        let len = bytes.len() as i32;
        set_i32(&mut bytes, 0, len - 1);
        assert_eq!(
            corrupt(&bytes),
            CorruptStream::LengthMismatch {
                declared: bytes.len() - 1,
                actual: bytes.len()
            }
        );
    }

    #[test]
    fn truncated_buffer_is_rejected() {
        let trie = build_trie(["enum", "finally"]).unwrap();
        let mut bytes = save(&trie).unwrap().into_bytes();
        bytes.pop();
        let len = bytes.len() as i32;
        set_i32(&mut bytes, 0, len);
        assert!(matches!(corrupt(&bytes), CorruptStream::Truncated { .. }));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert_eq!(
            corrupt(&[1, 2, 3]),
            CorruptStream::MissingHeader { len: 3, header: 12 }
        );
    }

    #[test]
    fn negative_header_field_is_rejected() {
        let mut bytes = save(&Trie::new()).unwrap().into_bytes();
        set_i32(&mut bytes, 4, -3);
        assert_eq!(
            corrupt(&bytes),
            CorruptStream::NegativeField {
                field: "node_count",
                value: -3
            }
        );
    }

    #[test]
    fn inflated_node_count_is_rejected() {
        let trie = build_trie(["if", "in"]).unwrap();
        let mut bytes = save(&trie).unwrap().into_bytes();
        set_i32(&mut bytes, 4, 1_000_000);
        assert!(matches!(
            corrupt(&bytes),
            CorruptStream::ImpossibleNodeCount { nodes: 1_000_000, .. }
        ));
    }

    #[test]
    fn understated_node_count_is_rejected() {
        let trie = build_trie(["if", "in"]).unwrap();
        let mut bytes = save(&trie).unwrap().into_bytes();
        set_i32(&mut bytes, 4, trie.node_count() as i32 - 1);
        assert_eq!(
            corrupt(&bytes),
            CorruptStream::NodeOverflow {
                declared: trie.node_count() - 1
            }
        );
    }

    #[test]
    fn understated_char_count_is_rejected() {
        let trie = build_trie(["if", "in"]).unwrap();
        let mut bytes = save(&trie).unwrap().into_bytes();
        set_i32(&mut bytes, 8, 2);
        assert_eq!(corrupt(&bytes), CorruptStream::CharOverflow { declared: 2 });
    }

    #[test]
    fn overstated_node_count_is_rejected() {
        // root with one leaf child, padded so the declared count still fits
        let mut bytes = save(&build_trie(["a"]).unwrap()).unwrap().into_bytes();
        bytes.extend_from_slice(&[0xff, 0xff, 0xff, 0xff, 0]);
        let len = bytes.len() as i32;
        set_i32(&mut bytes, 0, len);
        set_i32(&mut bytes, 4, 3);
        set_i32(&mut bytes, 8, 5);
        assert_eq!(
            corrupt(&bytes),
            CorruptStream::NodeCountMismatch {
                declared: 3,
                decoded: 2
            }
        );
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = save(&build_trie(["a"]).unwrap()).unwrap().into_bytes();
        bytes.push(7);
        let len = bytes.len() as i32;
        set_i32(&mut bytes, 0, len);
        assert_eq!(corrupt(&bytes), CorruptStream::TrailingBytes { remaining: 1 });
    }

    #[test]
    fn duplicate_label_is_rejected() {
        #[rustfmt::skip]
        let bytes: Vec<u8> = vec![
            29, 0, 0, 0, 3, 0, 0, 0, 5, 0, 0, 0,
            0xff, 0xff, 0xff, 0xff, b'a', b'a', 0,
            1, 0, 0, 0, 0,
            2, 0, 0, 0, 0,
        ];
        assert_eq!(
            corrupt(&bytes),
            CorruptStream::DuplicateLabel {
                label: b'a',
                offset: 17
            }
        );
    }

    #[test]
    fn read_from_reader() {
        let trie = build_trie(["var", "void", "volatile"]).unwrap();
        let bytes = save(&trie).unwrap().into_bytes();
        let frozen = FrozenTrie::read_from(&bytes[..]).unwrap();
        assert_eq!(frozen.find_word("void"), WordMatch::Found(1));
    }

    #[cfg(feature = "fs")]
    #[test]
    fn save_and_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.trie");
        let trie = build_trie(["while", "with"]).unwrap();
        save(&trie).unwrap().save_to_path(&path).unwrap();
        let frozen = FrozenTrie::load_path(&path).unwrap();
        assert_eq!(frozen.find_word("with"), WordMatch::Found(1));
        assert!(!frozen.contains("wit"));
    }

    #[test]
    fn frozen_trie_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrozenTrie>();
    }
}
