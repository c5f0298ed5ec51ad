//! Stream format shared by [`save`] and [`FrozenTrie::load`](super::frozen::FrozenTrie::load).
//!
//! Layout (all integers little-endian `i32`):
//! ```text
//! offset 0:  total_length   bytes, including this 12-byte header
//! offset 4:  node_count
//! offset 8:  char_count     label-run bytes, terminators included
//! offset 12: root node
//!
//! node:      value (EMPTY_VALUE when non-terminal)
//!            k distinct non-zero labels, then one 0 terminator
//!            k child nodes, in label order
//! ```
//! Nodes are written depth-first in edge order.

use std::io::Write;
#[cfg(feature = "fs")]
use std::path::Path;

use tracing::debug;

use super::automaton::{edges, Automaton};
use super::error::{CorruptStream, TrieError};
use super::node_arena::NodeId;
use super::EMPTY_VALUE;

/// Size of the fixed stream header.
pub const HEADER_LEN: usize = 12;

/// Size of an encoded node value.
pub(crate) const VALUE_LEN: usize = 4;

/// Terminates each node's label run.
pub(crate) const LABEL_TERMINATOR: u8 = 0;

/// A trie flattened into the stream format, with the header fields kept
/// alongside the bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializedTrie {
    bytes: Vec<u8>,
    node_count: usize,
    char_count: usize,
}

impl SerializedTrie {
    /// The complete stream, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the serialized trie and returns the stream.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total stream length in bytes, header included.
    pub fn total_len(&self) -> usize {
        self.bytes.len()
    }

    /// Number of encoded nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of label-run bytes, terminators included.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Writes the stream to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), TrieError> {
        writer.write_all(&self.bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the stream to a file, replacing it if it exists.
    #[cfg(feature = "fs")]
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), TrieError> {
        let path = path.as_ref();
        std::fs::write(path, &self.bytes)?;
        debug!(path = %path.display(), bytes = self.bytes.len(), "wrote trie stream");
        Ok(())
    }
}

/// Counts `node` and every node reachable from it.
pub fn measure<A: Automaton + ?Sized>(automaton: &A, node: NodeId) -> usize {
    let mut count = 0;
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(edges(automaton, node).map(|(_, child)| child));
    }
    count
}

/// Flattens the automaton into the stream format.
///
/// The output is a pure function of the tree: the same trie always produces
/// the same bytes.
///
/// # Errors
///
/// Returns [`TrieError::TooLarge`] if a header field would not fit in an `i32`.
pub fn save<A: Automaton + ?Sized>(automaton: &A) -> Result<SerializedTrie, TrieError> {
    let node_count = measure(automaton, automaton.root());
    // Every node but the root is one label; every node writes one terminator.
    let char_count = 2 * node_count - 1;
    let total_len = HEADER_LEN + VALUE_LEN * node_count + char_count;
    let header_field = |n: usize| i32::try_from(n).map_err(|_| TrieError::TooLarge(n));

    let mut out = WriteCursor::with_capacity(total_len);
    out.put_i32(header_field(total_len)?);
    out.put_i32(header_field(node_count)?);
    out.put_i32(header_field(char_count)?);

    let mut stack = vec![automaton.root()];
    while let Some(node) = stack.pop() {
        out.put_i32(automaton.value(node).unwrap_or(EMPTY_VALUE));
        let first_child = stack.len();
        for (label, child) in edges(automaton, node) {
            out.put_u8(label);
            stack.push(child);
        }
        out.put_u8(LABEL_TERMINATOR);
        // Children pop in edge order.
        stack[first_child..].reverse();
    }

    debug_assert_eq!(out.len(), total_len);
    debug!(
        bytes = total_len,
        nodes = node_count,
        chars = char_count,
        "serialized trie"
    );
    Ok(SerializedTrie {
        bytes: out.into_inner(),
        node_count,
        char_count,
    })
}

/// Append-only cursor over a growable byte buffer.
pub(crate) struct WriteCursor {
    buf: Vec<u8>,
}

impl WriteCursor {
    pub fn with_capacity(capacity: usize) -> Self {
        WriteCursor {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Bounds-checked forward cursor over a stream.
pub(crate) struct ReadCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ReadCursor { data, pos: 0 }
    }

    /// Current offset from the start of the stream.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CorruptStream> {
        if self.remaining() < n {
            return Err(CorruptStream::Truncated {
                offset: self.pos,
                needed: n,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn get_i32(&mut self) -> Result<i32, CorruptStream> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a zero-terminated label run and returns the labels without the
    /// terminator.
    pub fn get_label_run(&mut self) -> Result<&'a [u8], CorruptStream> {
        let rest = &self.data[self.pos..];
        match rest.iter().position(|&b| b == LABEL_TERMINATOR) {
            Some(len) => {
                let labels = &rest[..len];
                self.pos += len + 1;
                Ok(labels)
            }
            None => Err(CorruptStream::Truncated {
                offset: self.pos,
                needed: rest.len() + 1,
            }),
        }
    }
}
