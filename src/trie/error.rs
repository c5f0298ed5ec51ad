use thiserror::Error;

/// Errors returned by trie construction, serialization and loading.
#[derive(Debug, Error)]
pub enum TrieError {
    /// A word contained a zero byte, which the stream format reserves as the
    /// label-run terminator.
    #[error("zero byte at position {position} cannot be used as an edge label")]
    NulLabel {
        /// Byte offset of the zero byte within the word.
        position: usize,
    },

    /// The payload collides with the serialized "no value" sentinel.
    #[error("value {0} is reserved for non-terminal nodes")]
    ReservedValue(i32),

    /// The trie is too large for the 32-bit header fields of the stream format.
    #[error("trie too large to serialize: {0} does not fit in an i32 header field")]
    TooLarge(usize),

    /// The serialized stream disagrees with what decoding actually consumed.
    #[error("corrupt trie stream: {0}")]
    Corrupt(#[from] CorruptStream),

    /// Reading or writing a stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The specific way a serialized stream failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptStream {
    /// Fewer bytes than the fixed header.
    #[error("stream of {len} bytes is shorter than the {header}-byte header")]
    MissingHeader {
        /// Buffer length.
        len: usize,
        /// Header length.
        header: usize,
    },

    /// A header field was negative.
    #[error("header field `{field}` is negative ({value})")]
    NegativeField {
        /// Name of the field.
        field: &'static str,
        /// Raw value read.
        value: i32,
    },

    /// The declared total length does not match the buffer.
    #[error("declared length {declared} does not match buffer length {actual}")]
    LengthMismatch {
        /// Length from the header.
        declared: usize,
        /// Length of the buffer handed to the decoder.
        actual: usize,
    },

    /// The declared node count cannot be encoded in the declared length.
    #[error("{nodes} nodes cannot fit in {len} bytes")]
    ImpossibleNodeCount {
        /// Declared node count.
        nodes: usize,
        /// Declared total length.
        len: usize,
    },

    /// Decoding tried to read beyond the declared end of the stream.
    #[error("unexpected end of stream at offset {offset} (needed {needed} more bytes)")]
    Truncated {
        /// Offset where the read started.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
    },

    /// A node listed the same label twice.
    #[error("duplicate edge label {label:#04x} at offset {offset}")]
    DuplicateLabel {
        /// The repeated label.
        label: u8,
        /// Offset of the repeated label.
        offset: usize,
    },

    /// More nodes were decoded than the header declared.
    #[error("node arena overflow: more than {declared} nodes in stream")]
    NodeOverflow {
        /// Declared node count.
        declared: usize,
    },

    /// More label bytes were decoded than the header declared.
    #[error("character arena overflow: more than {declared} label bytes in stream")]
    CharOverflow {
        /// Declared character count.
        declared: usize,
    },

    /// Decoding finished with unfilled node slots.
    #[error("decoded {decoded} nodes but header declared {declared}")]
    NodeCountMismatch {
        /// Declared node count.
        declared: usize,
        /// Nodes actually decoded.
        decoded: usize,
    },

    /// Bytes remain after the root encoding.
    #[error("{remaining} trailing bytes after the root node")]
    TrailingBytes {
        /// Number of unread bytes.
        remaining: usize,
    },
}
