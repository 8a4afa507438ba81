//! Fragment struct with typed accessors.
//!
//! A [`HeaderChunk`] is one named fragment of the response metadata stream:
//! the section it belongs to, its ordering key, and its UTF-8 payload text.
//!
//! # Example
//!
//! ```
//! use firenet::protocol::{ChunkKey, HeaderChunk, CONSOLE_SECTION};
//!
//! let chunk = HeaderChunk::new(CONSOLE_SECTION, ChunkKey::new(0, 2), "[1,\"hello\"],");
//! assert_eq!(chunk.name(), "X-FirePHP-Data-300000000002");
//! assert_eq!(chunk.payload(), "[1,\"hello\"],");
//! ```

use super::wire_format::{header_name, ChunkKey};

/// A complete protocol fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderChunk {
    /// Section this fragment belongs to (1-9).
    pub section: u8,
    /// Ordering key within the section.
    pub key: ChunkKey,
    /// Payload text.
    pub payload: String,
}

impl HeaderChunk {
    /// Create a new fragment.
    pub fn new(section: u8, key: ChunkKey, payload: impl Into<String>) -> Self {
        Self {
            section,
            key,
            payload: payload.into(),
        }
    }

    /// Full header name this fragment is emitted under.
    pub fn name(&self) -> String {
        header_name(self.section, self.key)
    }

    /// Get a reference to the payload text.
    #[inline]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Get the payload length in bytes.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Get the section digit.
    #[inline]
    pub fn section(&self) -> u8 {
        self.section
    }

    /// Get the ordering key.
    #[inline]
    pub fn key(&self) -> ChunkKey {
        self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::wire_format::{CLOSE_KEY, DUMP_SECTION, OPEN_KEY};

    #[test]
    fn test_chunk_creation() {
        let chunk = HeaderChunk::new(DUMP_SECTION, OPEN_KEY, "\"FirePHP.Dump\":{");
        assert_eq!(chunk.section(), DUMP_SECTION);
        assert_eq!(chunk.key(), OPEN_KEY);
        assert_eq!(chunk.payload(), "\"FirePHP.Dump\":{");
        assert_eq!(chunk.payload_len(), 16);
    }

    #[test]
    fn test_chunk_name() {
        let chunk = HeaderChunk::new(DUMP_SECTION, CLOSE_KEY, "x");
        assert_eq!(chunk.name(), "X-FirePHP-Data-299999999999");
    }

    #[test]
    fn test_chunk_empty_payload() {
        let chunk = HeaderChunk::new(DUMP_SECTION, OPEN_KEY, "");
        assert_eq!(chunk.payload_len(), 0);
        assert!(chunk.payload().is_empty());
    }
}
