//! In-memory header store.

use super::HeaderSink;

/// Ordered in-memory header store.
///
/// Keeps fields in emission order; [`sorted`](MemorySink::sorted) and
/// [`reassemble`](MemorySink::reassemble) apply the receiver's view,
/// ascending name order. Useful in tests and as a staging buffer for hosts
/// that cannot expose their response object directly.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    headers: Vec<(String, String)>,
}

impl MemorySink {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether nothing was emitted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Fields in emission order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Fields in ascending name order - the order a receiver reassembles in.
    pub fn sorted(&self) -> Vec<(String, String)> {
        let mut headers = self.headers.clone();
        headers.sort_by(|a, b| a.0.cmp(&b.0));
        headers
    }

    /// Concatenate payloads in ascending name order.
    pub fn reassemble(&self) -> String {
        self.sorted().into_iter().map(|(_, value)| value).collect()
    }
}

impl HeaderSink for MemorySink {
    fn append_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }
}
