//! Transport module - where fragments leave the library.
//!
//! The protocol writes named header fields into whatever response object the
//! host owns; [`HeaderSink`] is that seam. [`MemorySink`] is the in-memory
//! implementation used by tests and as the reference for host adapters.

mod memory;

pub use memory::MemorySink;

/// Append-only access to a response's metadata store.
///
/// Writes must land before the host flushes its response metadata; fragments
/// appended after the flush are lost. Names are unique per response by
/// construction upstream, so implementations never need to handle
/// replacement.
pub trait HeaderSink {
    /// Append one named header field.
    fn append_header(&mut self, name: &str, value: &str);
}

impl<S: HeaderSink + ?Sized> HeaderSink for &mut S {
    fn append_header(&mut self, name: &str, value: &str) {
        (**self).append_header(name, value);
    }
}
