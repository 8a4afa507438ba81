//! Protocol module - fragment naming, framing and section channels.
//!
//! Implements the header-chunking side of the wire: deterministic fragment
//! names a receiver can sort and reassemble, and the open/close reservation
//! trick that keeps each section's concatenation valid before its fragment
//! count is known.

mod channel;
mod chunk;
pub(crate) mod wire_format;

pub use channel::{Channel, HeaderProtocol, ProtocolState, TickCounter};
pub use chunk::HeaderChunk;
pub use wire_format::{
    header_name, ChunkKey, CLOSE_KEY, CONSOLE_KEY, CONSOLE_SECTION, DUMP_KEY, DUMP_SECTION,
    HEADER_PREFIX, MAX_MICROS, MAX_SECS, MICROS_DIGITS, OPEN_KEY, ROOT_CLOSE_SECTION,
    ROOT_SECTION, SECS_DIGITS, SKIP_TOKEN,
};
