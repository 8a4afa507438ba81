//! Section channels and the padding/reservation trick.
//!
//! A section cannot know its fragment count up front, so opening one writes
//! two reservations at once: the opening syntax at a key that sorts first,
//! and a self-canceling skip entry plus the closing syntax at a key that
//! sorts last. Every data fragment lands strictly between the two, which
//! keeps the name-ordered concatenation syntactically valid for any count,
//! zero included.
//!
//! Three sections exist per request: the document root (opened once,
//! transitively, by whichever channel goes first), the dump channel and the
//! console channel. The root's closing brace is written into section 9 so it
//! sorts after every data section.

use crate::transport::HeaderSink;

use super::chunk::HeaderChunk;
use super::wire_format::{
    ChunkKey, CLOSE_KEY, CONSOLE_KEY, CONSOLE_SECTION, DUMP_KEY, DUMP_SECTION, MAX_MICROS,
    MAX_SECS, OPEN_KEY, ROOT_CLOSE_SECTION, ROOT_SECTION, SKIP_TOKEN,
};

/// Logical data channels a caller can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// `FirePHP.Dump` - a label→value hash.
    Dump,
    /// `FirePHP.Firebug.Console` - an array of level/payload tuples.
    Console,
}

impl Channel {
    /// Section digit carrying this channel's fragments.
    #[inline]
    pub fn section(self) -> u8 {
        match self {
            Channel::Dump => DUMP_SECTION,
            Channel::Console => CONSOLE_SECTION,
        }
    }
}

/// Per-request channel-open bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtocolState {
    root_open: bool,
    dump_open: bool,
    console_open: bool,
}

impl ProtocolState {
    /// Whether the document root reservations were written.
    #[inline]
    pub fn root_open(&self) -> bool {
        self.root_open
    }

    /// Whether the dump channel reservations were written.
    #[inline]
    pub fn dump_open(&self) -> bool {
        self.dump_open
    }

    /// Whether the console channel reservations were written.
    #[inline]
    pub fn console_open(&self) -> bool {
        self.console_open
    }
}

/// Monotonic generator for data fragment time keys.
///
/// Replaces clock reads: two writes can never collide. Keys start just above
/// the open reservation and walk the 8-digit microsecond space, carrying into
/// seconds; the counter saturates one step short of the close reservation
/// (10^11 fragments away).
#[derive(Debug)]
pub struct TickCounter {
    count: u64,
}

impl TickCounter {
    /// Micros values per seconds step.
    const CARRY: u64 = (MAX_MICROS as u64) + 1;

    /// Last key handed out before saturation.
    const LIMIT: u64 = (MAX_SECS as u64) * Self::CARRY + (MAX_MICROS as u64) - 1;

    /// Counter whose first key is `(0, 2)` - the open reservation is `(0, 1)`.
    pub fn new() -> Self {
        Self { count: 2 }
    }

    /// Hand out the next key.
    pub fn next_key(&mut self) -> ChunkKey {
        let count = self.count.min(Self::LIMIT);
        if self.count < Self::LIMIT {
            self.count += 1;
        }
        ChunkKey::new((count / Self::CARRY) as u16, (count % Self::CARRY) as u32)
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits the framing and data fragments of one request's response.
///
/// Owns the sink and the per-request state; channels open lazily on first
/// write, and opening a data channel opens the document root first. One
/// instance serves exactly one request - sharing it across requests is a
/// correctness bug, not a throughput optimization.
#[derive(Debug)]
pub struct HeaderProtocol<S: HeaderSink> {
    sink: S,
    state: ProtocolState,
    counter: TickCounter,
}

impl<S: HeaderSink> HeaderProtocol<S> {
    /// Create a protocol writer around a response's header sink.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: ProtocolState::default(),
            counter: TickCounter::new(),
        }
    }

    /// Per-request open flags.
    #[inline]
    pub fn state(&self) -> &ProtocolState {
        &self.state
    }

    /// Borrow the sink.
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the protocol writer and return the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Append one data fragment to a channel, opening it first if needed.
    ///
    /// The fragment is written at the next counter key, which sorts strictly
    /// between the channel's open and close reservations.
    pub fn write(&mut self, channel: Channel, payload: &str) {
        self.open(channel);
        let key = self.counter.next_key();
        self.emit(HeaderChunk::new(channel.section(), key, payload));
    }

    /// Write a channel's reservations (and the document root's) exactly once.
    pub fn open(&mut self, channel: Channel) {
        match channel {
            Channel::Dump => self.open_dump(),
            Channel::Console => self.open_console(),
        }
    }

    fn open_root(&mut self) {
        if self.state.root_open {
            return;
        }
        self.emit(HeaderChunk::new(ROOT_SECTION, OPEN_KEY, "{"));
        self.emit(HeaderChunk::new(
            ROOT_CLOSE_SECTION,
            CLOSE_KEY,
            format!("\"{0}\":\"{0}\" }}", SKIP_TOKEN),
        ));
        self.state.root_open = true;
        tracing::debug!("opened root section");
    }

    fn open_dump(&mut self) {
        if self.state.dump_open {
            return;
        }
        self.open_root();
        self.emit(HeaderChunk::new(
            DUMP_SECTION,
            OPEN_KEY,
            format!("\"{}\":{{", DUMP_KEY),
        ));
        self.emit(HeaderChunk::new(
            DUMP_SECTION,
            CLOSE_KEY,
            format!("\"{0}\":\"{0}\" }},", SKIP_TOKEN),
        ));
        self.state.dump_open = true;
        tracing::debug!("opened dump section");
    }

    fn open_console(&mut self) {
        if self.state.console_open {
            return;
        }
        self.open_root();
        self.emit(HeaderChunk::new(
            CONSOLE_SECTION,
            OPEN_KEY,
            format!("\"{}\":[", CONSOLE_KEY),
        ));
        self.emit(HeaderChunk::new(
            CONSOLE_SECTION,
            CLOSE_KEY,
            format!("[\"{}\"]],", SKIP_TOKEN),
        ));
        self.state.console_open = true;
        tracing::debug!("opened console section");
    }

    fn emit(&mut self, chunk: HeaderChunk) {
        tracing::trace!(name = %chunk.name(), len = chunk.payload_len(), "emit fragment");
        self.sink.append_header(&chunk.name(), chunk.payload());
    }
}
