//! Header naming scheme and protocol constants.
//!
//! Every fragment travels as one response header field:
//! ```text
//! X-FirePHP-Data-<S><SSS><MMMMMMMM>
//!                 │  │    └ microseconds, 8 digits, zero padded
//!                 │  └ seconds, 3 digits, zero padded
//!                 └ section digit (1-9)
//! ```
//!
//! The receiver sorts names ascending and concatenates payloads, so the name
//! layout is load bearing: section digit first, then the time key. The time
//! components are ordering keys measured from an arbitrary epoch, not wall
//! clock values.

/// Prefix of every emitted header name.
pub const HEADER_PREFIX: &str = "X-FirePHP-Data-";

/// Self-canceling token that keeps a concatenated section syntactically
/// valid whatever the data fragment count (it absorbs the trailing comma).
pub const SKIP_TOKEN: &str = "__SKIP__";

/// JSON key of the dump channel in the reassembled document.
pub const DUMP_KEY: &str = "FirePHP.Dump";

/// JSON key of the console channel in the reassembled document.
pub const CONSOLE_KEY: &str = "FirePHP.Firebug.Console";

/// Section carrying the document open brace.
pub const ROOT_SECTION: u8 = 1;

/// Section carrying dump channel fragments.
pub const DUMP_SECTION: u8 = 2;

/// Section carrying console channel fragments.
pub const CONSOLE_SECTION: u8 = 3;

/// Section carrying the document close; sorts after every data section.
pub const ROOT_CLOSE_SECTION: u8 = 9;

/// Digits of the seconds component in a header name.
pub const SECS_DIGITS: usize = 3;

/// Digits of the microseconds component in a header name.
pub const MICROS_DIGITS: usize = 8;

/// Largest representable seconds component.
pub const MAX_SECS: u16 = 999;

/// Largest representable microseconds component.
pub const MAX_MICROS: u32 = 99_999_999;

/// Time key of every section-opening fragment; sorts before any data key.
pub const OPEN_KEY: ChunkKey = ChunkKey { secs: 0, micros: 1 };

/// Time key of every section-closing fragment; sorts after any data key.
pub const CLOSE_KEY: ChunkKey = ChunkKey {
    secs: MAX_SECS,
    micros: MAX_MICROS,
};

/// Ordering key of a fragment within its section.
///
/// Derived `Ord` is field order: seconds, then microseconds - the same order
/// the zero-padded header name sorts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkKey {
    /// Seconds component (0-999).
    pub secs: u16,
    /// Microseconds component (0-99_999_999).
    pub micros: u32,
}

impl ChunkKey {
    /// Create a key, clamping both components into their digit space.
    pub fn new(secs: u16, micros: u32) -> Self {
        Self {
            secs: secs.min(MAX_SECS),
            micros: micros.min(MAX_MICROS),
        }
    }
}

/// Build the full header name for a fragment.
///
/// # Example
///
/// ```
/// use firenet::protocol::{header_name, ChunkKey, CONSOLE_SECTION};
///
/// let name = header_name(CONSOLE_SECTION, ChunkKey::new(0, 2));
/// assert_eq!(name, "X-FirePHP-Data-300000000002");
/// ```
pub fn header_name(section: u8, key: ChunkKey) -> String {
    debug_assert!((1..=9).contains(&section));
    format!(
        "{}{}{:0secs$}{:0micros$}",
        HEADER_PREFIX,
        section,
        key.secs,
        key.micros,
        secs = SECS_DIGITS,
        micros = MICROS_DIGITS,
    )
}
