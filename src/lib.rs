//! # firenet
//!
//! Server-side FirePHP logging for Rust: emit structured debug data to a
//! FirePHP-capable console client through response headers, leaving the
//! response body untouched.
//!
//! ## Architecture
//!
//! - **`encode`**: turns runtime values into the FirePHP dialect of JSON -
//!   composites carry a `Class` marker and every scalar is a quoted string.
//! - **`protocol`**: packs encoded fragments into `X-FirePHP-Data-*` header
//!   fields, using an open/close reservation per section so the client can
//!   reassemble them whatever the fragment count turns out to be.
//! - **`logger`**: the per-request surface - capability gate, level routing,
//!   lazy channel opening, message envelopes.
//!
//! The host supplies two things: the client identification string (for
//! capability detection) and a [`HeaderSink`] writing into its response.
//! Construct one [`ConsoleLogger`] per request and thread it explicitly;
//! nothing here is global except the compiled detection pattern.
//!
//! ## Example
//!
//! ```
//! use firenet::{ConsoleLogger, MemorySink};
//!
//! let ua = "Mozilla/5.0 (X11; Linux) FirePHP/0.4";
//! let mut logger = ConsoleLogger::new(MemorySink::new(), Some(ua));
//!
//! logger.info("request accepted");
//! logger.dump("user_id", &42_u32);
//!
//! let sink = logger.into_sink();
//! assert!(!sink.is_empty());
//! ```

pub mod detect;
pub mod encode;
pub mod error;
pub mod protocol;
pub mod transport;

mod logger;
mod trace;

pub use encode::{Encodable, Record, Value};
pub use error::FireNetError;
pub use logger::{ConsoleLogger, ConsoleLoggerBuilder, Level};
pub use trace::{StackFrame, StackTrace};
pub use transport::{HeaderSink, MemorySink};
