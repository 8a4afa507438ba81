//! Per-request console logger.
//!
//! [`ConsoleLogger`] is the surface a request handler talks to: it caches
//! the peer-detection result, routes levels to channels, opens channels
//! lazily through the protocol writer, and formats the per-message
//! envelopes.
//!
//! One logger serves exactly one request. Construct it where the request
//! context is in scope and thread it down the call chain; there is no
//! ambient instance lookup.
//!
//! # Example
//!
//! ```
//! use firenet::{ConsoleLogger, Level, MemorySink};
//!
//! let ua = "Mozilla/5.0 FirePHP/0.4";
//! let mut logger = ConsoleLogger::new(MemorySink::new(), Some(ua));
//!
//! logger.log_with(Level::Info, None, "hello");
//! logger.dump("user_id", &42_u32);
//!
//! let sink = logger.into_sink();
//! assert!(!sink.is_empty());
//! ```

use std::error::Error;

use crate::detect;
use crate::encode::{self, Encodable};
use crate::error::{FireNetError, Result};
use crate::protocol::{Channel, HeaderProtocol, ProtocolState};
use crate::trace::StackTrace;
use crate::transport::HeaderSink;

/// FirePHP logging levels; the wire form is the integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// General messages.
    Log = 0,
    /// Informational messages.
    Info = 1,
    /// Problems that are not necessarily errors.
    Warn = 2,
    /// Errors.
    Error = 3,
    /// Stack trace messages.
    Trace = 4,
    /// Data dumps.
    Dump = 5,
}

impl Level {
    /// Integer wire representation.
    #[inline]
    pub fn as_wire(self) -> u8 {
        self as u8
    }

    /// Channel this level's messages go to.
    #[inline]
    pub fn channel(self) -> Channel {
        match self {
            Level::Dump => Channel::Dump,
            _ => Channel::Console,
        }
    }
}

/// Per-request logger emitting FirePHP fragments into a header sink.
pub struct ConsoleLogger<S: HeaderSink> {
    protocol: HeaderProtocol<S>,
    enabled: bool,
}

impl<S: HeaderSink> ConsoleLogger<S> {
    /// Create a logger for one request.
    ///
    /// `user_agent` is the client identification string; a missing or
    /// non-FirePHP value makes every logging call a no-op for this request.
    pub fn new(sink: S, user_agent: Option<&str>) -> Self {
        let enabled = user_agent.map(detect::supports_firephp).unwrap_or(false);
        tracing::debug!(enabled, "firephp peer detection");
        Self {
            protocol: HeaderProtocol::new(sink),
            enabled,
        }
    }

    /// Whether the peer was detected as protocol aware.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Per-request channel-open flags.
    #[inline]
    pub fn state(&self) -> &ProtocolState {
        self.protocol.state()
    }

    /// Borrow the sink.
    #[inline]
    pub fn sink(&self) -> &S {
        self.protocol.sink()
    }

    /// Consume the logger and return the sink.
    pub fn into_sink(self) -> S {
        self.protocol.into_sink()
    }

    /// Log a message at an explicit level with an optional label.
    ///
    /// DUMP messages become `"<label>":<value>,` on the dump channel; every
    /// other level becomes `[<level>,[<label>,<value>]],` - or
    /// `[<level>,<value>],` without a label - on the console channel.
    pub fn log_with<V>(&mut self, level: Level, label: Option<&str>, value: &V)
    where
        V: Encodable + ?Sized,
    {
        if !self.enabled {
            return;
        }

        let rendered = encode::to_wire(value);
        let payload = if level == Level::Dump {
            format!("{}:{},", encode::quote(label.unwrap_or_default()), rendered)
        } else {
            match label {
                Some(label) => format!(
                    "[{},[{},{}]],",
                    level.as_wire(),
                    encode::quote(label),
                    rendered
                ),
                None => format!("[{},{}],", level.as_wire(), rendered),
            }
        };
        self.protocol.write(level.channel(), &payload);
    }

    /// Log a value at the default level with no label.
    pub fn log<V: Encodable + ?Sized>(&mut self, value: &V) {
        self.log_with(Level::Log, None, value);
    }

    /// Console message at INFO.
    pub fn info<V: Encodable + ?Sized>(&mut self, value: &V) {
        self.log_with(Level::Info, None, value);
    }

    /// Console message at WARN.
    pub fn warn<V: Encodable + ?Sized>(&mut self, value: &V) {
        self.log_with(Level::Warn, None, value);
    }

    /// Console message at ERROR.
    pub fn error<V: Encodable + ?Sized>(&mut self, value: &V) {
        self.log_with(Level::Error, None, value);
    }

    /// Dump a labeled value on the dump channel.
    pub fn dump<V: Encodable + ?Sized>(&mut self, label: &str, value: &V) {
        self.log_with(Level::Dump, Some(label), value);
    }

    /// Log the current call stack at TRACE with an optional message
    /// (`"Stack Trace"` when absent).
    pub fn trace_message(&mut self, message: Option<&str>) {
        if !self.enabled {
            return;
        }
        let trace = StackTrace::capture(message);
        self.log_trace(trace);
    }

    /// Trace an error value: message from its display form, stack captured
    /// at the call site.
    ///
    /// # Errors
    ///
    /// Returns [`FireNetError::MissingError`] when no error value is given;
    /// this is the library's only failing operation.
    pub fn trace_error(&mut self, error: Option<&dyn Error>) -> Result<()> {
        let error = error.ok_or(FireNetError::MissingError)?;
        if !self.enabled {
            return Ok(());
        }
        let message = error.to_string();
        let trace = StackTrace::capture(Some(&message));
        self.log_trace(trace);
        Ok(())
    }

    /// Log an error value at TRACE; the explicit counterpart of passing an
    /// error to `log`.
    pub fn log_error(&mut self, error: &dyn Error) {
        if !self.enabled {
            return;
        }
        let message = error.to_string();
        let trace = StackTrace::capture(Some(&message));
        self.log_trace(trace);
    }

    /// Log a prebuilt stack trace at TRACE level.
    ///
    /// Hosts with their own frame source build a [`StackTrace`] via
    /// [`StackTrace::from_frames`] and hand it in here.
    pub fn log_trace(&mut self, trace: StackTrace) {
        self.log_with(Level::Trace, None, &trace);
    }
}

/// Builder for [`ConsoleLogger`] - hosts that configure the identification
/// string and the sink in different places use this instead of
/// [`ConsoleLogger::new`].
#[derive(Debug, Clone, Default)]
pub struct ConsoleLoggerBuilder {
    user_agent: Option<String>,
}

impl ConsoleLoggerBuilder {
    /// Start an empty builder; without a user agent the logger is disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Client identification string used for capability detection.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the logger around a response's header sink.
    pub fn build<S: HeaderSink>(self, sink: S) -> ConsoleLogger<S> {
        ConsoleLogger::new(sink, self.user_agent.as_deref())
    }
}
