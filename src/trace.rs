//! Stack traces in the wire form the console renders.
//!
//! A [`StackTrace`] is built once - from captured native frames or from
//! frames the host supplies - and is immutable afterward. Frames without a
//! known source line are dropped at construction; the trace's own file and
//! line mirror the first surviving frame. Encoding produces the
//! `Class`-tagged records the console client expects for TRACE messages.

use crate::encode::{Encodable, Record, Value};

/// Function-name prefixes dropped from captured stacks: the capture
/// machinery itself and the logger frames above it.
const CAPTURE_SKIP: [&str; 3] = ["backtrace::", "firenet::trace", "firenet::logger"];

/// One frame of a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Source file, when known.
    pub file: Option<String>,
    /// Source line; 0 means unknown.
    pub line: u32,
    /// Function name.
    pub function: String,
    /// Parameter names, when the host can supply them. Captured native
    /// frames carry none.
    pub args: Vec<String>,
}

impl StackFrame {
    /// Create a frame with no parameter names.
    pub fn new(file: Option<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file,
            line,
            function: function.into(),
            args: Vec::new(),
        }
    }

    /// Whether the frame maps to a known source line.
    #[inline]
    pub fn has_line(&self) -> bool {
        self.line != 0
    }
}

impl Encodable for StackFrame {
    fn encode(&self) -> Value {
        Value::Record(
            Record::new(std::any::type_name::<Self>())
                .field("file", self.file.encode())
                .field("line", self.line.encode())
                .field("function", self.function.encode())
                .field("args", Value::sequence_of(self.args.iter())),
        )
    }
}

/// A stack trace ready to log at TRACE level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackTrace {
    message: String,
    file: Option<String>,
    line: u32,
    frames: Vec<StackFrame>,
}

impl StackTrace {
    /// Message used when the caller supplies none.
    pub const DEFAULT_MESSAGE: &'static str = "Stack Trace";

    /// Build a trace from raw frames.
    ///
    /// Frames without a known source line are dropped; the trace's own
    /// file/line mirror the first surviving frame.
    pub fn from_frames(message: impl Into<String>, frames: Vec<StackFrame>) -> Self {
        let frames: Vec<StackFrame> = frames.into_iter().filter(StackFrame::has_line).collect();
        let (file, line) = frames
            .first()
            .map(|frame| (frame.file.clone(), frame.line))
            .unwrap_or((None, 0));
        Self {
            message: message.into(),
            file,
            line,
            frames,
        }
    }

    /// Capture the current native call stack.
    ///
    /// Frames belonging to the capture machinery and the logger are skipped,
    /// as are frames the platform cannot resolve to a source line.
    pub fn capture(message: Option<&str>) -> Self {
        let message = message.unwrap_or(Self::DEFAULT_MESSAGE);
        let mut frames = Vec::new();
        let captured = backtrace::Backtrace::new();
        for frame in captured.frames() {
            for symbol in frame.symbols() {
                let function = match symbol.name() {
                    Some(name) => name.to_string(),
                    None => continue,
                };
                if CAPTURE_SKIP
                    .iter()
                    .any(|prefix| function.starts_with(prefix))
                {
                    continue;
                }
                frames.push(StackFrame::new(
                    symbol.filename().map(|path| path.display().to_string()),
                    symbol.lineno().unwrap_or(0),
                    function,
                ));
            }
        }
        Self::from_frames(message, frames)
    }

    /// Trace description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source file of the first frame, when known.
    #[inline]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Source line of the first frame; 0 when no frame survived.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Surviving frames, outermost call last.
    #[inline]
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }
}

impl Encodable for StackTrace {
    fn encode(&self) -> Value {
        Value::Record(
            Record::new(std::any::type_name::<Self>())
                .field("Message", self.message.encode())
                .field("File", self.file.encode())
                .field("Line", self.line.encode())
                .field("Trace", Value::sequence_of(self.frames.iter())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::to_wire;

    fn located_frame() -> StackFrame {
        StackFrame::new(Some("src/handlers.rs".to_string()), 42, "handle_request")
    }

    fn unlocated_frame() -> StackFrame {
        StackFrame::new(None, 0, "mystery")
    }

    #[test]
    fn test_from_frames_drops_unlocated_frames() {
        let trace = StackTrace::from_frames("boom", vec![located_frame(), unlocated_frame()]);
        assert_eq!(trace.frames().len(), 1);
        assert_eq!(trace.frames()[0].function, "handle_request");
    }

    #[test]
    fn test_trace_mirrors_first_surviving_frame() {
        let trace = StackTrace::from_frames("boom", vec![unlocated_frame(), located_frame()]);
        assert_eq!(trace.file(), Some("src/handlers.rs"));
        assert_eq!(trace.line(), 42);
    }

    #[test]
    fn test_trace_with_no_surviving_frames() {
        let trace = StackTrace::from_frames("boom", vec![unlocated_frame()]);
        assert!(trace.frames().is_empty());
        assert_eq!(trace.file(), None);
        assert_eq!(trace.line(), 0);
    }

    #[test]
    fn test_encode_is_class_tagged_with_one_frame() {
        let trace = StackTrace::from_frames("boom", vec![located_frame(), unlocated_frame()]);
        let rendered = to_wire(&trace);

        assert!(rendered.starts_with("{\"Class\":\"firenet::trace::StackTrace\""));
        assert!(rendered.contains("\"Message\":\"boom\""));
        assert!(rendered.contains("\"File\":\"src/handlers.rs\""));
        assert!(rendered.contains("\"Line\":\"42\""));
        assert_eq!(rendered.matches("firenet::trace::StackFrame").count(), 1);
    }

    #[test]
    fn test_frame_encode_field_order() {
        let mut frame = located_frame();
        frame.args = vec!["request".to_string(), "state".to_string()];
        assert_eq!(
            to_wire(&frame),
            "{\"Class\":\"firenet::trace::StackFrame\",\"file\":\"src/handlers.rs\",\
             \"line\":\"42\",\"function\":\"handle_request\",\"args\":[\"request\",\"state\"]}",
        );
    }

    #[test]
    fn test_capture_smoke() {
        let trace = StackTrace::capture(None);
        assert_eq!(trace.message(), StackTrace::DEFAULT_MESSAGE);
        for frame in trace.frames() {
            assert!(frame.has_line());
            assert!(!frame.function.starts_with("backtrace::"));
        }

        let named = StackTrace::capture(Some("checkpoint"));
        assert_eq!(named.message(), "checkpoint");
    }
}
