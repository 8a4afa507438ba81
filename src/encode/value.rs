//! Wire value tree and rendering.
//!
//! Implements the FirePHP dialect of JSON. It is deliberately not general
//! purpose JSON:
//!
//! - every scalar — booleans and numbers included — renders as a quoted,
//!   escaped string (the console expects it that way)
//! - timestamps are the one exception and render unquoted, in a fixed UTC
//!   form
//! - structured objects carry a synthetic `Class` field naming their type
//!
//! Rendering never fails. Nesting deeper than [`MAX_RENDER_DEPTH`] degrades
//! to a quoted placeholder instead of recursing further; the tree itself is
//! owned, so cyclic values cannot be constructed.
//!
//! # Example
//!
//! ```
//! use firenet::encode::{quote, Value};
//!
//! let value = Value::Sequence(vec![
//!     Value::Number("42".to_string()),
//!     Value::Text("a \"quoted\" word".to_string()),
//!     Value::Null,
//! ]);
//! assert_eq!(value.render(), r#"["42","a \"quoted\" word",null]"#);
//! assert_eq!(quote("line\nbreak"), r#""line\nbreak""#);
//! ```

use chrono::{DateTime, Utc};

/// JSON null literal.
pub const NULL: &str = "null";

/// Synthetic property naming a record's type on the wire.
pub const CLASS_FIELD: &str = "Class";

/// Maximum nesting depth rendered before degrading to [`DEPTH_PLACEHOLDER`].
pub const MAX_RENDER_DEPTH: usize = 64;

/// Quoted placeholder emitted where rendering hits the depth cutoff.
pub const DEPTH_PLACEHOLDER: &str = "\"...\"";

/// A value in the wire form the console client understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; renders as the bare `null` literal.
    Null,
    /// Boolean; renders as the quoted display form.
    Bool(bool),
    /// Number held as decimal text; renders quoted.
    Number(String),
    /// Text; renders escaped and quoted.
    Text(String),
    /// UTC instant; renders unquoted in fixed `YYYY-MM-DDThh:mm:ss(.fff)Z` form.
    Timestamp(DateTime<Utc>),
    /// Ordered sequence; renders as `[e0,e1,...]`.
    Sequence(Vec<Value>),
    /// Ordered key/value pairs; renders as `{k0:v0,k1:v1,...}`.
    Mapping(Vec<(Value, Value)>),
    /// `Class`-tagged composite; the wire form of a structured object.
    Record(Record),
}

impl Value {
    /// Render the value to its wire text form.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        if depth > MAX_RENDER_DEPTH {
            out.push_str(DEPTH_PLACEHOLDER);
            return;
        }
        match self {
            Value::Null => out.push_str(NULL),
            Value::Bool(value) => quote_into(if *value { "true" } else { "false" }, out),
            Value::Number(digits) => quote_into(digits, out),
            Value::Text(text) => quote_into(text, out),
            Value::Timestamp(instant) => out.push_str(&format_timestamp(instant)),
            Value::Sequence(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.render_into(out, depth + 1);
                }
                out.push(']');
            }
            Value::Mapping(entries) => {
                out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    key.render_into(out, depth + 1);
                    out.push(':');
                    value.render_into(out, depth + 1);
                }
                out.push('}');
            }
            Value::Record(record) => record.render_into(out, depth),
        }
    }
}

/// A `Class`-tagged composite.
///
/// The `Class` field always renders first and names the fully-qualified type;
/// the remaining fields render in the order they were added. A field a type
/// does not add is simply absent from the wire form.
///
/// # Example
///
/// ```
/// use firenet::encode::{Record, Value};
///
/// let record = Record::new("app::session::Session")
///     .field("id", Value::Number("7".to_string()))
///     .field("anonymous", Value::Bool(false));
/// assert_eq!(
///     Value::Record(record).render(),
///     r#"{"Class":"app::session::Session","id":"7","anonymous":"false"}"#,
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    class: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Start a record for the given fully-qualified type name.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field; fields render in insertion order, after `Class`.
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// The type name rendered into the `Class` field.
    #[inline]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Fields in render order, `Class` excluded.
    #[inline]
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        out.push('{');
        quote_into(CLASS_FIELD, out);
        out.push(':');
        quote_into(&self.class, out);
        for (name, value) in &self.fields {
            out.push(',');
            quote_into(name, out);
            out.push(':');
            value.render_into(out, depth + 1);
        }
        out.push('}');
    }
}

/// Escape and double-quote a string for the wire form.
///
/// Backslash, double quote, CR and LF are escaped. The single pass makes the
/// backslash-first ordering of the escape rules implicit: an inserted escape
/// is never rescanned.
pub fn quote(data: &str) -> String {
    let mut out = String::with_capacity(data.len() + 2);
    quote_into(data, &mut out);
    out
}

fn quote_into(data: &str, out: &mut String) {
    out.push('"');
    for ch in data.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

/// Fixed round-trippable UTC form; fractional seconds only when nonzero.
fn format_timestamp(instant: &DateTime<Utc>) -> String {
    if instant.timestamp_subsec_millis() == 0 {
        instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    } else {
        instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }
}
