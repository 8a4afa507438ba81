//! The `Encodable` capability — what a host value becomes on the wire.
//!
//! Dispatch is a closed impl set rather than runtime inspection; the policy,
//! first match wins, is encoded by which impl a host type has:
//!
//! 1. absent values (`Option::None`, `()`) → null
//! 2. primitive scalars (booleans, integers, floats, chars, strings) →
//!    quoted text
//! 3. UTC timestamps → unquoted fixed-form text
//! 4. ordered sequences (slices, arrays, `Vec`) → arrays
//! 5. insertion-ordered string-keyed associations ([`Value::mapping_of`],
//!    JSON objects via the `serde_json` bridge) → hashes
//! 6. generic key/value maps (`BTreeMap`, `HashMap`) → hashes in native
//!    iteration order
//! 7. other enumerables → arrays via [`Value::sequence_of`]
//! 8. everything else → a `Class`-tagged [`Record`] built explicitly by the
//!    type
//!
//! # Example
//!
//! ```
//! use firenet::encode::{to_wire, Encodable, Record, Value};
//!
//! struct Session {
//!     id: u32,
//!     token: String, // not exposed on the wire
//! }
//!
//! impl Encodable for Session {
//!     fn encode(&self) -> Value {
//!         Value::Record(
//!             Record::new(std::any::type_name::<Self>()).field("id", self.id.encode()),
//!         )
//!     }
//! }
//!
//! let session = Session { id: 7, token: "secret".to_string() };
//! assert!(to_wire(&session).ends_with(r#"","id":"7"}"#));
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDateTime, Utc};

use super::value::{Record, Value};

/// Capability to encode into the wire value tree.
pub trait Encodable {
    /// Encode `self` into a [`Value`].
    fn encode(&self) -> Value;
}

/// Encode a host value and render it to wire text in one step.
pub fn to_wire<T: Encodable + ?Sized>(value: &T) -> String {
    value.encode().render()
}

impl Value {
    /// Encode an iterator's items into a `Sequence`.
    pub fn sequence_of<I>(items: I) -> Value
    where
        I: IntoIterator,
        I::Item: Encodable,
    {
        Value::Sequence(items.into_iter().map(|item| item.encode()).collect())
    }

    /// Encode ordered key/value pairs into a `Mapping`, preserving the
    /// iterator's order.
    pub fn mapping_of<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Encodable,
        V: Encodable,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.encode(), value.encode()))
                .collect(),
        )
    }
}

impl Encodable for Value {
    fn encode(&self) -> Value {
        self.clone()
    }
}

impl Encodable for Record {
    fn encode(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encode(&self) -> Value {
        (**self).encode()
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn encode(&self) -> Value {
        match self {
            Some(value) => value.encode(),
            None => Value::Null,
        }
    }
}

impl Encodable for () {
    fn encode(&self) -> Value {
        Value::Null
    }
}

impl Encodable for bool {
    fn encode(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! encode_as_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encodable for $ty {
                fn encode(&self) -> Value {
                    Value::Number(self.to_string())
                }
            }
        )*
    };
}

encode_as_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Encodable for char {
    fn encode(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl Encodable for str {
    fn encode(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl Encodable for String {
    fn encode(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl Encodable for DateTime<Utc> {
    fn encode(&self) -> Value {
        Value::Timestamp(*self)
    }
}

impl Encodable for NaiveDateTime {
    // A naive instant is taken to already be UTC.
    fn encode(&self) -> Value {
        Value::Timestamp(self.and_utc())
    }
}

impl<T: Encodable> Encodable for [T] {
    fn encode(&self) -> Value {
        Value::sequence_of(self)
    }
}

impl<T: Encodable, const N: usize> Encodable for [T; N] {
    fn encode(&self) -> Value {
        Value::sequence_of(self)
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self) -> Value {
        Value::sequence_of(self)
    }
}

impl<K: Encodable, V: Encodable> Encodable for BTreeMap<K, V> {
    fn encode(&self) -> Value {
        Value::mapping_of(self.iter())
    }
}

impl<K: Encodable, V: Encodable> Encodable for HashMap<K, V> {
    fn encode(&self) -> Value {
        Value::mapping_of(self.iter())
    }
}

/// Bridge for arbitrary structured data arriving as JSON.
impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.to_string()),
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Mapping(
                entries
                    .iter()
                    .map(|(key, value)| (Value::Text(key.clone()), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Encodable for serde_json::Value {
    fn encode(&self) -> Value {
        Value::from(self)
    }
}
