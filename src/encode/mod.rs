//! Encoder module - host values to wire text.
//!
//! This module turns runtime values into the FirePHP dialect of JSON:
//!
//! - [`Value`] - the closed wire value tree and its rendering rules
//! - [`Encodable`] - the capability a host type implements to be loggable
//! - [`Record`] - builder for `Class`-tagged structured objects
//! - [`quote`] / [`to_wire`] - the escape-and-quote primitive and the fused
//!   encode-and-render entry point
//!
//! # Example
//!
//! ```
//! use firenet::encode::to_wire;
//!
//! // Scalars are always quoted strings on the wire, nulls stay bare.
//! assert_eq!(to_wire(&42), "\"42\"");
//! assert_eq!(to_wire(&None::<bool>), "null");
//! assert_eq!(to_wire(&vec!["a", "b"]), r#"["a","b"]"#);
//! ```

mod encodable;
mod value;

pub use encodable::{to_wire, Encodable};
pub use value::{quote, Record, Value, CLASS_FIELD, DEPTH_PLACEHOLDER, MAX_RENDER_DEPTH, NULL};
