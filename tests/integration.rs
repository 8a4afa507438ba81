//! Integration tests for firenet.
//!
//! These tests drive the logger end to end against a `MemorySink` and check
//! the receiver's view: fragment names, exact payloads, and that the
//! name-ordered concatenation is always a valid JSON document.

use firenet::protocol::{Channel, HeaderProtocol};
use firenet::{ConsoleLogger, Level, MemorySink, StackFrame, StackTrace};
use proptest::prelude::*;

const FIREPHP_UA: &str = "Mozilla/5.0 (X11; Linux) FirePHP/0.4";

fn detected() -> ConsoleLogger<MemorySink> {
    ConsoleLogger::new(MemorySink::new(), Some(FIREPHP_UA))
}

/// Parse the name-ordered concatenation as JSON.
fn reassembled_json(sink: &MemorySink) -> serde_json::Value {
    let document = sink.reassemble();
    serde_json::from_str(&document)
        .unwrap_or_else(|err| panic!("reassembled document must parse: {err}\n{document}"))
}

/// Payloads of data fragments (reservation keys excluded), emission order.
fn data_payloads(sink: &MemorySink) -> Vec<String> {
    sink.headers()
        .iter()
        .filter(|(name, _)| !name.ends_with("00000001") && !name.ends_with("99999999"))
        .map(|(_, value)| value.clone())
        .collect()
}

/// An INFO message to a detected peer produces exactly one console fragment
/// with the documented payload and a deterministic name.
#[test]
fn test_info_hello_scenario() {
    let mut logger = detected();
    logger.log_with(Level::Info, None, "hello");

    let sink = logger.into_sink();
    assert_eq!(sink.len(), 5); // root pair + console pair + 1 data fragment

    let data: Vec<&(String, String)> = sink
        .headers()
        .iter()
        .filter(|(name, _)| name.ends_with("00000002"))
        .collect();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].0, "X-FirePHP-Data-300000000002");
    assert_eq!(data[0].1, "[1,\"hello\"],");
}

/// A dump produces exactly one dump-channel fragment with the documented
/// payload.
#[test]
fn test_dump_42_scenario() {
    let mut logger = detected();
    logger.dump("x", &42);

    let sink = logger.into_sink();
    assert_eq!(sink.len(), 5);

    let data: Vec<&(String, String)> = sink
        .headers()
        .iter()
        .filter(|(name, _)| name.ends_with("00000002"))
        .collect();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].0, "X-FirePHP-Data-200000000002");
    assert_eq!(data[0].1, "\"x\":\"42\",");
}

/// An undetected peer makes every call a guaranteed no-op.
#[test]
fn test_undetected_peer_emits_nothing() {
    let mut logger = ConsoleLogger::new(MemorySink::new(), Some("Mozilla/5.0 (Windows NT 10.0)"));
    logger.log("hello");
    logger.info(&true);
    logger.warn("careful");
    logger.dump("x", &42);
    logger.trace_message(None);

    assert!(!logger.enabled());
    assert!(logger.sink().is_empty());
}

/// A section fed zero data fragments still reassembles into valid JSON -
/// the skip reservation absorbs the missing content.
#[test]
fn test_reassembly_valid_with_zero_fragments() {
    let mut protocol = HeaderProtocol::new(MemorySink::new());
    protocol.open(Channel::Console);

    let sink = protocol.into_sink();
    let document = reassembled_json(&sink);
    let console = &document["FirePHP.Firebug.Console"];
    assert_eq!(console.as_array().map(Vec::len), Some(1)); // skip entry only
}

/// One data fragment reassembles into valid JSON.
#[test]
fn test_reassembly_valid_with_one_fragment() {
    let mut logger = detected();
    logger.info("only");

    let document = reassembled_json(logger.sink());
    let console = document["FirePHP.Firebug.Console"].as_array().unwrap().clone();
    assert_eq!(console.len(), 2);
    assert_eq!(console[0], serde_json::json!([1, "only"]));
}

/// Five data fragments reassemble into valid JSON with order preserved.
#[test]
fn test_reassembly_valid_with_five_fragments() {
    let mut logger = detected();
    for i in 0..5 {
        logger.info(&format!("message {i}"));
    }

    let document = reassembled_json(logger.sink());
    let console = document["FirePHP.Firebug.Console"].as_array().unwrap().clone();
    assert_eq!(console.len(), 6);
    for (i, entry) in console.iter().take(5).enumerate() {
        assert_eq!(entry[1], serde_json::json!(format!("message {i}")));
    }
}

/// Both channels plus every envelope shape in one request: the document
/// reassembles, the skip entries sit last in each section, and each message
/// kept its channel.
#[test]
fn test_full_document_reassembly() {
    let mut logger = detected();
    logger.log("plain");
    logger.info("informational");
    logger.warn("watch out");
    logger.error("went wrong");
    logger.log_with(Level::Info, Some("request"), "labeled");
    logger.dump("x", &42);
    logger.dump("flags", &vec![true, false]);

    let document = reassembled_json(logger.sink());

    let dump = document["FirePHP.Dump"].as_object().unwrap();
    assert_eq!(dump["x"], serde_json::json!("42"));
    assert_eq!(dump["flags"], serde_json::json!(["true", "false"]));
    assert_eq!(dump["__SKIP__"], serde_json::json!("__SKIP__"));

    let console = document["FirePHP.Firebug.Console"].as_array().unwrap();
    assert_eq!(console.len(), 6);
    assert_eq!(console[0], serde_json::json!([0, "plain"]));
    assert_eq!(console[4], serde_json::json!([1, ["request", "labeled"]]));
    assert_eq!(console[5], serde_json::json!(["__SKIP__"]));

    assert_eq!(document["__SKIP__"], serde_json::json!("__SKIP__"));
}

/// A trace built from two frames - one without a source line - encodes a
/// record whose `Trace` sequence holds exactly one frame.
#[test]
fn test_trace_filters_unlocated_frames() {
    let frames = vec![
        StackFrame::new(Some("src/app.rs".to_string()), 31, "app::run"),
        StackFrame::new(None, 0, "unresolved"),
    ];
    let mut logger = detected();
    logger.log_trace(StackTrace::from_frames("boom", frames));

    let payloads = data_payloads(logger.sink());
    assert_eq!(payloads.len(), 1);
    let payload = &payloads[0];
    assert!(payload.starts_with("[4,"));
    assert_eq!(payload.matches("firenet::trace::StackFrame").count(), 1);
    assert!(payload.contains("\"Message\":\"boom\""));
    assert!(!payload.contains("unresolved"));
}

/// Captured traces ride the same envelope and reassemble cleanly.
#[test]
fn test_trace_message_reassembles() {
    let mut logger = detected();
    logger.trace_message(Some("checkpoint"));

    let document = reassembled_json(logger.sink());
    let console = document["FirePHP.Firebug.Console"].as_array().unwrap();
    assert_eq!(console[0][0], serde_json::json!(4));
    assert_eq!(console[0][1]["Message"], serde_json::json!("checkpoint"));
}

/// Version extraction from the identification string.
#[test]
fn test_firephp_version() {
    assert_eq!(firenet::detect::firephp_version(FIREPHP_UA), Some("0.4"));
    assert_eq!(firenet::detect::firephp_version("Mozilla/5.0"), None);
}

/// Undo the wire escaping; panics on malformed input.
fn unquote(rendered: &str) -> String {
    let inner = rendered
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .expect("quoted text");
    let mut out = String::new();
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some('r') => out.push('\r'),
                Some('n') => out.push('\n'),
                other => panic!("unexpected escape: {other:?}"),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

proptest! {
    /// Escaping round-trips for any mix of backslash, quote, CR and LF.
    #[test]
    fn prop_quote_round_trips(chars in prop::collection::vec(
        prop_oneof![
            Just('\\'),
            Just('"'),
            Just('\r'),
            Just('\n'),
            prop::char::range('a', 'z'),
            Just(' '),
        ],
        0..64,
    )) {
        let input: String = chars.into_iter().collect();
        let rendered = firenet::encode::quote(&input);
        prop_assert_eq!(unquote(&rendered), input);
    }
}
