//! Round trip - log through a request-scoped logger, then replay the
//! receiver's view.
//!
//! This demo stands in for a real HTTP host: it builds a logger around an
//! in-memory sink, logs at several levels, and prints both the raw headers
//! (what goes on the wire) and the name-ordered reassembly (what the console
//! client rebuilds).
//!
//! ```sh
//! cargo run --example roundtrip
//! ```

use firenet::{ConsoleLogger, Level, MemorySink};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // In a real host this is the request's User-Agent header.
    let user_agent = "Mozilla/5.0 (X11; Linux x86_64) Firefox/3.0 FirePHP/0.4";
    let mut logger = ConsoleLogger::new(MemorySink::new(), Some(user_agent));
    println!("peer detected: {}\n", logger.enabled());

    // Console channel: one message per level, one with a label.
    logger.log("request started");
    logger.info("cache warm");
    logger.warn("quota at 80%");
    logger.log_with(Level::Error, Some("db"), "connection refused");

    // Dump channel: labeled values, encoded with the always-quote rule.
    logger.dump("user_id", &42_u32);
    logger.dump("roles", &vec!["admin", "ops"]);

    // Trace with the current call stack.
    logger.trace_message(Some("handler checkpoint"));

    let sink = logger.into_sink();

    println!("emitted headers ({}):", sink.len());
    for (name, value) in sink.headers() {
        println!("  {name}: {value}");
    }

    println!("\nreassembled document:");
    println!("{}", sink.reassemble());
}
