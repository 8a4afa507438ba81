//! Peer capability detection.
//!
//! A client announces protocol support through its identification string
//! (typically the `User-Agent` request header) by carrying a
//! `FirePHP/<version>` token. Detection is a single match against a pattern
//! compiled once per process; the per-request logger caches the result at
//! construction, and an undetected peer makes every logging call a no-op.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a ` FirePHP/<version>` token, case-insensitively. The leading
/// whitespace is part of the protocol's detection contract.
const FIREPHP_PATTERN: &str = r"(?i)\sFirePHP/([.\d]*)\s?";

static FIREPHP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FIREPHP_PATTERN).expect("detection pattern is valid"));

/// Whether the identification string announces FirePHP support.
///
/// # Example
///
/// ```
/// assert!(firenet::detect::supports_firephp("Mozilla/5.0 FirePHP/0.4"));
/// assert!(!firenet::detect::supports_firephp("Mozilla/5.0"));
/// ```
pub fn supports_firephp(user_agent: &str) -> bool {
    FIREPHP_REGEX.is_match(user_agent)
}

/// Version token announced by the client, if any.
pub fn firephp_version(user_agent: &str) -> Option<&str> {
    FIREPHP_REGEX
        .captures(user_agent)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
