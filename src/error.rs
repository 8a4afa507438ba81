//! Error types for firenet.

use thiserror::Error;

/// Main error type for all firenet operations.
///
/// Encoding and header emission never fail: absent values degrade to `null`,
/// unexposed fields are simply absent, and an undetected peer turns every
/// logging call into a no-op. The single operation that can report failure is
/// tracing an error value that was never supplied.
#[derive(Debug, Error)]
pub enum FireNetError {
    /// `trace_error` was called without an error value to trace.
    #[error("no error value to trace")]
    MissingError,
}

/// Result type alias using FireNetError.
pub type Result<T> = std::result::Result<T, FireNetError>;
