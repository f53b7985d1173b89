//! Error types for the iqdb client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using IqdbError
pub type Result<T> = std::result::Result<T, IqdbError>;

/// Unified error type for iqdb client operations
#[derive(Debug, Error)]
pub enum IqdbError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    /// Failure to establish the TCP connection. Never retried internally.
    #[error("connection failed: {0}")]
    Connection(std::io::Error),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Read or write failure on an established connection, including the
    /// peer closing the stream before a complete reply was framed. The
    /// connection is left in an undefined state and should be closed.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Operation attempted on a session after `close()`
    #[error("session is closed")]
    Closed,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// Malformed response line or unparseable field in a result record
    #[error("protocol parse error: {0}")]
    Parse(String),

    /// Error line (code 300–399) reported by the server for a command
    /// whose reply carries no other meaningful data
    #[error("server error {code}: {message}")]
    Server { code: u16, message: String },
}
