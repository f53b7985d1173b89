//! Network Module
//!
//! Transport ownership for one iqdb connection.
//!
//! ## Architecture
//! - One `Session` per TCP connection, owned exclusively until close
//! - The protocol engine drives it through the `Transport` trait
//! - No buffering of response bytes is retained across command cycles

mod session;

pub use session::Session;

use crate::error::Result;

/// Byte-level operations the protocol engine needs from a connection.
///
/// Implemented by [`Session`] over TCP; test harnesses provide scripted
/// implementations.
pub trait Transport {
    /// Write a command line followed by the `\r\n` terminator
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Write a block of bytes verbatim (payload upload)
    fn write_raw(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read whatever is currently available, up to the chunk size.
    /// Orderly stream closure is an error: a reply must be terminated by
    /// the server before the connection may close.
    fn read_chunk(&mut self) -> Result<&[u8]>;

    /// Bound on chunk sizes for reads and payload streaming
    fn chunk_size(&self) -> usize {
        4096
    }
}
