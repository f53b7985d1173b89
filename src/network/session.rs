//! Transport Session
//!
//! Owns one TCP connection to an iqdb server and performs the raw byte
//! exchange. No response bytes are buffered across calls; each command
//! cycle starts from an empty accumulation buffer in the protocol engine.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::config::Config;
use crate::error::{IqdbError, Result};
use super::Transport;

/// One connection to an iqdb server
pub struct Session {
    /// The underlying stream; `None` once closed
    stream: Option<TcpStream>,

    /// Scratch buffer for `read_chunk`, sized from config
    read_buf: Vec<u8>,

    /// Peer address for logging
    peer_addr: String,
}

impl Session {
    /// Dial the server and configure the socket.
    ///
    /// Dial failures surface as [`IqdbError::Connection`]; nothing is
    /// retried.
    pub fn open(config: &Config) -> Result<Self> {
        let stream = TcpStream::connect(&config.server_addr).map_err(IqdbError::Connection)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        tracing::debug!("connected to {}", peer_addr);

        Ok(Self {
            stream: Some(stream),
            read_buf: vec![0u8; config.chunk_size.max(1)],
            peer_addr,
        })
    }

    /// Close the connection. Idempotent; later I/O fails with
    /// [`IqdbError::Closed`].
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
            tracing::debug!("closed connection to {}", self.peer_addr);
        }
    }

    /// Whether `close()` has been called
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Peer address string (for logging)
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    fn stream_mut(&mut self) -> Result<&mut TcpStream> {
        self.stream.as_mut().ok_or(IqdbError::Closed)
    }
}

impl Transport for Session {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let stream = self.stream_mut()?;
        stream.write_all(line.as_bytes())?;
        stream.write_all(b"\r\n")?;
        stream.flush()?;
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream_mut()?;
        stream.write_all(bytes)?;
        Ok(())
    }

    fn read_chunk(&mut self) -> Result<&[u8]> {
        let stream = self.stream.as_mut().ok_or(IqdbError::Closed)?;
        let n = stream.read(&mut self.read_buf)?;

        // EOF before the reply terminator means the server went away
        // mid-reply; the framing loop must never spin on empty reads.
        if n == 0 {
            return Err(IqdbError::Transport(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                "connection closed before reply was complete",
            )));
        }

        Ok(&self.read_buf[..n])
    }

    fn chunk_size(&self) -> usize {
        self.read_buf.len()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
