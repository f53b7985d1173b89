//! Response framing
//!
//! A complete server reply is detected by the appearance of the terminator
//! substring `"\n000"` in the accumulated byte stream, not by counting
//! lines. The framer accumulates chunks into a growing buffer and tracks
//! how far it has already scanned so large replies are not rescanned from
//! the start on every read.

use bytes::BytesMut;

use crate::error::{IqdbError, Result};
use super::response::Response;
use super::code::RES_TERMINATOR;

/// Substring whose appearance marks a complete reply
const TERMINATOR: &[u8] = b"\n000";

/// Accumulates response bytes until a complete reply has arrived,
/// then splits it into parsed response lines.
///
/// One framer serves exactly one command cycle; nothing is retained
/// between replies.
#[derive(Debug, Default)]
pub struct Framer {
    /// Accumulated raw bytes
    buf: BytesMut,

    /// Offset up to which the terminator search has already run
    scanned: usize,

    /// Set once the terminator substring has been seen
    complete: bool,
}

impl Framer {
    /// Create an empty framer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and advance the terminator search.
    ///
    /// The search window starts `TERMINATOR.len() - 1` bytes before the
    /// previous end so a terminator straddling a chunk boundary is found.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);

        if self.complete {
            return;
        }

        let start = self.scanned.saturating_sub(TERMINATOR.len() - 1);
        if self.buf[start..]
            .windows(TERMINATOR.len())
            .any(|w| w == TERMINATOR)
        {
            self.complete = true;
        }
        self.scanned = self.buf.len();
    }

    /// Whether a complete reply has been accumulated
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of bytes accumulated so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Split the accumulated reply into parsed responses, consuming the
    /// framer. Empty records and the `000` terminator line are dropped;
    /// wire order is preserved.
    pub fn into_responses(self) -> Result<Vec<Response>> {
        let mut responses = Vec::new();

        for raw in self.buf[..].split(|&b| b == b'\n') {
            let line = String::from_utf8_lossy(raw);
            if let Some(response) = parse_line(line.trim_end_matches('\r'))? {
                responses.push(response);
            }
        }

        Ok(responses)
    }
}

/// Parse one response line of the form `"<3-digit code><delim><content>"`.
///
/// Returns `Ok(None)` for empty records and for the `000` terminator line.
pub fn parse_line(line: &str) -> Result<Option<Response>> {
    if line.is_empty() {
        return Ok(None);
    }

    let code: u16 = line
        .get(..3)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| IqdbError::Parse(format!("bad response code in line: {:?}", line)))?;

    if code == RES_TERMINATOR {
        return Ok(None);
    }

    // Content starts after the single delimiter character following the code.
    let content = line.get(4..).unwrap_or("");

    Ok(Some(Response {
        code,
        content: content.to_string(),
    }))
}
