//! Command exchange
//!
//! Orchestrates one half-duplex command cycle: send the command line,
//! optionally stream a binary payload, then accumulate and frame the reply.
//! Generic over [`Transport`] so the engine can be exercised without a
//! socket.

use std::io::Read;

use crate::error::Result;
use crate::network::Transport;
use super::framing::Framer;
use super::response::Response;

/// Issue a plain command and frame its reply.
///
/// Blocks until the terminator has been seen or a transport error occurs.
pub fn issue_command<T: Transport>(transport: &mut T, line: &str) -> Result<Vec<Response>> {
    tracing::trace!(command = line, "sending command");
    transport.write_line(line)?;
    read_reply(transport)
}

/// Issue a command followed by `size` bytes of binary payload.
///
/// The command line carries a `:<size>` suffix announcing the payload; the
/// payload is streamed in bounded chunks and closed with an explicit
/// `\r\n`. A zero-size payload still produces the `:0` prefix and the
/// terminator, which is a valid request frame. Read or write failure
/// mid-stream aborts immediately; there is no partial-payload recovery.
pub fn issue_command_with_payload<T, P>(
    transport: &mut T,
    prefix: &str,
    size: u64,
    payload: &mut P,
) -> Result<Vec<Response>>
where
    T: Transport,
    P: Read,
{
    let line = format!("{} :{}", prefix, size);
    tracing::trace!(command = %line, "sending payload command");
    transport.write_line(&line)?;

    let mut chunk = vec![0u8; transport.chunk_size()];
    let mut sent: u64 = 0;
    loop {
        let n = payload.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        transport.write_raw(&chunk[..n])?;
        sent += n as u64;
    }
    transport.write_raw(b"\r\n")?;
    tracing::trace!(bytes = sent, "payload sent");

    read_reply(transport)
}

/// Accumulate chunks until the reply is complete, then split and parse.
///
/// Each cycle starts from an empty buffer; nothing survives between
/// commands.
fn read_reply<T: Transport>(transport: &mut T) -> Result<Vec<Response>> {
    let mut framer = Framer::new();

    while !framer.is_complete() {
        let chunk = transport.read_chunk()?;
        framer.extend(chunk);
    }

    tracing::trace!(bytes = framer.len(), "reply framed");
    framer.into_responses()
}
