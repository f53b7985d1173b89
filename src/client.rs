//! Client façade
//!
//! Thin convenience layer over the transport session and protocol engine.
//! One client owns one connection; the protocol is strictly half-duplex,
//! so a new command must not be issued before the previous reply has been
//! framed. The client takes `&mut self` for every command, which enforces
//! this for single-threaded use; sharing across threads requires external
//! serialization.

use std::io::Read;

use crate::config::Config;
use crate::error::{IqdbError, Result};
use crate::network::{Session, Transport};
use crate::protocol::{
    self, Command, DbListEntry, MultiQueryResult, QueryFlags, QueryResult, Response,
    RES_KEY_VALUE,
};

/// A connected iqdb client
pub struct Client {
    session: Session,
}

impl Client {
    /// Connect to a server with default configuration
    pub fn connect(addr: impl Into<String>) -> Result<Self> {
        Self::connect_with(&Config::builder().server_addr(addr).build())
    }

    /// Connect with explicit configuration
    pub fn connect_with(config: &Config) -> Result<Self> {
        Ok(Self {
            session: Session::open(config)?,
        })
    }

    // -------------------------------------------------------------------------
    // Raw command interface
    // -------------------------------------------------------------------------

    /// Issue a raw command line and return the parsed reply.
    ///
    /// Escape hatch for commands not covered by the typed wrappers.
    pub fn cmd(&mut self, line: &str) -> Result<Vec<Response>> {
        protocol::issue_command(&mut self.session, line)
    }

    /// Issue a command followed by `size` bytes of binary payload
    pub fn cmd_with_payload<P: Read>(
        &mut self,
        prefix: &str,
        size: u64,
        payload: &mut P,
    ) -> Result<Vec<Response>> {
        protocol::issue_command_with_payload(&mut self.session, prefix, size, payload)
    }

    // -------------------------------------------------------------------------
    // Typed commands
    // -------------------------------------------------------------------------

    /// Query a database for images similar to a file known to the server
    pub fn query(
        &mut self,
        db_id: u32,
        flags: QueryFlags,
        max_results: u32,
        filename: &str,
    ) -> Result<Vec<QueryResult>> {
        let line = Command::Query {
            db_id,
            flags,
            max_results,
            filename: filename.to_string(),
        }
        .to_line();

        let responses = self.cmd(&line)?;
        protocol::decode_query_results(&responses)
    }

    /// Query by uploading image data inline (the payload-upload variant)
    pub fn query_blob<P: Read>(
        &mut self,
        db_id: u32,
        flags: QueryFlags,
        max_results: u32,
        size: u64,
        payload: &mut P,
    ) -> Result<Vec<QueryResult>> {
        let prefix = format!("query {} {} {}", db_id, flags, max_results);
        let responses = self.cmd_with_payload(&prefix, size, payload)?;
        protocol::decode_query_results(&responses)
    }

    /// Query several databases; matches carry the originating db ID
    pub fn multi_query(
        &mut self,
        db_id: u32,
        flags: QueryFlags,
        max_results: u32,
        filename: &str,
    ) -> Result<Vec<MultiQueryResult>> {
        let line = Command::MultiQuery {
            db_id,
            flags,
            max_results,
            filename: filename.to_string(),
        }
        .to_line();

        let responses = self.cmd(&line)?;
        protocol::decode_multi_query_results(&responses)
    }

    /// Number of images in a database
    pub fn count(&mut self, db_id: u32) -> Result<u64> {
        let responses = self.cmd(&Command::Count { db_id }.to_line())?;

        for response in &responses {
            if response.code != RES_KEY_VALUE {
                continue;
            }
            if let Some(("count", value)) = response.key_value() {
                return value
                    .trim()
                    .parse()
                    .map_err(|_| IqdbError::Parse(format!("bad count value: {:?}", value)));
            }
        }

        Err(IqdbError::Parse("reply carried no count".to_string()))
    }

    /// List the loaded databases
    pub fn db_list(&mut self) -> Result<Vec<DbListEntry>> {
        let responses = self.cmd(&Command::DbList.to_line())?;
        protocol::decode_db_list(&responses)
    }

    /// Remove an image from a database.
    ///
    /// The only meaningful reply to `remove` is an error line, so unlike
    /// the query decoders this surfaces 3xx codes instead of skipping
    /// them.
    pub fn remove(&mut self, db_id: u32, image_id: u64) -> Result<()> {
        let responses = self.cmd(&Command::Remove { db_id, image_id }.to_line())?;

        if let Some(err) = responses.iter().find(|r| r.kind().is_error()) {
            return Err(IqdbError::Server {
                code: err.code,
                message: err.content.clone(),
            });
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Tell the server we are done and close the connection.
    ///
    /// Best-effort: the quit line is sent without waiting for a reply,
    /// since servers may drop the connection immediately.
    pub fn quit(mut self) {
        if !self.session.is_closed() {
            let _ = self.session.write_line(&Command::Quit.to_line());
        }
        self.session.close();
    }

    /// Close the connection without notifying the server. Idempotent.
    pub fn close(&mut self) {
        self.session.close();
    }
}
