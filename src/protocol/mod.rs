//! Protocol Module
//!
//! Defines the iqdb wire protocol: command formatting, response framing,
//! and typed decoding.
//!
//! ## Wire Format (text over TCP)
//!
//! ### Command line
//! ```text
//! <command> <arg> <arg> ...\r\n
//! ```
//!
//! ### Payload-upload command line
//! ```text
//! <command> <arg> ... :<byte-count>\r\n
//! <byte-count raw bytes>\r\n
//! ```
//!
//! ### Response stream
//! ```text
//! <3-digit code> <content>\n
//! <3-digit code> <content>\n
//! 000 \n
//! ```
//!
//! A complete reply is terminated by a line whose code is `000`; that line
//! carries no payload and is never surfaced to the caller.
//!
//! ### Response codes
//! - 100–199: informational (server metadata, key-value pairs, db listing)
//! - 200–299: query results (single-db match, multi-db match, duplicate)
//! - 300–399: errors (generic, non-fatal, fatal)

mod code;
mod flags;
mod command;
mod framing;
mod exchange;
mod response;

pub use code::{
    ResponseKind, RES_INFO, RES_KEY_VALUE, RES_DB_LIST, RES_QUERY, RES_MULTI_QUERY,
    RES_DUPLICATE, RES_ERR_GENERIC, RES_ERR_NON_FATAL, RES_ERR_FATAL, RES_TERMINATOR,
};
pub use flags::QueryFlags;
pub use command::Command;
pub use framing::{Framer, parse_line};
pub use exchange::{issue_command, issue_command_with_payload};
pub use response::{
    Response, QueryResult, MultiQueryResult, DbListEntry,
    decode_query_results, decode_multi_query_results, decode_db_list,
};
