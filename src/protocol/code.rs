//! Response code vocabulary
//!
//! The three-digit status codes the server prefixes every reply line with.
//! These values are fixed by the protocol and must not be renumbered.

/// Informational / server metadata
pub const RES_INFO: u16 = 100;

/// `key=value` pair (server settings, statistics)
pub const RES_KEY_VALUE: u16 = 101;

/// Database listing entry
pub const RES_DB_LIST: u16 = 102;

/// Query match record: `imgid score width height`
pub const RES_QUERY: u16 = 200;

/// Multi-database query match record: `dbid imgid score width height`
pub const RES_MULTI_QUERY: u16 = 201;

/// Duplicate-detection record
pub const RES_DUPLICATE: u16 = 202;

/// Generic error
pub const RES_ERR_GENERIC: u16 = 300;

/// Non-fatal error (command failed, connection still usable)
pub const RES_ERR_NON_FATAL: u16 = 301;

/// Fatal error (server is giving up on the connection)
pub const RES_ERR_FATAL: u16 = 302;

/// End-of-reply marker; never surfaced to callers
pub const RES_TERMINATOR: u16 = 0;

/// Classification of a response line by its status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Info,
    KeyValue,
    DbList,
    QueryMatch,
    MultiQueryMatch,
    Duplicate,
    Error,
    /// Code outside the known vocabulary; preserved, not rejected
    Other,
}

impl ResponseKind {
    /// Classify a raw status code
    pub fn from_code(code: u16) -> Self {
        match code {
            RES_INFO => ResponseKind::Info,
            RES_KEY_VALUE => ResponseKind::KeyValue,
            RES_DB_LIST => ResponseKind::DbList,
            RES_QUERY => ResponseKind::QueryMatch,
            RES_MULTI_QUERY => ResponseKind::MultiQueryMatch,
            RES_DUPLICATE => ResponseKind::Duplicate,
            300..=399 => ResponseKind::Error,
            _ => ResponseKind::Other,
        }
    }

    /// Whether this code reports an error condition
    pub fn is_error(&self) -> bool {
        matches!(self, ResponseKind::Error)
    }
}
