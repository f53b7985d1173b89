//! # iqdb
//!
//! Client for the iqdb image-similarity database wire protocol:
//! - Line-oriented, text-based commands over one TCP connection
//! - Numerically-coded multi-line responses framed by a `000` terminator
//! - Length-prefixed binary payload upload for querying by image data
//! - Strictly half-duplex: one in-flight command per connection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                                │
//! │          (query / query_blob / count / db_list)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Protocol Engine                             │
//! │     (command formatting, framing, response decoding)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Transport Session                            │
//! │        (one TCP connection, raw line/block I/O)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!                 iqdb server
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod network;
pub mod protocol;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{IqdbError, Result};
pub use config::Config;
pub use client::Client;
pub use protocol::{QueryFlags, QueryResult, MultiQueryResult, Response};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the iqdb client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
