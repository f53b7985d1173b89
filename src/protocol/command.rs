//! Command definitions
//!
//! Represents commands sent to the server and their wire formatting.

use std::fmt;

use super::QueryFlags;

/// A command to issue to the server
#[derive(Debug, Clone)]
pub enum Command {
    /// Query one database for images similar to a file known to the server
    Query {
        db_id: u32,
        flags: QueryFlags,
        max_results: u32,
        filename: String,
    },

    /// Query several databases at once; matches carry the originating db ID
    MultiQuery {
        db_id: u32,
        flags: QueryFlags,
        max_results: u32,
        filename: String,
    },

    /// Number of images in a database
    Count { db_id: u32 },

    /// List the loaded databases
    DbList,

    /// Remove an image from a database
    Remove { db_id: u32, image_id: u64 },

    /// Tell the server we are done
    Quit,
}

impl Command {
    /// Format the command line for the wire (without the terminator).
    ///
    /// Arguments are space-separated; image IDs travel as lowercase hex.
    pub fn to_line(&self) -> String {
        match self {
            Command::Query {
                db_id,
                flags,
                max_results,
                filename,
            } => format!("query {} {} {} {}", db_id, flags, max_results, filename),
            Command::MultiQuery {
                db_id,
                flags,
                max_results,
                filename,
            } => format!("multi_query {} {} {} {}", db_id, flags, max_results, filename),
            Command::Count { db_id } => format!("count {}", db_id),
            Command::DbList => "db_list".to_string(),
            Command::Remove { db_id, image_id } => {
                format!("remove {} {:x}", db_id, image_id)
            }
            Command::Quit => "quit".to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
