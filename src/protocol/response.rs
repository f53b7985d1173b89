//! Response definitions and typed decoding
//!
//! A reply is an ordered list of coded lines; decoders pick out the lines
//! of one kind and parse their content into records. Non-matching codes
//! (including embedded informational or error lines) are skipped by
//! policy, never escalated, so a decoder either yields every record of its
//! kind or fails with a parse error and yields nothing.

use crate::error::{IqdbError, Result};
use super::code::{ResponseKind, RES_DB_LIST, RES_MULTI_QUERY, RES_QUERY};

/// One parsed response line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Three-digit status code
    pub code: u16,

    /// Remainder of the line after the delimiter
    pub content: String,
}

impl Response {
    /// Classify by status code
    pub fn kind(&self) -> ResponseKind {
        ResponseKind::from_code(self.code)
    }

    /// Interpret the content as a `key=value` pair (informational lines)
    pub fn key_value(&self) -> Option<(&str, &str)> {
        self.content.split_once('=')
    }
}

/// One candidate image from a single-database query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryResult {
    /// Image identifier (hexadecimal on the wire)
    pub image_id: u64,

    /// Similarity score
    pub score: f64,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,
}

/// A query match qualified by the database that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiQueryResult {
    /// Database the match came from
    pub db_id: u32,

    /// The match itself
    pub result: QueryResult,
}

/// One entry of a database listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbListEntry {
    pub db_id: u32,
    pub filename: String,
}

// =============================================================================
// Decoders
// =============================================================================

/// Decode the query-match lines (code 200) of a reply.
///
/// All-or-nothing: a single unparseable field fails the whole decode with
/// no partial results. Input order is preserved. A reply containing no
/// match lines decodes to an empty list, not an error.
pub fn decode_query_results(responses: &[Response]) -> Result<Vec<QueryResult>> {
    let mut results = Vec::new();

    for response in responses {
        if response.code != RES_QUERY {
            continue;
        }
        results.push(parse_match(&response.content)?);
    }

    Ok(results)
}

/// Decode the multi-database match lines (code 201) of a reply.
///
/// Same as [`decode_query_results`] with one extra leading decimal field,
/// the originating database ID.
pub fn decode_multi_query_results(responses: &[Response]) -> Result<Vec<MultiQueryResult>> {
    let mut results = Vec::new();

    for response in responses {
        if response.code != RES_MULTI_QUERY {
            continue;
        }

        let (db_field, rest) = response
            .content
            .split_once(' ')
            .ok_or_else(|| IqdbError::Parse(format!("truncated match record: {:?}", response.content)))?;

        let db_id = db_field
            .parse()
            .map_err(|_| IqdbError::Parse(format!("bad db id: {:?}", db_field)))?;

        results.push(MultiQueryResult {
            db_id,
            result: parse_match(rest)?,
        });
    }

    Ok(results)
}

/// Decode the database-listing lines (code 102) of a reply.
pub fn decode_db_list(responses: &[Response]) -> Result<Vec<DbListEntry>> {
    let mut entries = Vec::new();

    for response in responses {
        if response.code != RES_DB_LIST {
            continue;
        }

        let (db_field, filename) = response
            .content
            .split_once(' ')
            .ok_or_else(|| IqdbError::Parse(format!("bad db list entry: {:?}", response.content)))?;

        entries.push(DbListEntry {
            db_id: db_field
                .parse()
                .map_err(|_| IqdbError::Parse(format!("bad db id: {:?}", db_field)))?,
            filename: filename.to_string(),
        });
    }

    Ok(entries)
}

/// Parse one match record: `imgid score width height`, image ID in hex
fn parse_match(content: &str) -> Result<QueryResult> {
    let mut fields = content.split_whitespace();

    let image_id = next_field(&mut fields, content)?;
    let image_id = u64::from_str_radix(image_id, 16)
        .map_err(|_| IqdbError::Parse(format!("bad image id: {:?}", image_id)))?;

    let score = next_field(&mut fields, content)?;
    let score = score
        .parse()
        .map_err(|_| IqdbError::Parse(format!("bad score: {:?}", score)))?;

    let width = next_field(&mut fields, content)?;
    let width = width
        .parse()
        .map_err(|_| IqdbError::Parse(format!("bad width: {:?}", width)))?;

    let height = next_field(&mut fields, content)?;
    let height = height
        .parse()
        .map_err(|_| IqdbError::Parse(format!("bad height: {:?}", height)))?;

    Ok(QueryResult {
        image_id,
        score,
        width,
        height,
    })
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    record: &str,
) -> Result<&'a str> {
    fields
        .next()
        .ok_or_else(|| IqdbError::Parse(format!("truncated match record: {:?}", record)))
}
