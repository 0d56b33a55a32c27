//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! Each message is one JSON document followed by a single `\n`:
//! ```text
//! ┌──────────────────────────────────────────────┬──────┐
//! │ {"token":..,"action":..,"params":{..}}       │ \n   │
//! └──────────────────────────────────────────────┴──────┘
//! ┌──────────────────────────────────────────────┬──────┐
//! │ {"success":..,"error":..,"data":..}          │ \n   │
//! └──────────────────────────────────────────────┴──────┘
//! ```
//! The JSON encoder escapes newlines inside strings, so the only raw `\n` in
//! an encoded message is the terminator.

use std::io::{self, BufRead, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Request, Response};
use crate::error::{CraftError, Result};

/// Message terminator
pub const LINE_TERMINATOR: u8 = b'\n';

// =============================================================================
// Encoding
// =============================================================================

/// Encode a value as one JSON line, terminator included
fn encode_line<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut line = serde_json::to_vec(value)?;
    line.push(LINE_TERMINATOR);
    Ok(line)
}

/// Encode a request to bytes
pub fn encode_request(request: &Request) -> Result<Vec<u8>> {
    encode_line(request)
}

/// Encode a response to bytes
pub fn encode_response(response: &Response) -> Result<Vec<u8>> {
    encode_line(response)
}

// =============================================================================
// Decoding
// =============================================================================

/// Everything before the first terminator, or the whole buffer if there is none
pub fn first_line(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == LINE_TERMINATOR) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

fn decode_line<T: DeserializeOwned>(bytes: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(first_line(bytes))
        .map_err(|e| CraftError::Protocol(format!("malformed {} line: {}", what, e)))
}

/// Decode a request from bytes. Anything after the first newline is ignored.
pub fn decode_request(bytes: &[u8]) -> Result<Request> {
    decode_line(bytes, "request")
}

/// Decode a response from bytes. Anything after the first newline is ignored.
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    decode_line(bytes, "response")
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write one encoded line and flush
pub fn write_line<W: Write>(writer: &mut W, line: &[u8]) -> io::Result<()> {
    writer.write_all(line)?;
    writer.flush()
}

/// Read bytes up to and including the next terminator.
///
/// The returned line has the terminator stripped. If the stream ends first,
/// fails with `ErrorKind::UnexpectedEof`. The line length is not capped.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_until(LINE_TERMINATOR, &mut buf)?;
    if buf.last() != Some(&LINE_TERMINATOR) {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream ended before end of line",
        ));
    }
    buf.pop();
    Ok(buf)
}
