//! Protocol Module
//!
//! Defines the wire protocol between client and server.
//!
//! ## Protocol Format (line-delimited JSON)
//!
//! One TCP connection carries exactly one exchange:
//!
//! ```text
//! client ──► {"token": "...", "action": "setblock", "params": {...}}\n
//! client ◄── {"success": true, "data": 1}\n
//! ```
//!
//! ### Actions
//! - setblock, getblock, fill, getPos, teleport, gamemode, time,
//!   weather, give, summon, kill, clone, edit
//!
//! ### Failures
//! - `{"success": false, "error": "<message>"}`; the message decides
//!   whether the failure is about the token or about the command.

mod command;
mod request;
mod response;
mod codec;

pub use command::{Action, Command};
pub use request::{Params, Request};
pub use response::Response;
pub use codec::{
    decode_request, decode_response, encode_request, encode_response, first_line, read_line,
    write_line, LINE_TERMINATOR,
};

/// Connection error detail when the peer hangs up mid-response
pub const CLOSED_BY_SERVER: &str = "connection closed by server";
