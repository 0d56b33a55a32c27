//! Network Module
//!
//! TCP connection handling for the client.
//!
//! ## Model
//! - One connection per call, never reused
//! - Connect, send one line, read one line, close
//! - Timeouts apply to connect, reads and writes; connect attempts to every
//!   resolved address share one deadline

mod connection;

pub use connection::{connect_any, Connection};
