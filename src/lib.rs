//! # craftlink
//!
//! A blocking client for a game server's remote command port:
//! - Line-delimited JSON over TCP, one connection per call
//! - Token authentication on every request
//! - Typed wrappers for block, player, world and entity commands
//! - Bulk edits that place a whole 3D grid in one round trip
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                                │
//! │      set_block / fill / get_pos / teleport / edit / ...      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command → Params
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   send_command                               │
//! │        Request line out, Response line in, classify          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Connection  │          │    Codec    │
//!   │ (TcpStream) │          │ (JSON + \n) │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use craftlink::{Client, ClientConfig, Region};
//!
//! let client = Client::new(
//!     ClientConfig::builder()
//!         .host("127.0.0.1")
//!         .port(65535)
//!         .token("secret")
//!         .build(),
//! );
//!
//! client.set_block(100, 64, 200, "minecraft:stone")?;
//! let placed = client.fill(Region::new((0, 64, 0), (9, 64, 9)), "minecraft:glass")?;
//! let pos = client.get_pos("Steve")?;
//! # Ok::<(), craftlink::CraftError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod types;
pub mod block;
pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{classify_failure, CraftError, Result};
pub use config::ClientConfig;
pub use client::Client;
pub use block::{BlockDescriptor, BlockGrid, BlockSpec};
pub use protocol::{Action, Command, Params};
pub use types::{GameMode, Location, Position, Region, Rotation, Selector, TimeAction, Weather};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of craftlink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
