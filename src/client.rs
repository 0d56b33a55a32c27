//! Client Module
//!
//! The public entry point: one method per remote action, all funnelled
//! through [`Client::send_command`].
//!
//! ## Responsibilities
//! - Build the request from the configured token and the call's parameters
//! - Open a fresh connection per call and close it on every exit path
//! - Turn the response into the operation's result type or a typed failure

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::block::{BlockDescriptor, BlockGrid};
use crate::config::ClientConfig;
use crate::error::{CraftError, Result};
use crate::network::Connection;
use crate::protocol::{Command, Params, Request};
use crate::types::{GameMode, Location, Position, Region, Rotation, Selector, TimeAction, Weather};

/// Blocking client for the game server's remote command port
///
/// Holds configuration only. Every call opens its own socket, so a client can
/// be cloned or shared across threads freely.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Create a client from a full configuration
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Request / Response
    // -------------------------------------------------------------------------

    /// Perform one exchange and return the server's `data` unchanged.
    ///
    /// Fails with `Connection` for transport problems, `Authentication` or
    /// `Command` when the server reports failure, and `Protocol` when the
    /// response line is not valid JSON.
    pub fn send_command(&self, action: &str, params: Params) -> Result<Value> {
        let request = Request::new(self.config.token.as_str(), action, params);

        let mut conn = Connection::open(&self.config)?;
        let response = conn.round_trip(&request)?;
        conn.close();

        match response.into_result() {
            Ok(data) => Ok(data),
            Err(e) => {
                tracing::debug!("{} rejected by server: {}", action, e);
                Err(e)
            }
        }
    }

    /// Send a typed command and decode its result
    pub fn execute<T: DeserializeOwned>(&self, command: Command) -> Result<T> {
        let action = command.action();
        let data = self.send_command(action.as_str(), command.into_params())?;
        T::deserialize(&data).map_err(|e| {
            CraftError::Protocol(format!("unexpected {} result {}: {}", action, data, e))
        })
    }

    // -------------------------------------------------------------------------
    // Blocks
    // -------------------------------------------------------------------------

    /// Place a block. Returns 1 on success.
    pub fn set_block(&self, x: i64, y: i64, z: i64, block: &str) -> Result<i64> {
        self.place(Position::new(x, y, z), BlockDescriptor::new(block))
    }

    /// Place a block with optional state properties and extra data
    pub fn place(&self, pos: Position, block: BlockDescriptor) -> Result<i64> {
        self.execute(Command::SetBlock { pos, block })
    }

    /// Get the block id at a position
    pub fn get_block(&self, x: i64, y: i64, z: i64) -> Result<String> {
        self.execute(Command::GetBlock {
            pos: Position::new(x, y, z),
        })
    }

    /// Fill a region with one block type. Returns the number of blocks affected.
    pub fn fill(&self, region: Region, block: &str) -> Result<i64> {
        self.execute(Command::Fill {
            region,
            block: block.to_string(),
        })
    }

    /// Copy a region to `dest`. Returns the number of blocks cloned.
    pub fn clone_region(&self, region: Region, dest: Position) -> Result<i64> {
        self.execute(Command::Clone { region, dest })
    }

    /// Place a whole grid in one request, with grid cell `(0, 0, 0)` at
    /// `origin`. Returns the number of blocks placed.
    pub fn edit(&self, origin: Position, grid: &BlockGrid) -> Result<i64> {
        tracing::debug!(
            "edit at {} with {} of {} cells set",
            origin,
            grid.placed_count(),
            grid.volume()
        );
        self.execute(Command::edit(origin, grid))
    }

    // -------------------------------------------------------------------------
    // Players
    // -------------------------------------------------------------------------

    /// Get a player's block position
    pub fn get_pos(&self, username: &str) -> Result<Position> {
        self.execute(Command::GetPos {
            username: username.to_string(),
        })
    }

    /// Teleport a player, optionally setting yaw and pitch together
    pub fn teleport(&self, username: &str, location: Location, rotation: Option<Rotation>) -> Result<bool> {
        self.execute(Command::Teleport {
            username: username.to_string(),
            location,
            rotation,
        })
    }

    /// Change a player's game mode
    pub fn gamemode(&self, username: &str, mode: GameMode) -> Result<bool> {
        self.execute(Command::GameMode {
            username: username.to_string(),
            mode,
        })
    }

    /// Give a player `amount` of an item
    pub fn give(&self, username: &str, item: &str, amount: i64) -> Result<bool> {
        self.execute(Command::Give {
            username: username.to_string(),
            item: item.to_string(),
            amount,
        })
    }

    // -------------------------------------------------------------------------
    // World
    // -------------------------------------------------------------------------

    /// Query or change the world time. Returns the time afterwards.
    pub fn time(&self, action: TimeAction) -> Result<i64> {
        self.execute(Command::Time(action))
    }

    /// Set the weather, optionally for a number of seconds
    pub fn weather(&self, condition: Weather, duration: Option<i64>) -> Result<bool> {
        self.execute(Command::Weather { condition, duration })
    }

    // -------------------------------------------------------------------------
    // Entities
    // -------------------------------------------------------------------------

    /// Spawn an entity. Returns its UUID.
    pub fn summon(&self, entity_type: &str, location: Location) -> Result<String> {
        self.execute(Command::Summon {
            entity_type: entity_type.to_string(),
            location,
        })
    }

    /// Remove entities. Returns the number removed.
    pub fn kill(&self, selector: &Selector) -> Result<i64> {
        self.execute(Command::Kill {
            selector: selector.clone(),
        })
    }
}
