//! Command definitions
//!
//! Every remote operation the client knows, with its wire action name and
//! the parameter mapping it sends.

use std::fmt;

use serde_json::Value;

use super::Params;
use crate::block::{BlockDescriptor, BlockGrid};
use crate::types::{GameMode, Location, Position, Region, Rotation, Selector, TimeAction, Weather};

/// Remote action names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SetBlock,
    GetBlock,
    Fill,
    GetPos,
    Teleport,
    GameMode,
    Time,
    Weather,
    Give,
    Summon,
    Kill,
    Clone,
    Edit,
}

impl Action {
    /// Every action, in catalog order
    pub const ALL: [Action; 13] = [
        Action::SetBlock,
        Action::GetBlock,
        Action::Fill,
        Action::GetPos,
        Action::Teleport,
        Action::GameMode,
        Action::Time,
        Action::Weather,
        Action::Give,
        Action::Summon,
        Action::Kill,
        Action::Clone,
        Action::Edit,
    ];

    /// The action string sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Action::SetBlock => "setblock",
            Action::GetBlock => "getblock",
            Action::Fill => "fill",
            Action::GetPos => "getPos",
            Action::Teleport => "teleport",
            Action::GameMode => "gamemode",
            Action::Time => "time",
            Action::Weather => "weather",
            Action::Give => "give",
            Action::Summon => "summon",
            Action::Kill => "kill",
            Action::Clone => "clone",
            Action::Edit => "edit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed remote command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Place one block, optionally with state and extra data
    SetBlock { pos: Position, block: BlockDescriptor },

    /// Read the block id at a position
    GetBlock { pos: Position },

    /// Fill a region with one block type
    Fill { region: Region, block: String },

    /// Read a player's block position
    GetPos { username: String },

    /// Move a player, optionally setting facing angles
    Teleport {
        username: String,
        location: Location,
        rotation: Option<Rotation>,
    },

    /// Change a player's game mode
    GameMode { username: String, mode: GameMode },

    /// Query or change the world time
    Time(TimeAction),

    /// Change the weather, optionally for `duration` seconds
    Weather {
        condition: Weather,
        duration: Option<i64>,
    },

    /// Put items into a player's inventory
    Give {
        username: String,
        item: String,
        amount: i64,
    },

    /// Spawn an entity
    Summon { entity_type: String, location: Location },

    /// Remove entities
    Kill { selector: Selector },

    /// Copy a region so its minimum corner lands on `dest`
    Clone { region: Region, dest: Position },

    /// Place a whole grid in one request. `blocks` is the encoded grid.
    Edit { origin: Position, blocks: Value },
}

impl Command {
    /// Build a bulk edit from a grid anchored at `origin`
    pub fn edit(origin: Position, grid: &BlockGrid) -> Self {
        Command::Edit {
            origin,
            blocks: grid.to_payload(),
        }
    }

    /// Get the action this command invokes
    pub fn action(&self) -> Action {
        match self {
            Command::SetBlock { .. } => Action::SetBlock,
            Command::GetBlock { .. } => Action::GetBlock,
            Command::Fill { .. } => Action::Fill,
            Command::GetPos { .. } => Action::GetPos,
            Command::Teleport { .. } => Action::Teleport,
            Command::GameMode { .. } => Action::GameMode,
            Command::Time(_) => Action::Time,
            Command::Weather { .. } => Action::Weather,
            Command::Give { .. } => Action::Give,
            Command::Summon { .. } => Action::Summon,
            Command::Kill { .. } => Action::Kill,
            Command::Clone { .. } => Action::Clone,
            Command::Edit { .. } => Action::Edit,
        }
    }

    /// Consume the command into its wire parameter mapping
    pub fn into_params(self) -> Params {
        match self {
            Command::SetBlock { pos, block } => Params::new()
                .with_position(pos)
                .with_opt("block_state", block.state_value())
                .with("block", block.block)
                .with_opt("nbt", block.nbt),
            Command::GetBlock { pos } => Params::new().with_position(pos),
            Command::Fill { region, block } => Params::new()
                .with_region(&region)
                .with("block", block),
            Command::GetPos { username } => Params::new().with("username", username),
            Command::Teleport {
                username,
                location,
                rotation,
            } => Params::new()
                .with("username", username)
                .with_location(location)
                .with_opt("yaw", rotation.map(|r| r.yaw))
                .with_opt("pitch", rotation.map(|r| r.pitch)),
            Command::GameMode { username, mode } => Params::new()
                .with("username", username)
                .with("mode", mode.as_str()),
            Command::Time(action) => Params::new()
                .with("action", action.name())
                .with_opt("value", action.value()),
            Command::Weather { condition, duration } => Params::new()
                .with("condition", condition.as_str())
                .with_opt("duration", duration),
            Command::Give {
                username,
                item,
                amount,
            } => Params::new()
                .with("username", username)
                .with("item", item)
                .with("amount", amount),
            Command::Summon {
                entity_type,
                location,
            } => Params::new()
                .with("entity_type", entity_type)
                .with_location(location),
            Command::Kill { selector } => Params::new().with("selector", selector.to_string()),
            Command::Clone { region, dest } => Params::new()
                .with_region(&region)
                .with("dest_x", dest.x)
                .with("dest_y", dest.y)
                .with("dest_z", dest.z),
            Command::Edit { origin, blocks } => Params::new()
                .with_position(origin)
                .with("blocks", blocks),
        }
    }
}
