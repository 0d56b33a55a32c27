//! Value types shared by the typed command wrappers
//!
//! These mirror the parameter shapes of the wire protocol. None of them
//! validate ranges; the server is the only authority on what is allowed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer block coordinates.
///
/// On the wire a position travels as a three-element array `[x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i64; 3]", into = "[i64; 3]")]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Shift this position by the given deltas
    pub fn offset(self, dx: i64, dy: i64, dz: i64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl From<[i64; 3]> for Position {
    fn from([x, y, z]: [i64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Position> for [i64; 3] {
    fn from(pos: Position) -> Self {
        [pos.x, pos.y, pos.z]
    }
}

impl From<(i64, i64, i64)> for Position {
    fn from((x, y, z): (i64, i64, i64)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Fractional world coordinates, used where the server accepts sub-block
/// precision (teleport, summon).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<Position> for Location {
    fn from(pos: Position) -> Self {
        Self::new(pos.x as f64, pos.y as f64, pos.z as f64)
    }
}

/// Facing angles for a teleport. Yaw and pitch are always sent together.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotation {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }
}

/// A cuboid between two inclusive corners, in any order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub from: Position,
    pub to: Position,
}

impl Region {
    pub fn new(from: impl Into<Position>, to: impl Into<Position>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Number of blocks in the region
    pub fn volume(&self) -> u64 {
        let span = |a: i64, b: i64| a.abs_diff(b) + 1;
        span(self.from.x, self.to.x) * span(self.from.y, self.to.y) * span(self.from.z, self.to.z)
    }
}

/// Player game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Survival => "survival",
            GameMode::Creative => "creative",
            GameMode::Adventure => "adventure",
            GameMode::Spectator => "spectator",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    Rain,
    Thunder,
}

impl Weather {
    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Rain => "rain",
            Weather::Thunder => "thunder",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// World time operation. `Set` and `Add` carry a tick value, `Query` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeAction {
    Set(i64),
    Add(i64),
    Query,
}

impl TimeAction {
    /// Wire name of the sub-action
    pub fn name(self) -> &'static str {
        match self {
            TimeAction::Set(_) => "set",
            TimeAction::Add(_) => "add",
            TimeAction::Query => "query",
        }
    }

    pub fn value(self) -> Option<i64> {
        match self {
            TimeAction::Set(v) | TimeAction::Add(v) => Some(v),
            TimeAction::Query => None,
        }
    }
}

/// Which entities a kill command targets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Every non-player entity
    All,
    /// A single player by name
    Player(String),
    /// Every entity of one type, e.g. `minecraft:zombie`
    EntityType(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Player(name) => write!(f, "player:{}", name),
            Selector::EntityType(kind) => f.write_str(kind),
        }
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("all") {
            Selector::All
        } else if let Some(name) = raw.strip_prefix("player:") {
            Selector::Player(name.to_string())
        } else {
            Selector::EntityType(raw.to_string())
        }
    }
}
