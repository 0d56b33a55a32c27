//! Request definitions
//!
//! One request is built per call and discarded once sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{Location, Position, Region};

/// Named parameters for one action
///
/// Values are any JSON value. Keys present in the map are sent; anything
/// optional the caller did not supply is left out rather than sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add a parameter
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Add a parameter only when `value` is `Some`
    pub fn with_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Add `x`, `y`, `z`
    pub fn with_position(self, pos: Position) -> Self {
        self.with("x", pos.x).with("y", pos.y).with("z", pos.z)
    }

    /// Add `x`, `y`, `z` as floating point values
    pub fn with_location(self, loc: Location) -> Self {
        self.with("x", loc.x).with("y", loc.y).with("z", loc.z)
    }

    /// Add both corners as `x1..z1`, `x2..z2`
    pub fn with_region(self, region: &Region) -> Self {
        self.with("x1", region.from.x)
            .with("y1", region.from.y)
            .with("z1", region.from.z)
            .with("x2", region.to.x)
            .with("y2", region.to.y)
            .with("z2", region.to.z)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        Value::Object(params.0)
    }
}

/// A request line: token, action name and parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub token: String,
    pub action: String,
    #[serde(default)]
    pub params: Params,
}

impl Request {
    pub fn new(token: impl Into<String>, action: impl Into<String>, params: Params) -> Self {
        Self {
            token: token.into(),
            action: action.into(),
            params,
        }
    }
}
