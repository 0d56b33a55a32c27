//! Block Module
//!
//! Block descriptions and the rectangular grid used by bulk edits.
//!
//! ## Bulk Edit Payload
//! A grid travels as three nested JSON arrays, outer = x, middle = y,
//! inner = z. Every cell is present; skipped cells are `null`.
//! ```text
//! [                                   x = 0
//!   [ ["stone", null], [null, "air"] ],   y = 0, y = 1
//!   ...
//! ]
//! ```
//! The server adds the request origin to each cell's grid index to get the
//! absolute coordinate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CraftError, Result};

/// A block type with optional state properties and extra data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    /// Block type id, e.g. `minecraft:oak_stairs`
    pub block: String,

    /// State properties such as `facing`, `half` or `axis`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_state: Option<BTreeMap<String, String>>,

    /// Additional data such as sign text or a container name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbt: Option<Value>,
}

impl BlockDescriptor {
    pub fn new(block: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            block_state: None,
            nbt: None,
        }
    }

    /// Add one block state property
    pub fn with_state(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.block_state
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Block state as a JSON object of string values
    pub fn state_value(&self) -> Option<Value> {
        self.block_state.as_ref().map(|state| {
            Value::Object(
                state
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            )
        })
    }

    /// Attach additional data, replacing any set before
    pub fn with_nbt(mut self, nbt: Value) -> Self {
        self.nbt = Some(nbt);
        self
    }
}

impl From<&str> for BlockDescriptor {
    fn from(block: &str) -> Self {
        Self::new(block)
    }
}

impl From<String> for BlockDescriptor {
    fn from(block: String) -> Self {
        Self::new(block)
    }
}

/// One cell of a bulk edit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockSpec {
    /// Leave the server-side block unchanged. Encoded as `null`.
    #[default]
    Skip,

    /// A plain block id
    Id(String),

    /// A block id with state and extra data
    Descriptor(BlockDescriptor),
}

impl BlockSpec {
    pub fn is_skip(&self) -> bool {
        matches!(self, BlockSpec::Skip)
    }

    /// The block id this cell places, if any
    pub fn block_id(&self) -> Option<&str> {
        match self {
            BlockSpec::Skip => None,
            BlockSpec::Id(id) => Some(id),
            BlockSpec::Descriptor(desc) => Some(&desc.block),
        }
    }
}

impl From<&str> for BlockSpec {
    fn from(id: &str) -> Self {
        BlockSpec::Id(id.to_string())
    }
}

impl From<String> for BlockSpec {
    fn from(id: String) -> Self {
        BlockSpec::Id(id)
    }
}

impl From<BlockDescriptor> for BlockSpec {
    fn from(desc: BlockDescriptor) -> Self {
        BlockSpec::Descriptor(desc)
    }
}

impl<T: Into<BlockSpec>> From<Option<T>> for BlockSpec {
    fn from(cell: Option<T>) -> Self {
        cell.map(Into::into).unwrap_or(BlockSpec::Skip)
    }
}

/// Rectangular x → y → z grid of [`BlockSpec`] cells
///
/// Cells are stored flat; `(x, y, z)` lives at `(x * size_y + y) * size_z + z`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockGrid {
    size_x: usize,
    size_y: usize,
    size_z: usize,
    cells: Vec<BlockSpec>,
}

impl BlockGrid {
    /// Create a grid of the given size with every cell skipped
    pub fn new(size_x: usize, size_y: usize, size_z: usize) -> Self {
        Self::filled(size_x, size_y, size_z, BlockSpec::Skip)
    }

    /// Create a grid of the given size with every cell set to `spec`
    ///
    /// An empty axis zeroes every axis nested inside it, since the payload
    /// cannot carry sizes below an empty array: `(2, 0, 3)` becomes `(2, 0, 0)`.
    pub fn filled(size_x: usize, size_y: usize, size_z: usize, spec: impl Into<BlockSpec>) -> Self {
        let spec = spec.into();
        let size_y = if size_x == 0 { 0 } else { size_y };
        let size_z = if size_y == 0 { 0 } else { size_z };
        Self {
            size_x,
            size_y,
            size_z,
            cells: vec![spec; size_x * size_y * size_z],
        }
    }

    /// Build a grid from nested vectors indexed `[x][y][z]`.
    ///
    /// Fails with [`CraftError::InvalidGrid`] if any x-layer has a different
    /// y-count or any y-row a different z-count than the first.
    pub fn from_nested(layers: Vec<Vec<Vec<BlockSpec>>>) -> Result<Self> {
        let size_x = layers.len();
        let size_y = layers.first().map_or(0, Vec::len);
        let size_z = layers
            .first()
            .and_then(|layer| layer.first())
            .map_or(0, Vec::len);

        let mut cells = Vec::with_capacity(size_x * size_y * size_z);
        for (x, layer) in layers.into_iter().enumerate() {
            if layer.len() != size_y {
                return Err(CraftError::InvalidGrid(format!(
                    "x-layer {} has {} rows, expected {}",
                    x,
                    layer.len(),
                    size_y
                )));
            }
            for (y, row) in layer.into_iter().enumerate() {
                if row.len() != size_z {
                    return Err(CraftError::InvalidGrid(format!(
                        "row at x={}, y={} has {} cells, expected {}",
                        x,
                        y,
                        row.len(),
                        size_z
                    )));
                }
                cells.extend(row);
            }
        }

        Ok(Self {
            size_x,
            size_y,
            size_z,
            cells,
        })
    }

    /// Decode a wire payload back into a grid
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let layers: Vec<Vec<Vec<BlockSpec>>> = serde_json::from_value(payload.clone())
            .map_err(|e| CraftError::InvalidGrid(format!("payload is not a 3D block array: {}", e)))?;
        Self::from_nested(layers)
    }

    /// Encode the grid as nested arrays (outer = x, middle = y, inner = z)
    pub fn to_payload(&self) -> Value {
        if self.size_y == 0 || self.size_z == 0 {
            let layer = vec![Value::Array(Vec::new()); self.size_y];
            return Value::Array(vec![Value::Array(layer); self.size_x]);
        }

        let layers = self
            .cells
            .chunks(self.size_y * self.size_z)
            .map(|layer| {
                let rows = layer
                    .chunks(self.size_z)
                    .map(|row| Value::Array(row.iter().map(cell_to_value).collect()))
                    .collect();
                Value::Array(rows)
            })
            .collect();
        Value::Array(layers)
    }

    /// Grid dimensions as `(size_x, size_y, size_z)`
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.size_x, self.size_y, self.size_z)
    }

    /// Total number of cells, skipped or not
    pub fn volume(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells that place a block
    pub fn placed_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_skip()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&BlockSpec> {
        self.index(x, y, z).map(|i| &self.cells[i])
    }

    /// Set one cell. Fails if the index lies outside the grid.
    pub fn set(&mut self, x: usize, y: usize, z: usize, spec: impl Into<BlockSpec>) -> Result<()> {
        let i = self.index(x, y, z).ok_or_else(|| {
            CraftError::InvalidGrid(format!(
                "cell ({}, {}, {}) outside grid of size {}x{}x{}",
                x, y, z, self.size_x, self.size_y, self.size_z
            ))
        })?;
        self.cells[i] = spec.into();
        Ok(())
    }

    /// Iterate non-skipped cells with their grid indices
    pub fn iter_placed(&self) -> impl Iterator<Item = ((usize, usize, usize), &BlockSpec)> + '_ {
        let (sy, sz) = (self.size_y, self.size_z);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_skip())
            .map(move |(i, cell)| ((i / (sy * sz), (i / sz) % sy, i % sz), cell))
    }

    fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        if x < self.size_x && y < self.size_y && z < self.size_z {
            Some((x * self.size_y + y) * self.size_z + z)
        } else {
            None
        }
    }
}

fn cell_to_value(cell: &BlockSpec) -> Value {
    match cell {
        BlockSpec::Skip => Value::Null,
        BlockSpec::Id(id) => Value::String(id.clone()),
        BlockSpec::Descriptor(desc) => {
            let mut obj = serde_json::Map::new();
            obj.insert("block".to_string(), Value::String(desc.block.clone()));
            if let Some(state) = desc.state_value() {
                obj.insert("block_state".to_string(), state);
            }
            if let Some(nbt) = &desc.nbt {
                obj.insert("nbt".to_string(), nbt.clone());
            }
            Value::Object(obj)
        }
    }
}
