use serde::{Deserialize, Serialize};

/// Grid coordinate. Ordering is x-major, which is also the tilemap key order on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Encodes the coordinate as the `"x,y"` tilemap key.
    pub fn key(self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Parses a `"x,y"` tilemap key. No padding or whitespace is accepted.
    pub fn parse_key(key: &str) -> Option<Self> {
        let (x, y) = key.split_once(',')?;
        if !is_plain_decimal(x) || !is_plain_decimal(y) {
            return None;
        }
        Some(Self { x: x.parse().ok()?, y: y.parse().ok()? })
    }
}

fn is_plain_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Floor tag understood by the engine. Only `light_wood` exists today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorMaterial {
    #[default]
    LightWood,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileObject {
    Wall,
}

impl TileObject {
    pub fn blocks_movement(self) -> bool {
        match self {
            Self::Wall => true,
        }
    }
}

/// Special tag carried by a tile. `None` encodes as the empty string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileSpecial {
    #[default]
    #[serde(rename = "")]
    None,
    Spawn,
    Door,
}
