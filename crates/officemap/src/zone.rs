//! Named rectangular regions of the office and the rectangle math behind them.

use serde::{Deserialize, Serialize};

use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    Reception,
    Meeting,
    Desk,
    Lounge,
    Kitchen,
    Focus,
}

impl ZoneType {
    /// Enclosed rooms get a wall ring and a door; everything else stays open-plan.
    pub fn is_enclosed(self) -> bool {
        matches!(self, Self::Meeting | Self::Focus)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reception => "reception",
            Self::Meeting => "meeting",
            Self::Desk => "desk",
            Self::Lounge => "lounge",
            Self::Kitchen => "kitchen",
            Self::Focus => "focus",
        }
    }
}

/// Axis-aligned rectangle in grid units. `w`/`h` count tiles, so the last
/// column is `x + w - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Bounds {
    pub const fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn right(self) -> usize {
        self.x + self.w - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.h - 1
    }

    pub fn fits_within(self, width: usize, height: usize) -> bool {
        !self.is_empty()
            && self.x.checked_add(self.w).is_some_and(|end| end <= width)
            && self.y.checked_add(self.h).is_some_and(|end| end <= height)
    }

    pub fn contains(self, pos: Pos) -> bool {
        !self.is_empty()
            && pos.x >= self.x
            && pos.x <= self.right()
            && pos.y >= self.y
            && pos.y <= self.bottom()
    }

    pub fn intersects(self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn on_edge(self, pos: Pos) -> bool {
        if !self.contains(pos) {
            return false;
        }
        pos.x == self.x || pos.x == self.right() || pos.y == self.y || pos.y == self.bottom()
    }

    /// Tiles of the one-tile-thick ring along the rectangle's edges, each listed once.
    pub fn edge_tiles(self) -> Vec<Pos> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut tiles = Vec::with_capacity(2 * (self.w + self.h));
        for x in self.x..=self.right() {
            tiles.push(Pos::new(x, self.y));
            if self.h > 1 {
                tiles.push(Pos::new(x, self.bottom()));
            }
        }
        for y in (self.y + 1)..self.bottom() {
            tiles.push(Pos::new(self.x, y));
            if self.w > 1 {
                tiles.push(Pos::new(self.right(), y));
            }
        }
        tiles
    }

    /// Door cut into the bottom edge, at `x + w / 2`.
    pub fn door(self) -> Pos {
        Pos::new(self.x + self.w / 2, self.bottom())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub zone_id: String,
    pub zone_type: ZoneType,
    pub name: String,
    pub bounds: Bounds,
    pub channel_id: String,
    pub is_private: bool,
}

impl Zone {
    /// Builds a zone whose channel is `zone_<zone_id>`.
    pub fn new(zone_id: &str, zone_type: ZoneType, name: &str, bounds: Bounds) -> Self {
        Self {
            zone_id: zone_id.to_string(),
            zone_type,
            name: name.to_string(),
            bounds,
            channel_id: format!("zone_{zone_id}"),
            is_private: false,
        }
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    pub fn is_enclosed(&self) -> bool {
        self.zone_type.is_enclosed()
    }
}
