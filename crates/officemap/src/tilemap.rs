//! Dense tile grid plus the carving passes that turn open floor into walls and doors.
//!
//! Tiles are stored row-major and addressed by [`Pos`]. The `"x,y"` string key
//! only exists in the JSON encoding, which lists tiles in x-major order.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::result;

use log::debug;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MapError, Result};
use crate::types::{FloorMaterial, Pos, TileObject, TileSpecial};
use crate::zone::Zone;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub floor: Option<FloorMaterial>,
    pub above_floor: Option<String>,
    pub object: Option<TileObject>,
    pub walkable: bool,
    pub special: TileSpecial,
}

impl Tile {
    pub fn open_floor(material: FloorMaterial) -> Self {
        Self {
            floor: Some(material),
            above_floor: None,
            object: None,
            walkable: true,
            special: TileSpecial::None,
        }
    }

    pub fn is_wall(&self) -> bool {
        self.object == Some(TileObject::Wall)
    }

    fn place_object(&mut self, object: TileObject) {
        self.object = Some(object);
        self.walkable = !object.blocks_movement();
    }

    fn cut_door(&mut self) {
        self.object = None;
        self.walkable = true;
        self.special = TileSpecial::Door;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tilemap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

/// Largest grid, in tiles, that layouts and loaded map files may declare.
pub const MAX_TILES: usize = 1 << 24;

/// Tile count of a `width` x `height` grid, or `None` past [`MAX_TILES`].
pub fn grid_tiles(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height).filter(|&tiles| tiles <= MAX_TILES)
}

impl Tilemap {
    /// Fills every coordinate of the grid with walkable floor.
    pub fn new(width: usize, height: usize, floor: FloorMaterial) -> Self {
        Self { width, height, tiles: vec![Tile::open_floor(floor); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: Pos) -> Option<&Tile> {
        self.in_bounds(pos).then(|| &self.tiles[pos.y * self.width + pos.x])
    }

    pub fn tile(&self, pos: Pos) -> Result<&Tile> {
        self.get(pos).ok_or(MapError::OutOfBounds { x: pos.x, y: pos.y })
    }

    fn tile_mut(&mut self, pos: Pos) -> Result<&mut Tile> {
        if !self.in_bounds(pos) {
            return Err(MapError::OutOfBounds { x: pos.x, y: pos.y });
        }
        Ok(&mut self.tiles[pos.y * self.width + pos.x])
    }

    /// Tiles in x-major order, matching the on-disk key order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Tile)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).map(move |y| (Pos::new(x, y), &self.tiles[y * self.width + x]))
        })
    }

    pub fn count_where(&self, predicate: impl Fn(&Tile) -> bool) -> usize {
        self.tiles.iter().filter(|tile| predicate(tile)).count()
    }

    pub fn place_spawn(&mut self, pos: Pos) -> Result<()> {
        self.tile_mut(pos)?.special = TileSpecial::Spawn;
        Ok(())
    }

    pub fn place_wall(&mut self, pos: Pos) -> Result<()> {
        self.tile_mut(pos)?.place_object(TileObject::Wall);
        Ok(())
    }

    pub fn cut_door(&mut self, pos: Pos) -> Result<()> {
        self.tile_mut(pos)?.cut_door();
        Ok(())
    }

    /// Walls off the outermost ring of the grid. Safe to apply repeatedly.
    pub fn carve_perimeter_walls(&mut self) {
        if self.is_empty() {
            return;
        }
        let (right, bottom) = (self.width - 1, self.height - 1);
        for x in 0..self.width {
            self.tiles[x].place_object(TileObject::Wall);
            self.tiles[bottom * self.width + x].place_object(TileObject::Wall);
        }
        for y in 0..self.height {
            self.tiles[y * self.width].place_object(TileObject::Wall);
            self.tiles[y * self.width + right].place_object(TileObject::Wall);
        }
        debug!("carved perimeter walls around {}x{} grid", self.width, self.height);
    }

    /// Rings an enclosed zone with walls, then cuts its door into the bottom edge.
    ///
    /// Open-plan zones are left untouched and report `false`. The whole
    /// rectangle is checked against the grid before any tile changes.
    pub fn carve_room_walls(&mut self, zone: &Zone) -> Result<bool> {
        if !zone.is_enclosed() {
            return Ok(false);
        }
        let bounds = zone.bounds;
        if !bounds.fits_within(self.width, self.height) {
            return Err(MapError::ZoneOutOfBounds {
                zone_id: zone.zone_id.clone(),
                x: bounds.x,
                y: bounds.y,
                w: bounds.w,
                h: bounds.h,
                width: self.width,
                height: self.height,
            });
        }

        for pos in bounds.edge_tiles() {
            self.place_wall(pos)?;
        }
        let door = bounds.door();
        self.cut_door(door)?;
        debug!("carved room `{}` with door at ({},{})", zone.zone_id, door.x, door.y);
        Ok(true)
    }
}

impl Serialize for Tilemap {
    fn serialize<S: Serializer>(&self, serializer: S) -> result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tiles.len()))?;
        for (pos, tile) in self.iter() {
            map.serialize_entry(&pos.key(), tile)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Tilemap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> result::Result<Self, D::Error> {
        deserializer.deserialize_map(TilemapVisitor)
    }
}

struct TilemapVisitor;

impl<'de> Visitor<'de> for TilemapVisitor {
    type Value = Tilemap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map from \"x,y\" keys to tiles")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> result::Result<Tilemap, A::Error> {
        let mut by_pos = BTreeMap::new();
        while let Some((key, tile)) = access.next_entry::<String, Tile>()? {
            let Some(pos) = Pos::parse_key(&key) else {
                return Err(de::Error::custom(format!("invalid tile key `{key}`")));
            };
            match by_pos.entry(pos) {
                Entry::Vacant(slot) => {
                    slot.insert(tile);
                }
                Entry::Occupied(_) => {
                    return Err(de::Error::custom(format!("duplicate tile key `{key}`")));
                }
            }
        }

        let Some(last) = by_pos.keys().next_back() else {
            return Ok(Tilemap { width: 0, height: 0, tiles: Vec::new() });
        };
        let max_y = by_pos.keys().map(|pos| pos.y).max().unwrap_or(0);
        let (Some(width), Some(height)) = (last.x.checked_add(1), max_y.checked_add(1)) else {
            return Err(de::Error::custom("tile coordinate is out of range"));
        };
        let Some(total) = grid_tiles(width, height) else {
            return Err(de::Error::custom(format!(
                "tilemap spans {width}x{height}, more than {MAX_TILES} tiles"
            )));
        };
        if by_pos.len() != total {
            return Err(de::Error::custom(format!(
                "tilemap has {} tiles, expected a full {width}x{height} grid",
                by_pos.len()
            )));
        }

        let mut slots: Vec<Option<Tile>> = vec![None; total];
        for (pos, tile) in by_pos {
            slots[pos.y * width + pos.x] = Some(tile);
        }
        let tiles = slots.into_iter().flatten().collect();
        Ok(Tilemap { width, height, tiles })
    }
}
