//! High-level map generation: floor fill, spawn, perimeter, then room walls and doors.

use log::debug;

use crate::document::{Dimensions, MapDocument, SpawnPoint};
use crate::error::{MapError, Result};
use crate::layout::OfficeLayout;
use crate::tilemap::Tilemap;
use crate::types::TileSpecial;

pub struct MapGenerator {
    layout: OfficeLayout,
}

impl MapGenerator {
    /// Validates the layout up front so generation never indexes outside the grid.
    pub fn new(layout: OfficeLayout) -> Result<Self> {
        layout.validate()?;
        Ok(Self { layout })
    }

    pub fn layout(&self) -> &OfficeLayout {
        &self.layout
    }

    pub fn generate(&self) -> Result<MapDocument> {
        let layout = &self.layout;
        let mut tilemap = Tilemap::new(layout.width, layout.height, layout.floor);

        let spawn = layout.spawn_point();
        tilemap.place_spawn(spawn)?;
        tilemap.carve_perimeter_walls();

        let mut rooms = 0;
        for zone in layout.enclosed_zones() {
            tilemap.carve_room_walls(zone)?;
            rooms += 1;
        }
        debug!("walled {rooms} enclosed rooms out of {} zones", layout.zones.len());

        let spawn_tile = tilemap.tile(spawn)?;
        if !spawn_tile.walkable || spawn_tile.special != TileSpecial::Spawn {
            return Err(MapError::SpawnBlocked { x: spawn.x, y: spawn.y });
        }

        Ok(MapDocument {
            dimensions: Dimensions { width: layout.width, height: layout.height },
            spawnpoint: SpawnPoint { room: 0, x: spawn.x, y: spawn.y },
            zones: layout.zones.clone(),
            tilemap,
        })
    }
}
