//! Static office map generation: a zone table and a walled tile grid, emitted as JSON.

pub mod document;
pub mod error;
pub mod layout;
pub mod tilemap;
pub mod types;
pub mod zone;

mod generator;

pub use document::{Dimensions, MapDocument, MapSummary, SpawnPoint};
pub use error::{MapError, Result};
pub use generator::MapGenerator;
pub use layout::{OfficeLayout, build_zones};
pub use tilemap::{MAX_TILES, Tile, Tilemap};
pub use types::{FloorMaterial, Pos, TileObject, TileSpecial};
pub use zone::{Bounds, Zone, ZoneType};

/// Generates the built-in demo office.
pub fn generate_map() -> Result<MapDocument> {
    MapGenerator::new(OfficeLayout::default())?.generate()
}
