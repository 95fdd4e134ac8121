//! The emitted map document, its file I/O, and the human-readable run summary.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::{MapError, Result};
use crate::tilemap::Tilemap;
use crate::types::TileSpecial;
use crate::zone::Zone;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub room: u32,
    pub x: usize,
    pub y: usize,
}

/// Everything the engine reads from the generated file. Field order is the on-disk order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    pub dimensions: Dimensions,
    pub spawnpoint: SpawnPoint,
    pub zones: Vec<Zone>,
    pub tilemap: Tilemap,
}

impl MapDocument {
    /// Pretty JSON with two-space indentation and no trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(text)?;
        let Dimensions { width, height } = document.dimensions;
        if document.tilemap.width() != width || document.tilemap.height() != height {
            return Err(MapError::DimensionMismatch {
                width,
                height,
                tiles: document.tilemap.len(),
            });
        }
        Ok(document)
    }

    /// Writes the document to `path`. The parent directory must already exist.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// xxh3 of the serialized bytes; equal fingerprints mean byte-identical files.
    pub fn fingerprint(&self) -> Result<u64> {
        Ok(xxh3_64(self.to_json_pretty()?.as_bytes()))
    }

    pub fn summary(&self) -> Result<MapSummary<'_>> {
        Ok(MapSummary { document: self, fingerprint: self.fingerprint()? })
    }
}

/// Console report printed after a run. Cosmetic only.
pub struct MapSummary<'a> {
    document: &'a MapDocument,
    fingerprint: u64,
}

impl fmt::Display for MapSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let document = self.document;
        let tilemap = &document.tilemap;
        let walls = tilemap.count_where(|tile| tile.is_wall());
        let doors = tilemap.count_where(|tile| tile.special == TileSpecial::Door);

        writeln!(f, "   Dimensions: {}x{}", document.dimensions.width, document.dimensions.height)?;
        writeln!(f, "   Zones: {}", document.zones.len())?;
        writeln!(f, "   Tiles: {}", tilemap.len())?;
        writeln!(f, "   Walls: {walls}, doors: {doors}")?;
        writeln!(f, "   Spawn: ({}, {})", document.spawnpoint.x, document.spawnpoint.y)?;
        writeln!(f, "   Fingerprint: {:016x}", self.fingerprint)?;
        writeln!(f)?;
        write!(f, "Zone Summary:")?;
        for zone in &document.zones {
            write!(
                f,
                "\n   - {:20} [{:10}] at ({},{})",
                zone.name,
                zone.zone_type.as_str(),
                zone.bounds.x,
                zone.bounds.y
            )?;
        }
        Ok(())
    }
}
