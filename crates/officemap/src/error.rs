use std::io;
use std::result;

use thiserror::Error;
use toml::de::Error as TomlError;

/// Result alias used across map generation, validation, and file I/O.
pub type Result<T> = result::Result<T, MapError>;

/// Errors surfaced while building, writing, or loading a map document.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid {width}x{height} exceeds the limit of {limit} tiles")]
    GridTooLarge { width: usize, height: usize, limit: usize },
    #[error("zone `{zone_id}` has an empty rectangle ({w}x{h})")]
    EmptyZone { zone_id: String, w: usize, h: usize },
    #[error("zone `{zone_id}` bounds ({x},{y} {w}x{h}) exceed the {width}x{height} grid")]
    ZoneOutOfBounds {
        zone_id: String,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        width: usize,
        height: usize,
    },
    #[error("zone id `{0}` is used more than once")]
    DuplicateZoneId(String),
    #[error("channel id `{0}` is used more than once")]
    DuplicateChannelId(String),
    #[error("coordinate ({x},{y}) is outside the grid")]
    OutOfBounds { x: usize, y: usize },
    #[error("spawn point ({x},{y}) is covered by a wall or door")]
    SpawnBlocked { x: usize, y: usize },
    #[error("tilemap covers {tiles} tiles but dimensions declare {width}x{height}")]
    DimensionMismatch { width: usize, height: usize, tiles: usize },
    #[error("invalid layout file: {0}")]
    LayoutParse(#[from] TomlError),
    #[error("invalid map JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
