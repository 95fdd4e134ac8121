//! Office layout configuration: grid size, spawn point, and the zone table.
//!
//! The built-in layout is the 48x48 demo office. Alternative layouts load from
//! TOML and go through the same validation before any tile is carved.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::tilemap::{MAX_TILES, grid_tiles};
use crate::types::{FloorMaterial, Pos};
use crate::zone::{Bounds, Zone, ZoneType};

pub const DEFAULT_WIDTH: usize = 48;
pub const DEFAULT_HEIGHT: usize = 48;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeLayout {
    pub width: usize,
    pub height: usize,
    /// Floor tag written on every tile. `light_wood` is the only material the
    /// engine's tileset ships, so any other value fails to parse.
    #[serde(default)]
    pub floor: FloorMaterial,
    /// Defaults to `(width / 2, height - 5)` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn: Option<Pos>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl Default for OfficeLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            floor: FloorMaterial::LightWood,
            spawn: None,
            zones: build_zones(DEFAULT_WIDTH, DEFAULT_HEIGHT),
        }
    }
}

impl OfficeLayout {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn spawn_point(&self) -> Pos {
        self.spawn.unwrap_or_else(|| default_spawn(self.width, self.height))
    }

    /// Checks grid extents (non-empty, at most [`MAX_TILES`] tiles), zone rectangles,
    /// id uniqueness, and the spawn coordinate.
    ///
    /// Overlapping zones are accepted; carving order then decides which wall or
    /// door wins, so they are reported at `warn` level.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::EmptyGrid { width: self.width, height: self.height });
        }
        if grid_tiles(self.width, self.height).is_none() {
            return Err(MapError::GridTooLarge {
                width: self.width,
                height: self.height,
                limit: MAX_TILES,
            });
        }

        let mut zone_ids = HashSet::new();
        let mut channel_ids = HashSet::new();
        for zone in &self.zones {
            let Bounds { x, y, w, h } = zone.bounds;
            if zone.bounds.is_empty() {
                return Err(MapError::EmptyZone { zone_id: zone.zone_id.clone(), w, h });
            }
            if !zone.bounds.fits_within(self.width, self.height) {
                return Err(MapError::ZoneOutOfBounds {
                    zone_id: zone.zone_id.clone(),
                    x,
                    y,
                    w,
                    h,
                    width: self.width,
                    height: self.height,
                });
            }
            if !zone_ids.insert(zone.zone_id.as_str()) {
                return Err(MapError::DuplicateZoneId(zone.zone_id.clone()));
            }
            if !channel_ids.insert(zone.channel_id.as_str()) {
                return Err(MapError::DuplicateChannelId(zone.channel_id.clone()));
            }
        }

        let spawn = self.spawn_point();
        if spawn.x >= self.width || spawn.y >= self.height {
            return Err(MapError::OutOfBounds { x: spawn.x, y: spawn.y });
        }

        for (a, b) in self.overlapping_zones() {
            warn!("zones `{}` and `{}` overlap", a.zone_id, b.zone_id);
        }

        Ok(())
    }

    pub fn overlapping_zones(&self) -> Vec<(&Zone, &Zone)> {
        let mut pairs = Vec::new();
        for (index, zone) in self.zones.iter().enumerate() {
            for other in &self.zones[index + 1..] {
                if zone.bounds.intersects(&other.bounds) {
                    pairs.push((zone, other));
                }
            }
        }
        pairs
    }

    pub fn enclosed_zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(|zone| zone.is_enclosed())
    }
}

pub fn default_spawn(width: usize, height: usize) -> Pos {
    Pos::new(width / 2, height.saturating_sub(5))
}

/// The demo office: reception along the bottom, meeting rooms down the left,
/// four desk clusters in the middle, lounge/kitchen/focus booths on the right.
pub fn build_zones(width: usize, height: usize) -> Vec<Zone> {
    vec![
        Zone::new(
            "reception",
            ZoneType::Reception,
            "Reception & Lobby",
            Bounds::new((width / 2).saturating_sub(6), height.saturating_sub(8), 12, 6),
        ),
        Zone::new("meeting_1", ZoneType::Meeting, "Meeting Room 1", Bounds::new(2, 10, 10, 10)),
        Zone::new("meeting_2", ZoneType::Meeting, "Meeting Room 2", Bounds::new(2, 22, 10, 10)),
        Zone::new("meeting_3", ZoneType::Meeting, "Meeting Room 3", Bounds::new(2, 34, 10, 10)),
        Zone::new("desk_1", ZoneType::Desk, "Desk Area 1", Bounds::new(14, 8, 10, 10)),
        Zone::new("desk_2", ZoneType::Desk, "Desk Area 2", Bounds::new(26, 8, 10, 10)),
        Zone::new("desk_3", ZoneType::Desk, "Desk Area 3", Bounds::new(14, 20, 10, 10)),
        Zone::new("desk_4", ZoneType::Desk, "Desk Area 4", Bounds::new(26, 20, 10, 10)),
        Zone::new("lounge", ZoneType::Lounge, "Lounge Area", Bounds::new(38, 8, 8, 10)),
        Zone::new("kitchen", ZoneType::Kitchen, "Kitchen & Break Room", Bounds::new(38, 20, 8, 10)),
        Zone::new("focus_1", ZoneType::Focus, "Focus Booth 1", Bounds::new(38, 32, 4, 6)).private(),
        Zone::new("focus_2", ZoneType::Focus, "Focus Booth 2", Bounds::new(42, 32, 4, 6)).private(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_office_has_expected_zone_mix() {
        let zones = build_zones(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!(zones.len(), 12);
        let count =
            |zone_type: ZoneType| zones.iter().filter(|zone| zone.zone_type == zone_type).count();
        assert_eq!(count(ZoneType::Reception), 1);
        assert_eq!(count(ZoneType::Meeting), 3);
        assert_eq!(count(ZoneType::Desk), 4);
        assert_eq!(count(ZoneType::Lounge), 1);
        assert_eq!(count(ZoneType::Kitchen), 1);
        assert_eq!(count(ZoneType::Focus), 2);
        assert_eq!(zones[0].bounds, Bounds::new(18, 40, 12, 6));
    }

    #[test]
    fn only_focus_booths_are_private() {
        let private: Vec<_> = build_zones(DEFAULT_WIDTH, DEFAULT_HEIGHT)
            .into_iter()
            .filter(|zone| zone.is_private)
            .map(|zone| zone.zone_id)
            .collect();
        assert_eq!(private, vec!["focus_1", "focus_2"]);
    }

    #[test]
    fn default_layout_validates_without_overlaps() {
        let layout = OfficeLayout::default();
        layout.validate().expect("built-in layout should be valid");
        assert!(layout.overlapping_zones().is_empty());
        assert_eq!(layout.spawn_point(), Pos::new(24, 43));
        assert_eq!(layout.enclosed_zones().count(), 5);
    }

    #[test]
    fn validate_rejects_zone_past_grid_edge() {
        let mut layout = OfficeLayout::default();
        layout.zones[1].bounds = Bounds::new(40, 10, 10, 10);
        let err = layout.validate().unwrap_err();
        assert!(
            matches!(err, MapError::ZoneOutOfBounds { ref zone_id, .. } if zone_id == "meeting_1")
        );
    }

    #[test]
    fn validate_rejects_empty_zone_and_empty_grid() {
        let mut layout = OfficeLayout::default();
        layout.zones[4].bounds.w = 0;
        assert!(matches!(layout.validate(), Err(MapError::EmptyZone { .. })));

        let layout = OfficeLayout { width: 0, ..OfficeLayout::default() };
        assert!(matches!(layout.validate(), Err(MapError::EmptyGrid { .. })));
    }

    #[test]
    fn validate_rejects_grids_past_the_tile_limit() {
        let layout =
            OfficeLayout::from_toml_str("width = 4294967296\nheight = 4294967296\n").unwrap();
        assert!(matches!(
            layout.validate(),
            Err(MapError::GridTooLarge { width: 4_294_967_296, height: 4_294_967_296, .. })
        ));

        let layout = OfficeLayout { width: 100_000, height: 100_000, ..OfficeLayout::default() };
        assert!(matches!(layout.validate(), Err(MapError::GridTooLarge { .. })));

        let layout = OfficeLayout {
            width: MAX_TILES / 64,
            height: 64,
            spawn: Some(Pos::new(1, 1)),
            zones: Vec::new(),
            ..OfficeLayout::default()
        };
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut layout = OfficeLayout::default();
        layout.zones[2].zone_id = "meeting_1".to_string();
        assert!(
            matches!(layout.validate(), Err(MapError::DuplicateZoneId(id)) if id == "meeting_1")
        );

        let mut layout = OfficeLayout::default();
        layout.zones[2].channel_id = "zone_kitchen".to_string();
        assert!(
            matches!(layout.validate(), Err(MapError::DuplicateChannelId(id)) if id == "zone_kitchen")
        );
    }

    #[test]
    fn validate_rejects_spawn_outside_grid() {
        let layout = OfficeLayout { spawn: Some(Pos::new(48, 10)), ..OfficeLayout::default() };
        assert!(matches!(layout.validate(), Err(MapError::OutOfBounds { x: 48, y: 10 })));
    }

    #[test]
    fn overlapping_zones_are_reported_but_allowed() {
        let mut layout = OfficeLayout::default();
        layout.zones[4].bounds = Bounds::new(20, 8, 10, 10);
        assert!(layout.validate().is_ok());
        let pairs: Vec<_> = layout
            .overlapping_zones()
            .into_iter()
            .map(|(a, b)| (a.zone_id.as_str(), b.zone_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("desk_1", "desk_2")]);
    }

    #[test]
    fn toml_layout_uses_defaults_for_floor_and_spawn() {
        let layout = OfficeLayout::from_toml_str(
            r#"
width = 20
height = 12

[[zones]]
zone_id = "huddle"
zone_type = "meeting"
name = "Huddle"
channel_id = "zone_huddle"
is_private = false
bounds = { x = 2, y = 2, w = 5, h = 4 }
"#,
        )
        .unwrap();
        assert_eq!(layout.floor, FloorMaterial::LightWood);
        assert_eq!(layout.spawn_point(), Pos::new(10, 7));
        assert_eq!(layout.zones.len(), 1);
        assert_eq!(layout.zones[0].zone_type, ZoneType::Meeting);
        layout.validate().unwrap();
    }

    #[test]
    fn toml_layout_rejects_unknown_zone_type() {
        let err = OfficeLayout::from_toml_str(
            r#"
width = 20
height = 12

[[zones]]
zone_id = "gym"
zone_type = "gym"
name = "Gym"
channel_id = "zone_gym"
is_private = false
bounds = { x = 2, y = 2, w = 5, h = 4 }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, MapError::LayoutParse(_)));
    }

    #[test]
    fn toml_layout_rejects_unknown_floor_material() {
        let err = OfficeLayout::from_toml_str("width = 20\nheight = 12\nfloor = \"marble\"\n")
            .unwrap_err();
        assert!(matches!(err, MapError::LayoutParse(_)));

        let layout =
            OfficeLayout::from_toml_str("width = 20\nheight = 12\nfloor = \"light_wood\"\n")
                .unwrap();
        assert_eq!(layout.floor, FloorMaterial::LightWood);
    }

    #[test]
    fn shipped_demo_layout_matches_built_in_layout() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("layouts/office_demo.toml");
        let loaded = OfficeLayout::load(&path).unwrap();
        let built_in = OfficeLayout::default();
        assert_eq!(loaded.width, built_in.width);
        assert_eq!(loaded.height, built_in.height);
        assert_eq!(loaded.spawn_point(), built_in.spawn_point());
        assert_eq!(loaded.zones, built_in.zones);
    }
}
