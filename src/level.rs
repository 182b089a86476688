use std::collections::HashMap;

use serde::Deserialize;

use crate::tileset::TilesetId;

/// One cell of a layer: a flat color or a region of a tileset atlas.
///
/// Matches the on-disk tagging (`{"Color": [r,g,b]}` /
/// `{"Texture": {"tileset_id": .., "tile_index": ..}}`). The derived
/// `Eq + Hash` make descriptor content the tile-cache key, so two
/// structurally equal descriptors at different positions share one image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub enum TileDescriptor {
    /// Flat RGB fill.
    Color([u8; 3]),
    /// A 16×16 source cell of a tileset atlas.
    Texture {
        /// Which tileset in the project's table.
        tileset_id: TilesetId,
        /// Flat index into the atlas grid (row-major, `tiles_per_row` wide).
        tile_index: u32,
    },
}

/// One independently toggleable tile grid, composited bottom-to-top in
/// document order.
#[derive(Debug, Clone, Deserialize)]
pub struct Layer {
    /// Lookup key for queries; not required to be unique (first match wins).
    pub name: String,
    /// Invisible layers are skipped entirely during rendering.
    pub visible: bool,
    /// Sparse tile grid. Absent keys mean "no tile at that cell".
    #[serde(deserialize_with = "deserialize_tiles")]
    pub tiles: HashMap<(i32, i32), TileDescriptor>,
}

impl Layer {
    /// Point lookup over the sparse grid.
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&TileDescriptor> {
        self.tiles.get(&(x, y))
    }
}

/// A parsed level. Immutable after load.
#[derive(Debug, Clone, Deserialize)]
pub struct Level {
    /// Display name from the editor.
    pub name: String,
    /// Level width in tile units.
    pub width: u32,
    /// Level height in tile units.
    pub height: u32,
    /// On-screen tile edge in pixels (source atlas cells are always 16px).
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    /// Layers in draw order, bottom first.
    pub layers: Vec<Layer>,
}

fn default_tile_size() -> u32 {
    32
}

/// Tile positions are stored as `"x,y"` string keys in the document.
/// Keys that do not parse as two integers are skipped, same as the editor's
/// own loader.
fn deserialize_tiles<'de, D>(
    deserializer: D,
) -> Result<HashMap<(i32, i32), TileDescriptor>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let string_map: HashMap<String, TileDescriptor> = HashMap::deserialize(deserializer)?;
    let mut tiles = HashMap::with_capacity(string_map.len());

    for (key, value) in string_map {
        if let Some((x, y)) = parse_position_key(&key) {
            tiles.insert((x, y), value);
        }
    }

    Ok(tiles)
}

pub(crate) fn parse_position_key(key: &str) -> Option<(i32, i32)> {
    let (x, y) = key.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_level_with_default_tile_size() {
        let json = r#"{
            "name": "Test",
            "width": 4,
            "height": 3,
            "layers": [
                { "name": "Main", "visible": true, "tiles": { "1,2": { "Color": [10, 20, 30] } } }
            ]
        }"#;

        let level: Level = serde_json::from_str(json).expect("parse");
        assert_eq!(level.name, "Test");
        assert_eq!((level.width, level.height), (4, 3));
        assert_eq!(level.tile_size, 32);
        assert_eq!(
            level.layers[0].tile_at(1, 2),
            Some(&TileDescriptor::Color([10, 20, 30]))
        );
    }

    #[test]
    fn parses_texture_descriptor() {
        let json = r#"{ "Texture": { "tileset_id": 0, "tile_index": 5 } }"#;
        let tile: TileDescriptor = serde_json::from_str(json).expect("parse");
        assert_eq!(
            tile,
            TileDescriptor::Texture {
                tileset_id: TilesetId::from(0),
                tile_index: 5,
            }
        );
    }

    #[test]
    fn skips_malformed_position_keys() {
        let json = r#"{
            "name": "L",
            "visible": true,
            "tiles": {
                "0,0": { "Color": [1, 2, 3] },
                "not-a-key": { "Color": [4, 5, 6] },
                "1,2,3": { "Color": [7, 8, 9] },
                "-3,7": { "Color": [1, 1, 1] }
            }
        }"#;

        let layer: Layer = serde_json::from_str(json).expect("parse");
        assert_eq!(layer.tiles.len(), 2);
        assert!(layer.tile_at(0, 0).is_some());
        assert!(layer.tile_at(-3, 7).is_some());
    }

    #[test]
    fn position_key_accepts_negative_coordinates() {
        assert_eq!(parse_position_key("-1,-9"), Some((-1, -9)));
        assert_eq!(parse_position_key("3, 4"), Some((3, 4)));
        assert_eq!(parse_position_key("3;4"), None);
        assert_eq!(parse_position_key(""), None);
    }
}
