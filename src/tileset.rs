use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// Tileset identifier, normalized to a string.
///
/// Project files written by different editor versions key the tileset table
/// with strings, integers, or a bare array (positional ids), and tile
/// descriptors reference them with either type. Normalizing everything to
/// one string form keeps lookups free of type dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawTilesetId")]
pub struct TilesetId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTilesetId {
    Text(String),
    Index(u64),
}

impl From<RawTilesetId> for TilesetId {
    fn from(raw: RawTilesetId) -> Self {
        match raw {
            RawTilesetId::Text(s) => TilesetId(s),
            RawTilesetId::Index(n) => TilesetId(n.to_string()),
        }
    }
}

impl From<u64> for TilesetId {
    fn from(n: u64) -> Self {
        TilesetId(n.to_string())
    }
}

impl From<&str> for TilesetId {
    fn from(s: &str) -> Self {
        TilesetId(s.to_owned())
    }
}

impl fmt::Display for TilesetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata for one tileset atlas.
#[derive(Debug, Clone, Deserialize)]
pub struct TilesetInfo {
    /// Display name from the editor.
    pub name: String,
    /// Image path, relative to the project directory or absolute.
    pub path: String,
    /// Width of the atlas grid in 16px source cells.
    pub tiles_per_row: u32,
}

/// The project's tileset table, normalized from either document shape
/// (id → info object, or a plain array with positional ids).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawTilesetTable")]
pub struct TilesetTable {
    entries: HashMap<TilesetId, TilesetInfo>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTilesetTable {
    ById(HashMap<TilesetId, TilesetInfo>),
    Listed(Vec<TilesetInfo>),
}

impl From<RawTilesetTable> for TilesetTable {
    fn from(raw: RawTilesetTable) -> Self {
        let entries = match raw {
            RawTilesetTable::ById(map) => map,
            RawTilesetTable::Listed(list) => list
                .into_iter()
                .enumerate()
                .map(|(i, info)| (TilesetId::from(i as u64), info))
                .collect(),
        };
        TilesetTable { entries }
    }
}

impl TilesetTable {
    /// Looks up a tileset's metadata.
    pub fn get(&self, id: &TilesetId) -> Option<&TilesetInfo> {
        self.entries.get(id)
    }

    /// Iterates over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&TilesetId, &TilesetInfo)> {
        self.entries.iter()
    }

    /// Number of tilesets declared by the project.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the project declares no tilesets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
