use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use serde::Deserialize;

use crate::error::Error;
use crate::level::{Level, TileDescriptor};
use crate::registry;
use crate::tiles::TileCache;
use crate::tileset::{TilesetId, TilesetTable};

#[derive(Deserialize)]
struct ProjectDoc {
    level: Level,
    #[serde(default)]
    tilesets: TilesetTable,
}

/// A loaded level project: the parsed level, its decoded tileset images,
/// and the tile cache. This is the host-facing handle; construct one with
/// [`LevelProject::load`] and call [`render`](LevelProject::render) once per
/// frame.
///
/// The level is immutable after load. Rendering and tile resolution take
/// `&mut self` only to populate the cache.
#[derive(Debug)]
pub struct LevelProject {
    level: Level,
    tilesets: TilesetTable,
    images: HashMap<TilesetId, RgbaImage>,
    cache: TileCache,
}

impl LevelProject {
    /// Loads a `.editorproj` (level + tilesets) or bare level JSON file.
    ///
    /// A document with a `level` field is a full project; anything else is
    /// parsed as a bare level with no tilesets. Tileset images are decoded
    /// here, once; a missing or broken image is logged and skipped rather
    /// than failing the load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                Error::NotFound(path.to_path_buf())
            } else {
                Error::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let project_dir = path
            .parent()
            .map(|d| d.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./"));

        Self::load_from_str(&txt, &project_dir, path)
    }

    /// Parses a project/level document from a string. `project_dir` anchors
    /// relative tileset paths; `origin` only labels errors.
    pub fn load_from_str(txt: &str, project_dir: &Path, origin: &Path) -> Result<Self, Error> {
        let doc: serde_json::Value = serde_json::from_str(txt).map_err(|source| Error::Json {
            path: origin.to_path_buf(),
            source,
        })?;

        let json_err = |source| Error::Json {
            path: origin.to_path_buf(),
            source,
        };

        let (level, tilesets) = if doc.get("level").is_some() {
            let project: ProjectDoc = serde_json::from_value(doc).map_err(json_err)?;
            (project.level, project.tilesets)
        } else {
            let level: Level = serde_json::from_value(doc).map_err(json_err)?;
            (level, TilesetTable::default())
        };

        validate_level(&level).map_err(|reason| Error::InvalidLevel {
            path: origin.to_path_buf(),
            reason,
        })?;

        let images = registry::resolve_tilesets(project_dir, &tilesets);

        Ok(Self {
            level,
            tilesets,
            images,
            cache: TileCache::new(),
        })
    }

    /// The parsed level.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Level display name.
    pub fn name(&self) -> &str {
        &self.level.name
    }

    /// Level width in tile units.
    pub fn width(&self) -> u32 {
        self.level.width
    }

    /// Level height in tile units.
    pub fn height(&self) -> u32 {
        self.level.height
    }

    /// On-screen tile edge in pixels.
    pub fn tile_size(&self) -> u32 {
        self.level.tile_size
    }

    /// Number of layers in the level.
    pub fn layer_count(&self) -> usize {
        self.level.layers.len()
    }

    /// Number of tilesets declared by the project (loaded or not).
    pub fn tileset_count(&self) -> usize {
        self.tilesets.len()
    }

    /// Number of tileset images that actually decoded at load time.
    pub fn loaded_tileset_count(&self) -> usize {
        self.images.len()
    }

    /// Resolves a single tile descriptor to its renderable image, through
    /// the cache. `None` means the descriptor cannot be drawn (its tileset
    /// never loaded, or its index is outside the atlas).
    pub fn tile_image(&mut self, tile: &TileDescriptor) -> Option<Rc<RgbaImage>> {
        self.cache
            .resolve(tile, self.level.tile_size, &self.tilesets, &self.images)
    }

    pub(crate) fn parts(
        &mut self,
    ) -> (
        &Level,
        &TilesetTable,
        &HashMap<TilesetId, RgbaImage>,
        &mut TileCache,
    ) {
        (&self.level, &self.tilesets, &self.images, &mut self.cache)
    }
}

fn validate_level(level: &Level) -> Result<(), String> {
    if level.width == 0 || level.height == 0 {
        return Err(format!(
            "level dimensions must be positive, got {}x{}",
            level.width, level.height
        ));
    }
    if level.tile_size == 0 {
        return Err("tile_size must be positive".to_owned());
    }
    Ok(())
}
