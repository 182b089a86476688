use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{info, warn};

use crate::tileset::{TilesetId, TilesetTable};

/// Decodes every tileset image declared by the table.
///
/// Each path is tried relative to the project directory first, then as
/// given (absolute, or relative to the current working directory). A
/// missing or undecodable image only drops that tileset from the registry;
/// texture descriptors pointing at it resolve to nothing at draw time.
pub(crate) fn resolve_tilesets(
    project_dir: &Path,
    table: &TilesetTable,
) -> HashMap<TilesetId, RgbaImage> {
    let mut images = HashMap::with_capacity(table.len());

    for (id, ts) in table.iter() {
        let mut full_path = project_dir.join(&ts.path);
        if !full_path.exists() {
            full_path = PathBuf::from(&ts.path);
        }

        if !full_path.exists() {
            warn!("tileset '{}' not found: {}", ts.name, ts.path);
            continue;
        }

        match image::open(&full_path) {
            Ok(img) => {
                info!("tileset '{}' loaded from {}", ts.name, full_path.display());
                images.insert(id.clone(), img.to_rgba8());
            }
            Err(err) => {
                warn!("failed to decode tileset {}: {}", full_path.display(), err);
            }
        }
    }

    images
}
