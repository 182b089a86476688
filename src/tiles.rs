use std::collections::HashMap;
use std::rc::Rc;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::level::TileDescriptor;
use crate::tileset::{TilesetId, TilesetTable};

/// Edge of one atlas cell in the source image, in pixels. The editor always
/// exports atlases on a 16px grid regardless of the level's `tile_size`.
pub const SOURCE_TILE_SIZE: u32 = 16;

/// Memoized descriptor → renderable image mapping.
///
/// Keyed by descriptor content, so every `Color([255,0,0])` cell in the
/// level shares one filled image and every identical atlas reference shares
/// one crop. Entries live as long as the owning [`crate::LevelProject`];
/// the level is immutable after load, so nothing ever invalidates them.
/// Failed resolutions (missing tileset, out-of-range index) are not cached.
#[derive(Debug, Default)]
pub(crate) struct TileCache {
    entries: HashMap<TileDescriptor, Rc<RgbaImage>>,
}

impl TileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces the renderable image for a descriptor, or `None` when the
    /// descriptor cannot be drawn (missing tileset, index outside the
    /// atlas). Safe to call every frame; hits return the cached `Rc`.
    pub fn resolve(
        &mut self,
        tile: &TileDescriptor,
        tile_size: u32,
        tilesets: &TilesetTable,
        images: &HashMap<TilesetId, RgbaImage>,
    ) -> Option<Rc<RgbaImage>> {
        if let Some(cached) = self.entries.get(tile) {
            return Some(Rc::clone(cached));
        }

        let img = match tile {
            TileDescriptor::Color([r, g, b]) => {
                RgbaImage::from_pixel(tile_size, tile_size, Rgba([*r, *g, *b, 255]))
            }
            TileDescriptor::Texture {
                tileset_id,
                tile_index,
            } => {
                let atlas = images.get(tileset_id)?;
                let info = tilesets.get(tileset_id)?;
                crop_source_cell(atlas, *tile_index, info.tiles_per_row, tile_size)?
            }
        };

        let img = Rc::new(img);
        self.entries.insert(tile.clone(), Rc::clone(&img));
        Some(img)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Crops the 16×16 cell at `(index % tiles_per_row, index / tiles_per_row)`
/// out of the atlas and rescales it to `tile_size` when they differ.
/// Returns `None` when the cell falls outside the atlas image.
fn crop_source_cell(
    atlas: &RgbaImage,
    tile_index: u32,
    tiles_per_row: u32,
    tile_size: u32,
) -> Option<RgbaImage> {
    if tiles_per_row == 0 {
        return None;
    }

    // cell math in u64: an absurd document index must fall out of bounds,
    // not wrap around u32 and pass the check below
    let cell_px = u64::from(SOURCE_TILE_SIZE);
    let src_x = u64::from(tile_index % tiles_per_row) * cell_px;
    let src_y = u64::from(tile_index / tiles_per_row) * cell_px;
    if src_x + cell_px > u64::from(atlas.width()) || src_y + cell_px > u64::from(atlas.height()) {
        return None;
    }

    let cell = imageops::crop_imm(
        atlas,
        src_x as u32,
        src_y as u32,
        SOURCE_TILE_SIZE,
        SOURCE_TILE_SIZE,
    )
    .to_image();

    if tile_size != SOURCE_TILE_SIZE {
        Some(imageops::resize(&cell, tile_size, tile_size, FilterType::Nearest))
    } else {
        Some(cell)
    }
}
