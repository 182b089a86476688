use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::project::LevelProject;

/// A 2D surface tiles can be blitted onto. The host owns the target and
/// passes it in per frame; the crate never retains it.
///
/// [`image::RgbaImage`] implements this for software rendering; a host with
/// its own framebuffer or GPU upload path implements it once.
pub trait BlitTarget {
    /// Target dimensions in pixels, `(width, height)`.
    fn size(&self) -> (u32, u32);
    /// Draws `tile` with its top-left corner at `(x, y)` in target pixels.
    /// Coordinates may be negative or run off the edges; the target clips.
    fn blit(&mut self, tile: &RgbaImage, x: i64, y: i64);
}

impl BlitTarget for RgbaImage {
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn blit(&mut self, tile: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(self, tile, x, y);
    }
}

/// The range of tile indices visible through the viewport. Half-open on
/// both axes: columns `start_col..end_col`, rows `start_row..end_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWindow {
    /// First visible column.
    pub start_col: i64,
    /// One past the last visible column.
    pub end_col: i64,
    /// First visible row.
    pub start_row: i64,
    /// One past the last visible row.
    pub end_row: i64,
}

/// Computes the visible tile-index window for a camera offset, target size
/// and effective tile size. The `+ 1` on the end keeps partially visible
/// edge tiles in the window; results clamp to the level bounds. An
/// effective tile size of 0 (a zoom that truncates away the whole tile)
/// yields an empty window.
pub fn visible_window(
    camera_x: i64,
    camera_y: i64,
    target_w: u32,
    target_h: u32,
    eff_tile_size: u32,
    level_w: u32,
    level_h: u32,
) -> TileWindow {
    if eff_tile_size == 0 {
        return TileWindow {
            start_col: 0,
            end_col: 0,
            start_row: 0,
            end_row: 0,
        };
    }

    let tile = i64::from(eff_tile_size);
    TileWindow {
        start_col: camera_x.div_euclid(tile).max(0),
        start_row: camera_y.div_euclid(tile).max(0),
        end_col: ((camera_x + i64::from(target_w)).div_euclid(tile) + 1).min(i64::from(level_w)),
        end_row: ((camera_y + i64::from(target_h)).div_euclid(tile) + 1).min(i64::from(level_h)),
    }
}

impl LevelProject {
    /// Draws the visible portion of every visible layer onto `target`,
    /// bottom layer first.
    ///
    /// `camera_x`/`camera_y` are the pixel offset of the viewport into the
    /// level; `scale` is a runtime zoom on top of the level's `tile_size`
    /// (1.0 = no zoom). Cells whose descriptor cannot be resolved (missing
    /// tileset, out-of-range index) are skipped silently. Level state is
    /// never mutated; only the tile cache fills in.
    pub fn render(&mut self, target: &mut impl BlitTarget, camera_x: i32, camera_y: i32, scale: f32) {
        let (level, tilesets, images, cache) = self.parts();

        let eff_tile_size = (level.tile_size as f32 * scale) as u32;
        if eff_tile_size == 0 {
            return;
        }

        let (target_w, target_h) = target.size();
        let window = visible_window(
            i64::from(camera_x),
            i64::from(camera_y),
            target_w,
            target_h,
            eff_tile_size,
            level.width,
            level.height,
        );

        for layer in &level.layers {
            if !layer.visible {
                continue;
            }

            for row in window.start_row..window.end_row {
                for col in window.start_col..window.end_col {
                    let Some(tile) = layer.tiles.get(&(col as i32, row as i32)) else {
                        continue;
                    };
                    let Some(img) = cache.resolve(tile, level.tile_size, tilesets, images) else {
                        continue;
                    };

                    let x = col * i64::from(eff_tile_size) - i64::from(camera_x);
                    let y = row * i64::from(eff_tile_size) - i64::from(camera_y);

                    if scale != 1.0 {
                        let zoomed =
                            imageops::resize(&*img, eff_tile_size, eff_tile_size, FilterType::Nearest);
                        target.blit(&zoomed, x, y);
                    } else {
                        target.blit(&img, x, y);
                    }
                }
            }
        }
    }
}
