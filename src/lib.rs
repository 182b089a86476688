#![warn(missing_docs)]

//! Minimal loader/renderer for EditorLevel2D project files.
//!
//! Loads a `.editorproj` (level + tileset metadata) or bare level JSON,
//! resolves tileset atlases once at load time, and blits the visible tile
//! window into any [`BlitTarget`] the host supplies. Tile images are
//! memoized by descriptor content, so repeated frames never re-decode.
//!
//! ```no_run
//! use editorlevel2d_loader::LevelProject;
//!
//! let mut project = LevelProject::load("my_level.editorproj")?;
//! let mut frame = image::RgbaImage::new(800, 600);
//! project.render(&mut frame, 0, 0, 1.0);
//! let spawns = project.tiles_of_color([0, 255, 0]);
//! # Ok::<(), editorlevel2d_loader::Error>(())
//! ```

mod error;
mod level;
mod project;
mod query;
mod registry;
mod render;
mod tiles;
mod tileset;

pub use error::Error;
pub use level::{Layer, Level, TileDescriptor};
pub use project::LevelProject;
pub use render::{visible_window, BlitTarget, TileWindow};
pub use tiles::SOURCE_TILE_SIZE;
pub use tileset::{TilesetId, TilesetInfo, TilesetTable};
