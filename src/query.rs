use std::collections::HashMap;

use crate::level::TileDescriptor;
use crate::project::LevelProject;

/// Lookups over tile data for host-side logic (spawn markers, collisions).
///
/// Position sequences sort by `(y, x)` within each layer so results are
/// reproducible; the underlying maps have no inherent order.
impl LevelProject {
    /// All tiles of the first layer named `name`, keyed by position.
    /// Returns an empty map when no layer matches.
    pub fn tiles_in_layer(&self, name: &str) -> HashMap<(i32, i32), TileDescriptor> {
        self.level()
            .layers
            .iter()
            .find(|layer| layer.name == name)
            .map(|layer| layer.tiles.clone())
            .unwrap_or_default()
    }

    /// Positions of every `Color` tile exactly matching `color`, across all
    /// layers in layer order. Useful for entity placement markers.
    pub fn tiles_of_color(&self, color: [u8; 3]) -> Vec<(i32, i32)> {
        let mut positions = Vec::new();

        for layer in &self.level().layers {
            let mut hits: Vec<(i32, i32)> = layer
                .tiles
                .iter()
                .filter_map(|(&pos, tile)| match tile {
                    TileDescriptor::Color(c) if *c == color => Some(pos),
                    _ => None,
                })
                .collect();
            hits.sort_unstable_by_key(|&(x, y)| (y, x));
            positions.extend(hits);
        }

        positions
    }

    /// Every occupied position of the named layer, for collision checks.
    /// The editor's convention names the collision layer `"Main"`.
    pub fn collision_positions(&self, layer_name: &str) -> Vec<(i32, i32)> {
        let mut positions: Vec<(i32, i32)> = self
            .level()
            .layers
            .iter()
            .find(|layer| layer.name == layer_name)
            .map(|layer| layer.tiles.keys().copied().collect())
            .unwrap_or_default();
        positions.sort_unstable_by_key(|&(x, y)| (y, x));
        positions
    }
}
