//! Renders one frame of a small generated project to `frame.png`.
//!
//! ```sh
//! cargo run --example render_to_png
//! ```

use std::fs;

use anyhow::Context;
use editorlevel2d_loader::LevelProject;
use image::{Rgba, RgbaImage};

const PROJECT_JSON: &str = r#"{
    "level": {
        "name": "Demo",
        "width": 12,
        "height": 8,
        "tile_size": 32,
        "layers": [
            { "name": "Background", "visible": true,
              "tiles": { "0,7": { "Color": [60, 40, 20] }, "1,7": { "Color": [60, 40, 20] },
                         "2,7": { "Color": [60, 40, 20] }, "3,7": { "Color": [60, 40, 20] } } },
            { "name": "Main", "visible": true,
              "tiles": { "1,6": { "Texture": { "tileset_id": 0, "tile_index": 5 } },
                         "2,6": { "Texture": { "tileset_id": 0, "tile_index": 6 } },
                         "5,5": { "Color": [255, 0, 0] },
                         "0,0": { "Color": [0, 255, 0] } } }
        ]
    },
    "tilesets": {
        "0": { "name": "demo", "path": "demo_tiles.png", "tiles_per_row": 4 }
    }
}"#;

fn main() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join("editorlevel2d_demo");
    fs::create_dir_all(&dir).context("creating demo dir")?;

    // a tiny atlas so the Texture tiles have something to crop
    let atlas = RgbaImage::from_fn(64, 64, |x, y| {
        Rgba([((x / 16) * 60) as u8, ((y / 16) * 60) as u8, 128, 255])
    });
    atlas
        .save(dir.join("demo_tiles.png"))
        .context("writing demo atlas")?;

    let project_path = dir.join("demo.editorproj");
    fs::write(&project_path, PROJECT_JSON).context("writing demo project")?;

    let mut project = LevelProject::load(&project_path)
        .with_context(|| format!("loading {}", project_path.display()))?;
    println!(
        "loaded '{}': {}x{} tiles, {} layers, {} tilesets",
        project.name(),
        project.width(),
        project.height(),
        project.layer_count(),
        project.tileset_count()
    );

    let mut frame = RgbaImage::from_pixel(800, 600, Rgba([40, 40, 40, 255]));
    project.render(&mut frame, 0, -300, 2.0);
    frame.save("frame.png").context("saving frame.png")?;

    println!("spawn markers: {:?}", project.tiles_of_color([0, 255, 0]));
    println!("collision cells: {}", project.collision_positions("Main").len());
    println!("wrote frame.png");
    Ok(())
}
