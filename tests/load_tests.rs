// tests/load_tests.rs

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use editorlevel2d_loader::{Error, LevelProject};
use image::{Rgba, RgbaImage};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("el2d_load_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn write_atlas(path: &PathBuf, cols: u32, rows: u32) {
    let atlas = RgbaImage::from_fn(cols * 16, rows * 16, |x, y| {
        Rgba([(x / 16) as u8, (y / 16) as u8, 0, 255])
    });
    atlas.save(path).expect("failed to write atlas png");
}

const PROJECT_JSON: &str = r#"{
    "level": {
        "name": "Overworld",
        "width": 20,
        "height": 10,
        "tile_size": 16,
        "layers": [
            { "name": "Background", "visible": true, "tiles": {} },
            { "name": "Main", "visible": true,
              "tiles": { "0,0": { "Texture": { "tileset_id": 0, "tile_index": 1 } } } }
        ]
    },
    "tilesets": {
        "0": { "name": "terrain", "path": "terrain.png", "tiles_per_row": 4 }
    }
}"#;

#[test]
fn loads_full_project_and_exposes_summary_fields() {
    let dir = temp_dir();
    write_atlas(&dir.join("terrain.png"), 4, 4);
    let path = dir.join("overworld.editorproj");
    fs::write(&path, PROJECT_JSON).unwrap();

    let project = LevelProject::load(&path).expect("project should load");
    assert_eq!(project.name(), "Overworld");
    assert_eq!(project.width(), 20);
    assert_eq!(project.height(), 10);
    assert_eq!(project.tile_size(), 16);
    assert_eq!(project.layer_count(), 2);
    assert_eq!(project.tileset_count(), 1);
    assert_eq!(project.loaded_tileset_count(), 1);
}

#[test]
fn loads_bare_level_document_with_default_tile_size() {
    let dir = temp_dir();
    let path = dir.join("legacy.json");
    fs::write(
        &path,
        r#"{ "name": "Legacy", "width": 5, "height": 5,
             "layers": [ { "name": "Main", "visible": true, "tiles": {} } ] }"#,
    )
    .unwrap();

    let project = LevelProject::load(&path).expect("bare level should load");
    assert_eq!(project.tile_size(), 32);
    assert_eq!(project.tileset_count(), 0);
}

#[test]
fn missing_file_is_not_found() {
    let err = LevelProject::load("definitely_not_here.editorproj").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn malformed_json_is_a_format_error() {
    let dir = temp_dir();
    let path = dir.join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = LevelProject::load(&path).unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
}

#[test]
fn missing_required_field_names_the_field() {
    let dir = temp_dir();
    let path = dir.join("nowidth.json");
    fs::write(
        &path,
        r#"{ "name": "NoWidth", "height": 5, "layers": [] }"#,
    )
    .unwrap();

    let err = LevelProject::load(&path).unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
    assert!(err.to_string().contains("width"), "got: {err}");
}

#[test]
fn zero_dimensions_are_rejected() {
    let dir = temp_dir();
    let path = dir.join("zero.json");
    fs::write(
        &path,
        r#"{ "name": "Zero", "width": 0, "height": 5, "layers": [] }"#,
    )
    .unwrap();

    let err = LevelProject::load(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidLevel { .. }));
}

#[test]
fn missing_tileset_image_does_not_abort_the_load() {
    let dir = temp_dir();
    let path = dir.join("overworld.editorproj");
    fs::write(&path, PROJECT_JSON).unwrap(); // terrain.png never written

    let project = LevelProject::load(&path).expect("load should survive the missing asset");
    assert_eq!(project.tileset_count(), 1);
    assert_eq!(project.loaded_tileset_count(), 0);
}

#[test]
fn tileset_table_as_array_uses_positional_ids() {
    let dir = temp_dir();
    write_atlas(&dir.join("b.png"), 2, 2);
    let path = dir.join("listed.editorproj");
    fs::write(
        &path,
        r#"{
            "level": { "name": "Listed", "width": 2, "height": 2, "tile_size": 16,
                       "layers": [ { "name": "Main", "visible": true,
                                     "tiles": { "0,0": { "Texture": { "tileset_id": 1, "tile_index": 0 } } } } ] },
            "tilesets": [
                { "name": "a", "path": "a.png", "tiles_per_row": 2 },
                { "name": "b", "path": "b.png", "tiles_per_row": 2 }
            ]
        }"#,
    )
    .unwrap();

    let mut project = LevelProject::load(&path).expect("load");
    assert_eq!(project.tileset_count(), 2);
    // only b.png exists on disk
    assert_eq!(project.loaded_tileset_count(), 1);

    let tile = project.tiles_in_layer("Main")[&(0, 0)].clone();
    assert!(project.tile_image(&tile).is_some());
}

#[test]
fn unknown_document_fields_are_ignored() {
    let dir = temp_dir();
    let path = dir.join("versioned.editorproj");
    fs::write(
        &path,
        r#"{
            "version": "1.0",
            "level": { "name": "V", "width": 1, "height": 1,
                       "layers": [ { "name": "Main", "visible": true, "tiles": {} } ] }
        }"#,
    )
    .unwrap();

    let project = LevelProject::load(&path).expect("extra fields should be ignored");
    assert_eq!(project.name(), "V");
}
