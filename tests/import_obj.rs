//! OBJ 场景端到端导入测试

use std::fs;
use std::path::{Path, PathBuf};

use dxr_demo::core::ImportError;
use dxr_demo::geometry::{ImportOptions, MissingTexturePolicy, Model};
use dxr_demo::math::Color;
use tempfile::TempDir;

const SCENE_OBJ: &str = "\
mtllib scene.mtl
o crystal
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 0.25
vn 0 0 1
usemtl leaf
f 1/1/1 2/2/1 3/3/1
o bear
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
usemtl fur
f 4/4/1 5/5/1 6/6/1 7/7/1
";

const SCENE_MTL: &str = "\
newmtl leaf
Kd 1 1 1
map_Kd leaf.png

newmtl fur
Kd 0.5 0.3 0.1
";

fn write_scene(with_mtl: bool) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let obj_path = dir.path().join("scene.obj");
    fs::write(&obj_path, SCENE_OBJ).unwrap();
    if with_mtl {
        fs::write(dir.path().join("scene.mtl"), SCENE_MTL).unwrap();
    }
    (dir, obj_path)
}

#[test]
fn test_import_textured_child() {
    let (_dir, path) = write_scene(true);

    let crystal = Model::import_mesh_from_file_of_index(&path, 0, &ImportOptions::default()).unwrap();

    assert_eq!(crystal.material.texture_path, "textures/leaf.png");
    assert_eq!(crystal.model.vertex_count(), 3);
    assert_eq!(crystal.model.indices, vec![0, 1, 2]);
    assert!(crystal.model.validate().is_ok());
}

#[test]
fn test_uv_v_is_flipped() {
    let (_dir, path) = write_scene(true);

    let crystal = Model::import_mesh_from_file_of_index(&path, 0, &ImportOptions::default()).unwrap();

    let texcoords: Vec<[f32; 2]> = crystal.model.vertices.iter().map(|v| v.texcoord).collect();
    assert_eq!(texcoords, vec![[0.0, 1.0], [1.0, 1.0], [0.0, 0.75]]);
}

#[test]
fn test_quad_is_triangulated() {
    let (_dir, path) = write_scene(true);
    let options = ImportOptions::default().with_missing_texture(MissingTexturePolicy::Fallback);

    let bear = Model::import_mesh_from_file_of_index(&path, 1, &options).unwrap();

    assert_eq!(bear.model.vertex_count(), 4);
    assert_eq!(bear.model.triangle_count(), 2);
    assert_eq!(bear.model.index_count() % 3, 0);
    assert!(bear.model.indices.iter().all(|&i| (i as usize) < bear.model.vertex_count()));
}

#[test]
fn test_material_without_diffuse_texture() {
    let (_dir, path) = write_scene(true);

    let result = Model::import_mesh_from_file_of_index(&path, 1, &ImportOptions::default());
    assert!(matches!(
        result,
        Err(ImportError::MissingTexture { material: Some(1), .. })
    ));

    let options = ImportOptions::default().with_missing_texture(MissingTexturePolicy::Fallback);
    let bear = Model::import_mesh_from_file_of_index(&path, 1, &options).unwrap();
    assert_eq!(bear.material.texture_path, "textures/statue.jpg");
}

#[test]
fn test_scene_without_materials_uses_fallback_texture() {
    let (_dir, path) = write_scene(false);

    for index in 0..2 {
        let imported = Model::import_mesh_from_file_of_index(&path, index, &ImportOptions::default()).unwrap();
        assert_eq!(imported.material.texture_path, "textures/statue.jpg");
    }
}

#[test]
fn test_tint_is_carried_into_material() {
    let (_dir, path) = write_scene(true);
    let options = ImportOptions::default().with_tint(Color::CYAN);

    let crystal = Model::import_mesh_from_file_of_index(&path, 0, &options).unwrap();

    assert_eq!(crystal.material.tint, Color::CYAN);
}

#[test]
fn test_obj_transform_is_identity() {
    let (_dir, path) = write_scene(true);

    let crystal = Model::import_mesh_from_file_of_index(&path, 0, &ImportOptions::default()).unwrap();

    assert_eq!(crystal.model.transform, Model::default().transform);
}

#[test]
fn test_child_index_out_of_range() {
    let (_dir, path) = write_scene(true);

    let result = Model::import_mesh_from_file_of_index(&path, 2, &ImportOptions::default());

    assert!(matches!(
        result,
        Err(ImportError::ChildIndexOutOfRange { index: 2, count: 2 })
    ));
}

#[test]
fn test_missing_file() {
    let result = Model::import_mesh_from_file_of_index(
        Path::new("does/not/exist.obj"),
        0,
        &ImportOptions::default(),
    );

    assert!(matches!(result, Err(ImportError::AssetLoadFailed { .. })));
}

const TWO_MATERIAL_OBJ: &str = "\
mtllib scene.mtl
o crystal
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
v 2 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
usemtl leaf
f 1/1/1 2/2/1 3/3/1
usemtl gem
f 2/1/1 4/2/1 5/3/1
o bear
v 5 0 1
v 6 0 1
v 5 1 1
usemtl leaf
f 6/1/1 7/2/1 8/3/1
";

const TWO_MATERIAL_MTL: &str = "\
newmtl leaf
map_Kd leaf.png

newmtl gem
map_Kd gem.png
";

fn write_two_material_scene() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let obj_path = dir.path().join("scene.obj");
    fs::write(&obj_path, TWO_MATERIAL_OBJ).unwrap();
    fs::write(dir.path().join("scene.mtl"), TWO_MATERIAL_MTL).unwrap();
    (dir, obj_path)
}

#[test]
fn test_object_with_two_materials_is_one_child() {
    let (_dir, path) = write_two_material_scene();

    let bear = Model::import_mesh_from_file_of_index(&path, 1, &ImportOptions::default()).unwrap();
    assert_eq!(bear.model.vertices[0].position, [5.0, 0.0, 1.0]);
    assert_eq!(bear.material.texture_path, "textures/leaf.png");

    let result = Model::import_mesh_from_file_of_index(&path, 2, &ImportOptions::default());
    assert!(matches!(
        result,
        Err(ImportError::ChildIndexOutOfRange { index: 2, count: 2 })
    ));
}

#[test]
fn test_multi_material_child_imports_first_mesh_only() {
    let (_dir, path) = write_two_material_scene();

    let crystal = Model::import_mesh_from_file_of_index(&path, 0, &ImportOptions::default()).unwrap();

    assert_eq!(crystal.material.texture_path, "textures/leaf.png");
    assert_eq!(crystal.model.vertex_count(), 3);
    assert_eq!(crystal.model.triangle_count(), 1);
    let positions: Vec<[f32; 3]> = crystal.model.vertices.iter().map(|v| v.position).collect();
    assert_eq!(positions, vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
}
