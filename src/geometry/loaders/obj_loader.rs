/// OBJ 文件加载器
///
/// 使用 tobj crate 加载 Wavefront OBJ 格式的场景。
/// OBJ 没有节点层次，每个对象（`o`/`g`）成为根节点下的一个子节点，
/// 对象使用的每个材质对应该子节点的一个网格。
use super::SceneLoader;
use crate::core::error::ImportError;
use crate::geometry::scene_graph::{ImportedScene, SceneMaterial, SceneMesh, SceneNode};
use std::path::Path;

/// OBJ 格式加载器
///
/// # 特性
///
/// - 单一索引：位置/UV/法线组合相同的顶点共用一个索引
/// - 多边形保持原样，由后处理三角化
/// - 点和线被忽略
/// - MTL 的 `map_Kd` 作为漫反射纹理
/// - MTL 文件缺失或无法读取时，场景没有材质
pub struct ObjLoader;

impl ObjLoader {
    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            single_index: true,
            triangulate: false,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        }
    }

    /// 把 tobj 的输出组装成场景图
    fn build_scene(
        name: &str,
        models: Vec<tobj::Model>,
        materials: Result<Vec<tobj::Material>, tobj::LoadError>,
    ) -> ImportedScene {
        let materials = match materials {
            Ok(materials) => materials,
            Err(e) => {
                tracing::warn!("Failed to load MTL library for '{}': {}", name, e);
                Vec::new()
            }
        };

        let mut scene = ImportedScene::new(name);

        // tobj 在每次 usemtl 切换时开始一个同名的新模型，连续的同名模型属于同一个对象
        for (mesh_idx, model) in models.into_iter().enumerate() {
            match scene.root.children.last_mut() {
                Some(node) if node.name == model.name => node.mesh_indices.push(mesh_idx),
                _ => scene
                    .root
                    .children
                    .push(SceneNode::with_meshes(model.name.clone(), vec![mesh_idx])),
            }
            scene.meshes.push(Self::convert_mesh(model));
        }

        scene.materials = materials
            .into_iter()
            .map(|m| SceneMaterial {
                name: m.name,
                diffuse_textures: m.diffuse_texture.into_iter().collect(),
            })
            .collect();

        scene
    }

    fn convert_mesh(model: tobj::Model) -> SceneMesh {
        let mesh = model.mesh;

        let positions = mesh
            .positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();
        let normals = mesh
            .normals
            .chunks_exact(3)
            .map(|n| [n[0], n[1], n[2]])
            .collect();

        let mut texcoords = Vec::new();
        if !mesh.texcoords.is_empty() {
            texcoords.push(mesh.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]).collect());
        }

        // face_arities 为空表示全部是三角形
        let faces = if mesh.face_arities.is_empty() {
            mesh.indices.chunks(3).map(<[u32]>::to_vec).collect()
        } else {
            let mut faces = Vec::with_capacity(mesh.face_arities.len());
            let mut start = 0;
            for &arity in &mesh.face_arities {
                let end = (start + arity as usize).min(mesh.indices.len());
                faces.push(mesh.indices[start..end].to_vec());
                start = end;
            }
            faces
        };

        SceneMesh {
            name: model.name,
            positions,
            normals,
            texcoords,
            faces,
            material_index: mesh.material_id,
        }
    }
}

impl SceneLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<ImportedScene, ImportError> {
        if !path.exists() {
            return Err(ImportError::load_failed(path, "file not found"));
        }

        let (models, materials) = tobj::load_obj(path, &Self::load_options())
            .map_err(|e| ImportError::load_failed(path, format!("tobj: {}", e)))?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unnamed");

        Ok(Self::build_scene(name, models, materials))
    }

    fn load_from_memory(data: &[u8]) -> Result<ImportedScene, ImportError> {
        let mut reader = data;
        // 内存中的 OBJ 无法解析相对路径的 MTL 库
        let (models, materials) = tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| ImportError::load_failed("<memory>", format!("tobj: {}", e)))?;

        Ok(Self::build_scene("<memory>", models, materials))
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_OBJECTS: &str = "\
o crystal
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
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
f 4/4/1 5/5/1 6/6/1 7/7/1
";

    #[test]
    fn test_supported_extensions() {
        assert_eq!(ObjLoader::supported_extensions(), &["obj"]);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ObjLoader::load_from_file(Path::new("nonexistent.obj"));
        assert!(matches!(result, Err(ImportError::AssetLoadFailed { .. })));
    }

    #[test]
    fn test_objects_become_children() {
        let scene = ObjLoader::load_from_memory(TWO_OBJECTS.as_bytes()).unwrap();

        assert_eq!(scene.root.children.len(), 2);
        assert_eq!(scene.root.children[0].name, "crystal");
        assert_eq!(scene.root.children[1].name, "bear");
        assert_eq!(scene.root.children[1].mesh_indices, vec![1]);
        assert!(!scene.has_materials());
    }

    #[test]
    fn test_material_switch_stays_in_one_child() {
        // usemtl 切换后 tobj 产生的同名模型
        let models = vec![
            tobj::Model::new(tobj::Mesh::default(), "crystal".to_string()),
            tobj::Model::new(tobj::Mesh::default(), "crystal".to_string()),
            tobj::Model::new(tobj::Mesh::default(), "bear".to_string()),
        ];

        let scene = ObjLoader::build_scene("scene", models, Ok(Vec::new()));

        let children: Vec<(&str, &[usize])> = scene
            .root
            .children
            .iter()
            .map(|c| (c.name.as_str(), c.mesh_indices.as_slice()))
            .collect();
        assert_eq!(children, vec![("crystal", &[0, 1][..]), ("bear", &[2][..])]);
        assert_eq!(scene.meshes.len(), 3);
    }

    #[test]
    fn test_polygons_are_kept_for_post_process() {
        let scene = ObjLoader::load_from_memory(TWO_OBJECTS.as_bytes()).unwrap();

        let crystal = &scene.meshes[0];
        assert_eq!(crystal.vertex_count(), 3);
        assert_eq!(crystal.faces, vec![vec![0, 1, 2]]);
        assert!(crystal.has_normals());
        assert!(crystal.has_texcoords(0));

        let bear = &scene.meshes[1];
        assert_eq!(bear.faces.len(), 1);
        assert_eq!(bear.faces[0].len(), 4);
    }
}
