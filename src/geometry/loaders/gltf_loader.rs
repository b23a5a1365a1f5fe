/// glTF 文件加载器
///
/// 使用 gltf crate 加载 glTF 2.0 场景（`.gltf` / `.glb`）。
///
/// # 转换规则
///
/// - 默认场景只有一个根节点时，它就是场景根节点，子节点索引指向它的子节点
/// - 有多个根节点时，它们成为合成根节点的子节点
/// - 节点层次完整保留
/// - glTF 网格的每个图元成为一个场景网格，因此一个节点可以引用多个网格
/// - 节点矩阵从 glTF 的列主序转换为行主序
/// - UV 转换为左下角原点
/// - 基础色纹理的图像 URI（内嵌图像取图像名）作为漫反射纹理
/// - 三角带和三角扇展开为三角形列表
use super::SceneLoader;
use crate::core::error::ImportError;
use crate::geometry::scene_graph::{ImportedScene, SceneMaterial, SceneMesh, SceneNode};
use crate::math::matrix;
use gltf::mesh::Mode;
use std::ops::Range;
use std::path::Path;

/// glTF 格式加载器
pub struct GltfLoader;

impl GltfLoader {
    fn build_scene(
        name: &str,
        document: &gltf::Document,
        buffers: &[gltf::buffer::Data],
    ) -> Result<ImportedScene, ImportError> {
        let mut scene = ImportedScene::new(name);

        // glTF 网格索引 -> 场景网格范围
        let mut mesh_ranges: Vec<Range<usize>> = Vec::with_capacity(document.meshes().len());
        for mesh in document.meshes() {
            let mesh_name = mesh.name().unwrap_or("<Unnamed>");
            let start = scene.meshes.len();
            for primitive in mesh.primitives() {
                scene
                    .meshes
                    .push(Self::convert_primitive(mesh_name, &primitive, buffers)?);
            }
            mesh_ranges.push(start..scene.meshes.len());
        }

        scene.materials = document.materials().map(|m| Self::convert_material(&m)).collect();

        match document.default_scene().or_else(|| document.scenes().next()) {
            Some(gltf_scene) => {
                let mut roots: Vec<SceneNode> = gltf_scene
                    .nodes()
                    .map(|node| Self::convert_node(&node, &mesh_ranges))
                    .collect();
                // 唯一的根节点直接作为场景根节点
                if roots.len() == 1 {
                    scene.root = roots.remove(0);
                } else {
                    scene.root.children = roots;
                }
            }
            None => tracing::warn!("glTF asset '{}' contains no scene", name),
        }

        Ok(scene)
    }

    fn convert_node(node: &gltf::Node, mesh_ranges: &[Range<usize>]) -> SceneNode {
        let transform = matrix::to_row_major(&matrix::from_column_major(&node.transform().matrix()));

        let mesh_indices = node
            .mesh()
            .and_then(|mesh| mesh_ranges.get(mesh.index()))
            .map(|range| range.clone().collect())
            .unwrap_or_default();

        SceneNode {
            name: node.name().unwrap_or("<Unnamed>").to_owned(),
            transform,
            mesh_indices,
            children: node
                .children()
                .map(|child| Self::convert_node(&child, mesh_ranges))
                .collect(),
        }
    }

    fn convert_primitive(
        mesh_name: &str,
        primitive: &gltf::Primitive,
        buffers: &[gltf::buffer::Data],
    ) -> Result<SceneMesh, ImportError> {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| {
                ImportError::MalformedAsset(format!(
                    "primitive {} of mesh '{}' has no positions",
                    primitive.index(),
                    mesh_name
                ))
            })?
            .collect();

        let normals: Vec<[f32; 3]> = reader
            .read_normals()
            .map(|normals| normals.collect())
            .unwrap_or_default();

        // glTF 的 UV 原点在左上角
        let mut texcoords: Vec<Vec<[f32; 2]>> = Vec::new();
        while let Some(channel) = reader.read_tex_coords(texcoords.len() as u32) {
            texcoords.push(channel.into_f32().map(|[u, v]| [u, 1.0 - v]).collect());
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        Ok(SceneMesh {
            name: format!("{}#{}", mesh_name, primitive.index()),
            positions,
            normals,
            texcoords,
            faces: Self::assemble_faces(primitive.mode(), &indices),
            material_index: primitive.material().index(),
        })
    }

    /// 按图元模式把索引组装成面
    ///
    /// 点和线产生少于3个索引的面。
    fn assemble_faces(mode: Mode, indices: &[u32]) -> Vec<Vec<u32>> {
        match mode {
            Mode::Triangles => indices.chunks(3).map(<[u32]>::to_vec).collect(),
            Mode::TriangleStrip => indices
                .windows(3)
                .enumerate()
                .map(|(i, w)| {
                    if i % 2 == 0 {
                        vec![w[0], w[1], w[2]]
                    } else {
                        vec![w[1], w[0], w[2]]
                    }
                })
                .collect(),
            Mode::TriangleFan => match indices.split_first() {
                Some((&first, rest)) => rest.windows(2).map(|w| vec![first, w[0], w[1]]).collect(),
                None => Vec::new(),
            },
            Mode::Points => indices.iter().map(|&i| vec![i]).collect(),
            Mode::Lines => indices.chunks(2).map(<[u32]>::to_vec).collect(),
            Mode::LineStrip => indices.windows(2).map(<[u32]>::to_vec).collect(),
            Mode::LineLoop => {
                let mut faces: Vec<Vec<u32>> = indices.windows(2).map(<[u32]>::to_vec).collect();
                if let (Some(&first), Some(&last)) = (indices.first(), indices.last()) {
                    faces.push(vec![last, first]);
                }
                faces
            }
        }
    }

    fn convert_material(material: &gltf::Material) -> SceneMaterial {
        let diffuse = material
            .pbr_metallic_roughness()
            .base_color_texture()
            .and_then(|info| {
                let image = info.texture().source();
                match image.source() {
                    gltf::image::Source::Uri { uri, .. } if !uri.starts_with("data:") => {
                        Some(uri.to_string())
                    }
                    _ => image.name().map(str::to_string),
                }
            });

        SceneMaterial {
            name: material.name().unwrap_or("<Unnamed>").to_owned(),
            diffuse_textures: diffuse.into_iter().collect(),
        }
    }
}

impl SceneLoader for GltfLoader {
    fn load_from_file(path: &Path) -> Result<ImportedScene, ImportError> {
        if !path.exists() {
            return Err(ImportError::load_failed(path, "file not found"));
        }

        let gltf::Gltf { document, blob } =
            gltf::Gltf::open(path).map_err(|e| ImportError::load_failed(path, e))?;
        let buffers = gltf::import_buffers(&document, path.parent(), blob)
            .map_err(|e| ImportError::load_failed(path, e))?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unnamed");

        Self::build_scene(name, &document, &buffers)
    }

    fn load_from_memory(data: &[u8]) -> Result<ImportedScene, ImportError> {
        let gltf::Gltf { document, blob } =
            gltf::Gltf::from_slice(data).map_err(|e| ImportError::load_failed("<memory>", e))?;
        // 内存中的资源只能使用内嵌缓冲区或 data URI
        let buffers = gltf::import_buffers(&document, None, blob)
            .map_err(|e| ImportError::load_failed("<memory>", e))?;

        Self::build_scene("<memory>", &document, &buffers)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["gltf", "glb"]
    }
}
