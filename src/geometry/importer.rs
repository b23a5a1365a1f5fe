/// 模型导入器
///
/// 从场景资源中选出根节点的一个子节点，取其第一个网格，展开为渲染用的
/// 顶点/索引缓冲，解析漫反射纹理路径，并转换节点变换。
///
/// # 导入约定
///
/// - 纹理路径 = [`TEXTURE_DIRECTORY`] + 资源中的漫反射纹理文件名
/// - 场景没有任何材质时使用 [`TEXTURE_DIRECTORY`] + [`FALLBACK_TEXTURE`]
/// - UV 的 V 分量翻转为 `1 - v`（见 [`flip_v`]）
/// - 节点变换转置为渲染端的行向量布局（见 [`convert_transform`]）
///
/// # 流程
///
/// ```text
/// 文件 (OBJ/glTF)
///     ↓ load_scene + PostProcess::IMPORT
/// ImportedScene
///     ↓ Model::import_from_scene
/// ImportedModel { Model, Material }
///     ↓
/// GPU资源层
/// ```

use std::path::Path;

use super::loaders::load_scene;
use super::material::{Material, MissingTexturePolicy};
use super::model::Model;
use super::scene_graph::{ImportedScene, PostProcess, SceneMesh};
use super::vertex::Vertex;
use crate::core::error::ImportError;
use crate::math::{matrix, Color, Matrix4};

/// 纹理目录前缀
pub const TEXTURE_DIRECTORY: &str = "textures/";

/// 场景没有材质时使用的纹理文件名
pub const FALLBACK_TEXTURE: &str = "statue.jpg";

/// 读取的纹理坐标通道
pub const TEXCOORD_CHANNEL: usize = 0;

/// 读取的漫反射纹理槽
pub const DIFFUSE_SLOT: usize = 0;

/// 把资源的 V 坐标（左下角原点）翻转为渲染端约定（左上角原点）
#[inline]
pub fn flip_v(v: f32) -> f32 {
    1.0 - v
}

/// 拼接纹理路径
pub fn texture_path(file_name: &str) -> String {
    format!("{}{}", TEXTURE_DIRECTORY, file_name)
}

/// 把节点的行主序变换转换为渲染端矩阵
///
/// 资源矩阵 `a1..d4` 按列重排：结果的第 r 行是源矩阵的第 r 列，即转置。
/// 源矩阵第4列的平移量因此落在结果的第4行。
pub fn convert_transform(source: &[[f32; 4]; 4]) -> Matrix4 {
    matrix::from_row_major(source).transpose()
}

/// 导入选项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportOptions {
    /// 颜色，写入返回的材质
    pub tint: Color,

    /// 材质缺少漫反射纹理时的处理方式
    pub missing_texture: MissingTexturePolicy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            missing_texture: MissingTexturePolicy::default(),
        }
    }
}

impl ImportOptions {
    /// 设置颜色
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    /// 设置缺失纹理的处理方式
    pub fn with_missing_texture(mut self, policy: MissingTexturePolicy) -> Self {
        self.missing_texture = policy;
        self
    }
}

/// 导入结果：模型和它的材质
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedModel {
    pub model: Model,
    pub material: Material,
}

impl Model {
    /// 从场景文件导入根节点第 `index` 个子节点的模型
    ///
    /// 文件加载后固定执行三角化和相同顶点合并。
    ///
    /// # 示例
    ///
    /// ```rust,no_run
    /// use dxr_demo::geometry::{ImportOptions, Model};
    ///
    /// let bear = Model::import_mesh_from_file_of_index("assets/scene.obj", 1, &ImportOptions::default())?;
    /// println!("{} -> {}", bear.model.triangle_count(), bear.material.texture_path);
    /// # Ok::<(), dxr_demo::core::DxrError>(())
    /// ```
    pub fn import_mesh_from_file_of_index(
        path: impl AsRef<Path>,
        index: usize,
        options: &ImportOptions,
    ) -> Result<ImportedModel, ImportError> {
        let path = path.as_ref();
        let scene = load_scene(path, PostProcess::IMPORT)?;
        let imported = Self::import_from_scene(&scene, index, options)?;

        tracing::info!(
            path = %path.display(),
            child = index,
            vertices = imported.model.vertex_count(),
            triangles = imported.model.triangle_count(),
            texture = %imported.material.texture_path,
            "Imported model"
        );

        Ok(imported)
    }

    /// 从已加载的场景导入根节点第 `index` 个子节点的模型
    ///
    /// 只读取子节点引用的第一个网格。
    pub fn import_from_scene(
        scene: &ImportedScene,
        index: usize,
        options: &ImportOptions,
    ) -> Result<ImportedModel, ImportError> {
        let children = &scene.root.children;
        let child = children
            .get(index)
            .ok_or(ImportError::ChildIndexOutOfRange {
                index,
                count: children.len(),
            })?;

        let mesh_index = *child
            .mesh_indices
            .first()
            .ok_or(ImportError::EmptyMeshReference { index })?;

        if child.mesh_indices.len() > 1 {
            tracing::warn!(
                child = %child.name,
                meshes = child.mesh_indices.len(),
                "Child references several meshes, only the first one is imported"
            );
        }

        let mesh = scene.meshes.get(mesh_index).ok_or_else(|| {
            ImportError::MalformedAsset(format!(
                "child '{}' references mesh {} but the scene has {} meshes",
                child.name,
                mesh_index,
                scene.meshes.len()
            ))
        })?;

        tracing::debug!(child = %child.name, mesh = %mesh.name, "Selected mesh");

        let transform = convert_transform(&child.transform);
        let texture_path = resolve_texture_path(scene, mesh, options.missing_texture)?;
        let vertices = extract_vertices(mesh)?;
        let indices = extract_indices(mesh)?;

        Ok(ImportedModel {
            model: Model::new(vertices, indices, transform),
            material: Material::new(texture_path, options.tint),
        })
    }
}

/// 解析网格的漫反射纹理路径
fn resolve_texture_path(
    scene: &ImportedScene,
    mesh: &SceneMesh,
    policy: MissingTexturePolicy,
) -> Result<String, ImportError> {
    if !scene.has_materials() {
        return Ok(texture_path(FALLBACK_TEXTURE));
    }

    let material_index = match mesh.material_index {
        Some(material_index) => material_index,
        None => return missing_texture(mesh, None, policy),
    };

    let material = scene.materials.get(material_index).ok_or_else(|| {
        ImportError::MalformedAsset(format!(
            "mesh '{}' references material {} but the scene has {} materials",
            mesh.name,
            material_index,
            scene.materials.len()
        ))
    })?;

    match material.diffuse_texture(DIFFUSE_SLOT) {
        Some(file_name) => Ok(texture_path(file_name)),
        None => missing_texture(mesh, Some(material_index), policy),
    }
}

fn missing_texture(
    mesh: &SceneMesh,
    material: Option<usize>,
    policy: MissingTexturePolicy,
) -> Result<String, ImportError> {
    match policy {
        MissingTexturePolicy::Error => Err(ImportError::MissingTexture {
            mesh: mesh.name.clone(),
            material,
        }),
        MissingTexturePolicy::Fallback => {
            tracing::warn!(mesh = %mesh.name, "Mesh has no diffuse texture, using fallback");
            Ok(texture_path(FALLBACK_TEXTURE))
        }
    }
}

/// 展开顶点：位置和法线原样复制，UV 取通道0并翻转 V
fn extract_vertices(mesh: &SceneMesh) -> Result<Vec<Vertex>, ImportError> {
    let count = mesh.vertex_count();

    if !mesh.has_normals() {
        return Err(ImportError::MalformedAsset(format!(
            "mesh '{}' has no normals",
            mesh.name
        )));
    }
    if mesh.normals.len() != count {
        return Err(ImportError::MalformedAsset(format!(
            "mesh '{}' has {} normals for {} vertices",
            mesh.name,
            mesh.normals.len(),
            count
        )));
    }

    let texcoords = mesh
        .texcoords
        .get(TEXCOORD_CHANNEL)
        .filter(|channel| !channel.is_empty())
        .ok_or_else(|| {
            ImportError::MalformedAsset(format!(
                "mesh '{}' has no texture coordinate channel {}",
                mesh.name, TEXCOORD_CHANNEL
            ))
        })?;
    if texcoords.len() != count {
        return Err(ImportError::MalformedAsset(format!(
            "mesh '{}' has {} texture coordinates for {} vertices",
            mesh.name,
            texcoords.len(),
            count
        )));
    }

    let vertices = mesh
        .positions
        .iter()
        .zip(&mesh.normals)
        .zip(texcoords)
        .map(|((&position, &normal), &[u, v])| Vertex::new(position, [u, flip_v(v)], normal))
        .collect();

    Ok(vertices)
}

/// 按原始绕序收集三角形索引
fn extract_indices(mesh: &SceneMesh) -> Result<Vec<u32>, ImportError> {
    let count = mesh.vertex_count();
    let mut indices = Vec::with_capacity(mesh.faces.len() * 3);

    for (i, face) in mesh.faces.iter().enumerate() {
        if face.len() != 3 {
            return Err(ImportError::MalformedAsset(format!(
                "mesh '{}' face {} has {} indices, expected a triangle",
                mesh.name,
                i,
                face.len()
            )));
        }
        if let Some(&bad) = face.iter().find(|&&index| index as usize >= count) {
            return Err(ImportError::MalformedAsset(format!(
                "mesh '{}' face {} references vertex {} of {}",
                mesh.name, i, bad, count
            )));
        }
        indices.extend_from_slice(face);
    }

    Ok(indices)
}
