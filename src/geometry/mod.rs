/// 几何体导入模块
///
/// 把场景资源中的一个物体导入为渲染用的模型：顶点、索引、变换和材质纹理路径。
///
/// # 模块结构
///
/// - `vertex`: 渲染用顶点
/// - `model`: 模型数据（顶点缓冲、索引缓冲、变换）
/// - `material`: 材质数据
/// - `scene_graph`: 加载器输出的场景图和后处理
/// - `loaders`: 各种格式的场景加载器
/// - `importer`: 从场景图中选取子节点并生成模型
///
/// # 架构设计
///
/// ```text
/// 文件 (OBJ/glTF)
///     ↓
/// SceneLoader (ObjLoader/GltfLoader) + PostProcess
///     ↓
/// ImportedScene (场景图)
///     ↓
/// Model::import_from_scene
///     ↓
/// ImportedModel { Model, Material } → GPU资源层
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use dxr_demo::geometry::{ImportOptions, Model};
///
/// let crystal = Model::import_mesh_from_file_of_index("assets/scene.obj", 0, &ImportOptions::default())?;
///
/// println!("顶点数: {}", crystal.model.vertex_count());
/// println!("纹理: {}", crystal.material.texture_path);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

pub mod vertex;
pub mod model;
pub mod material;
pub mod scene_graph;
pub mod loaders;
pub mod importer;

// 重新导出常用类型
pub use vertex::Vertex;
pub use model::Model;
pub use material::{Material, MissingTexturePolicy};
pub use scene_graph::{ImportedScene, PostProcess, SceneMaterial, SceneMesh, SceneNode};
pub use importer::{ImportOptions, ImportedModel};
