/// 场景加载器模块
///
/// 提供统一的场景加载接口和各种格式的具体实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（使用 tobj crate）
/// - **glTF**: glTF 2.0 格式，`.gltf` 和 `.glb`（使用 gltf crate）
///
/// # 使用示例
///
/// ```rust,no_run
/// use dxr_demo::geometry::loaders::load_scene;
/// use dxr_demo::geometry::PostProcess;
/// use std::path::Path;
///
/// let scene = load_scene(Path::new("scene.obj"), PostProcess::IMPORT)?;
/// println!("{} children", scene.root.children.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::ImportError;
use crate::geometry::scene_graph::{ImportedScene, PostProcess};
use std::path::Path;

pub mod obj_loader;
pub mod gltf_loader;

// 重新导出加载器
pub use obj_loader::ObjLoader;
pub use gltf_loader::GltfLoader;

/// 场景加载器 trait
///
/// 所有格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 加载器是无状态的（使用静态方法）
/// - 返回符合 `scene_graph` 坐标约定的 `ImportedScene`
/// - 不做后处理，后处理由 [`load_scene`] 统一执行
pub trait SceneLoader {
    /// 从文件路径加载场景
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件格式错误或损坏
    fn load_from_file(path: &Path) -> Result<ImportedScene, ImportError>;

    /// 从内存数据加载场景
    fn load_from_memory(data: &[u8]) -> Result<ImportedScene, ImportError>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择加载器，加载后执行后处理
pub fn load_scene(path: &Path, post_process: PostProcess) -> Result<ImportedScene, ImportError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            ImportError::UnsupportedFormat(format!(
                "cannot determine file extension of '{}'",
                path.display()
            ))
        })?;

    let mut scene = if ObjLoader::supported_extensions().contains(&extension.as_str()) {
        ObjLoader::load_from_file(path)?
    } else if GltfLoader::supported_extensions().contains(&extension.as_str()) {
        GltfLoader::load_from_file(path)?
    } else {
        return Err(ImportError::UnsupportedFormat(format!(".{}", extension)));
    };

    scene.apply(post_process);

    tracing::debug!(
        path = %path.display(),
        children = scene.root.children.len(),
        meshes = scene.meshes.len(),
        materials = scene.materials.len(),
        "Loaded scene"
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(ObjLoader::supported_extensions().contains(&"obj"));
        assert!(GltfLoader::supported_extensions().contains(&"gltf"));
        assert!(GltfLoader::supported_extensions().contains(&"glb"));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = load_scene(Path::new("model.fbx"), PostProcess::IMPORT);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));

        let result = load_scene(Path::new("model"), PostProcess::IMPORT);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
