//! 场景配置模块
//!
//! 定义场景配置：相机参数、场景资源路径，以及从资源中导入的物体列表。
//!
//! # 配置文件格式 (scene.toml)
//!
//! ```toml
//! [camera]
//! fov = 65.0
//! position = [0.0, 0.0, -5.0]
//!
//! [model]
//! path = "assets/models/scene.obj"
//!
//! [[objects]]
//! name = "bear"
//! child_index = 1
//!
//! [[objects]]
//! name = "crystal"
//! child_index = 0
//! tint = [0.0, 1.0, 1.0, 1.0]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ConfigError, DxrError, Result};
use crate::math::Color;

/// 相机配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// 垂直视野角度（度数）
    #[serde(default = "default_fov")]
    pub fov: f32,

    /// 近裁剪面距离
    #[serde(default = "default_near_plane")]
    pub near_plane: f32,

    /// 远裁剪面距离
    #[serde(default = "default_far_plane")]
    pub far_plane: f32,

    /// 相机位置 (x, y, z)
    #[serde(default = "default_position")]
    pub position: [f32; 3],

    /// 前向方向 (x, y, z)，不要求归一化
    #[serde(default = "default_forward")]
    pub forward: [f32; 3],
}

fn default_fov() -> f32 {
    65.0
}

fn default_near_plane() -> f32 {
    0.01
}

fn default_far_plane() -> f32 {
    1000.0
}

fn default_position() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_forward() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            near_plane: default_near_plane(),
            far_plane: default_far_plane(),
            position: default_position(),
            forward: default_forward(),
        }
    }
}

/// 场景资源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 场景资源文件路径
    pub path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "assets/models/scene.obj".to_string(),
        }
    }
}

/// 场景中的一个物体
///
/// 每个物体对应资源根节点的一个子节点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    /// 物体名称（仅用于日志）
    pub name: String,

    /// 根节点子节点索引（从 0 开始）
    pub child_index: usize,

    /// 颜色 (r, g, b, a)
    #[serde(default = "default_tint")]
    pub tint: [f32; 4],
}

fn default_tint() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

impl ObjectConfig {
    /// 创建一个不着色的物体配置
    pub fn new(name: impl Into<String>, child_index: usize) -> Self {
        Self {
            name: name.into(),
            child_index,
            tint: default_tint(),
        }
    }

    /// 颜色
    pub fn tint_color(&self) -> Color {
        Color::from(self.tint)
    }
}

fn default_objects() -> Vec<ObjectConfig> {
    vec![ObjectConfig::new("bear", 1), ObjectConfig::new("crystal", 0)]
}

/// 场景配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// 相机配置
    #[serde(default)]
    pub camera: CameraConfig,

    /// 场景资源配置
    #[serde(default)]
    pub model: ModelConfig,

    /// 要导入的物体，按渲染顺序排列
    #[serde(default = "default_objects")]
    pub objects: Vec<ObjectConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            model: ModelConfig::default(),
            objects: default_objects(),
        }
    }
}

impl SceneConfig {
    /// 从文件加载场景配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            DxrError::Config(ConfigError::FileNotFound(format!(
                "Failed to read scene config file '{}': {}",
                path.display(),
                e
            )))
        })?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| {
            DxrError::Config(ConfigError::ParseError(format!(
                "Failed to parse scene config: {}",
                e
            )))
        })
    }

    /// 从文件加载，如果文件不存在或无效则返回默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded scene config from: {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load scene config: {}, using defaults", e);
                    Self::default()
                }
            }
        } else {
            tracing::info!("Scene config not found, using defaults");
            Self::default()
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self).map_err(|e| {
            DxrError::Config(ConfigError::ParseError(format!(
                "Failed to serialize scene config: {}",
                e
            )))
        })?;

        fs::write(path, contents)?;

        tracing::info!("Saved scene config to: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = CameraConfig::default();
        assert_eq!(camera.fov, 65.0);
        assert_eq!(camera.near_plane, 0.01);
        assert_eq!(camera.far_plane, 1000.0);
        assert_eq!(camera.forward, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_default_scene_objects() {
        let scene = SceneConfig::default();
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.objects[0], ObjectConfig::new("bear", 1));
        assert_eq!(scene.objects[1], ObjectConfig::new("crystal", 0));
        assert_eq!(scene.objects[0].tint_color(), Color::WHITE);
    }

    #[test]
    fn test_parse_scene() {
        let scene = SceneConfig::from_toml_str(
            r#"
            [camera]
            fov = 90.0

            [model]
            path = "assets/room.gltf"

            [[objects]]
            name = "lamp"
            child_index = 3
            tint = [0.0, 1.0, 1.0, 1.0]
            "#,
        )
        .unwrap();

        assert_eq!(scene.camera.fov, 90.0);
        assert_eq!(scene.camera.far_plane, 1000.0);
        assert_eq!(scene.model.path, "assets/room.gltf");
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.objects[0].child_index, 3);
        assert_eq!(scene.objects[0].tint_color(), Color::CYAN);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.toml");

        let mut scene = SceneConfig::default();
        scene.model.path = "assets/other.obj".to_string();
        scene.save_to_file(&path).unwrap();

        let loaded = SceneConfig::from_file(&path).unwrap();
        assert_eq!(loaded.model.path, "assets/other.obj");
        assert_eq!(loaded.objects, scene.objects);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let scene = SceneConfig::from_file_or_default("does/not/exist.toml");
        assert_eq!(scene.model.path, "assets/models/scene.obj");
    }
}
