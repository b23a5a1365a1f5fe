/// 材质数据
///
/// 导入器为每个模型解析出的材质信息，由GPU资源层读取并创建纹理。

use crate::math::Color;
use serde::{Deserialize, Serialize};

/// 模型材质
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    /// 漫反射纹理路径（相对于程序工作目录）
    pub texture_path: String,

    /// 颜色，默认不透明白色
    pub tint: Color,
}

impl Material {
    /// 创建材质
    pub fn new(texture_path: impl Into<String>, tint: Color) -> Self {
        Self {
            texture_path: texture_path.into(),
            tint,
        }
    }
}

/// 材质缺少漫反射纹理时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTexturePolicy {
    /// 返回 `ImportError::MissingTexture`
    #[default]
    Error,

    /// 使用备用纹理
    Fallback,
}
