//! Camera 组件
//!
//! 保存相机的视口尺寸、视锥体参数和朝向。
//! 视图矩阵和投影矩阵由渲染层根据这些字段计算。

use crate::core::config::{default_height, default_width};
use crate::core::scene::CameraConfig;
use crate::math::constants::DEG_TO_RAD;
use crate::math::utils::deg_to_rad;
use crate::math::Vector3;

/// Camera 组件
///
/// 纯数据：构造时不做任何推导计算，也不检查参数
/// （`far_plane <= near_plane` 或零长度方向都会原样保存）。
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// 视口宽度（像素）
    pub width: f32,

    /// 视口高度（像素）
    pub height: f32,

    /// 垂直视场角（弧度）
    pub vertical_fov: f32,

    /// 近裁剪面距离
    pub near_plane: f32,

    /// 远裁剪面距离
    pub far_plane: f32,

    /// 相机位置
    pub position: Vector3,

    /// 前向方向，不要求归一化
    pub forward: Vector3,
}

impl Camera {
    /// 默认垂直视场角：65 度
    pub const DEFAULT_VERTICAL_FOV: f32 = 65.0 * DEG_TO_RAD;

    /// 默认近裁剪面距离
    pub const DEFAULT_NEAR_PLANE: f32 = 0.01;

    /// 默认远裁剪面距离
    pub const DEFAULT_FAR_PLANE: f32 = 1000.0;

    /// 创建指定视口尺寸的相机，其余参数使用默认值
    ///
    /// 位于原点，朝向 +Z。
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            vertical_fov: Self::DEFAULT_VERTICAL_FOV,
            near_plane: Self::DEFAULT_NEAR_PLANE,
            far_plane: Self::DEFAULT_FAR_PLANE,
            position: Vector3::zeros(),
            forward: Vector3::z(),
        }
    }

    /// 设置透视参数
    ///
    /// # 参数
    ///
    /// * `vertical_fov` - 垂直视场角（弧度）
    /// * `near_plane` - 近裁剪面距离
    /// * `far_plane` - 远裁剪面距离
    pub fn with_lens(mut self, vertical_fov: f32, near_plane: f32, far_plane: f32) -> Self {
        self.vertical_fov = vertical_fov;
        self.near_plane = near_plane;
        self.far_plane = far_plane;
        self
    }

    /// 设置相机位置
    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    /// 设置前向方向
    pub fn with_forward(mut self, forward: Vector3) -> Self {
        self.forward = forward;
        self
    }

    /// 从场景配置创建相机
    ///
    /// 配置中的视场角是度数，这里转换为弧度。
    pub fn from_config(config: &CameraConfig, width: f32, height: f32) -> Self {
        Self::new(width, height)
            .with_lens(deg_to_rad(config.fov), config.near_plane, config.far_plane)
            .with_position(Vector3::from(config.position))
            .with_forward(Vector3::from(config.forward))
    }

    /// 宽高比
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(default_width() as f32, default_height() as f32)
    }
}
