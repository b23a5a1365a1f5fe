//! 统一的数学库模块
//!
//! 基于 `nalgebra` 提供图形编程常用的数学类型和函数。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector3, Matrix4, Color
//! - **常量**：PI, DEG_TO_RAD 等
//! - **工具函数**：deg_to_rad, approx_eq
//! - **矩阵辅助函数**：行主序/列主序数组与 Matrix4 之间的转换

pub use nalgebra::{Matrix4 as Mat4, Vector3 as Vec3};

// 类型别名，使用更简洁的名称
pub type Vector3 = Vec3<f32>;
pub type Matrix4 = Mat4<f32>;

/// 颜色类型（RGBA，范围 0.0-1.0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// 创建新的颜色
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 创建 RGB 颜色（alpha = 1.0）
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// 转换为数组
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    // 预定义颜色
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Color::new(c[0], c[1], c[2], c[3])
    }
}

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;
}

/// 数学工具函数
pub mod utils {
    use super::constants;

    /// 角度转弧度
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }
}

/// 矩阵辅助函数
///
/// 嵌套数组的外层索引：行主序为行，列主序为列。
pub mod matrix {
    use super::Matrix4;

    /// 从行主序数组创建矩阵，`m[r][c]` 成为第 r 行第 c 列
    pub fn from_row_major(m: &[[f32; 4]; 4]) -> Matrix4 {
        Matrix4::from_fn(|r, c| m[r][c])
    }

    /// 从列主序数组创建矩阵，`m[c][r]` 成为第 r 行第 c 列
    pub fn from_column_major(m: &[[f32; 4]; 4]) -> Matrix4 {
        Matrix4::from_fn(|r, c| m[c][r])
    }

    /// 矩阵转为行主序数组
    pub fn to_row_major(m: &Matrix4) -> [[f32; 4]; 4] {
        let mut out = [[0.0; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = m[(r, c)];
            }
        }
        out
    }
}
