/// 模型数据结构模块
///
/// 定义CPU侧的模型容器：一块顶点缓冲、一块索引缓冲和一个变换矩阵。
/// 导入逻辑见 `importer` 模块。

use super::vertex::Vertex;
use crate::math::Matrix4;

/// CPU侧模型数据
///
/// 由导入器（或空参数构造）创建一次，之后只被GPU资源层读取。
///
/// # 不变量
///
/// - `indices.len() % 3 == 0`，每3个索引定义一个三角形
/// - 每个索引都小于 `vertices.len()`
///
/// 直接构造不做校验，需要时调用 [`Model::validate`]。
///
/// # 示例
///
/// ```rust
/// use dxr_demo::geometry::Model;
/// use dxr_demo::math::Matrix4;
///
/// let model = Model::default();
/// assert_eq!(model.vertex_count(), 0);
/// assert_eq!(model.transform, Matrix4::identity());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// 顶点数组，插入顺序即渲染顺序
    pub vertices: Vec<Vertex>,

    /// 三角形顶点索引，保持源资源的绕序
    pub indices: Vec<u32>,

    /// 模型变换
    pub transform: Matrix4,
}

impl Model {
    /// 用给定数据创建模型，不做校验
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, transform: Matrix4) -> Self {
        Self {
            vertices,
            indices,
            transform,
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 顶点缓冲区的原始字节
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// 索引缓冲区的原始字节
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// 验证模型数据的有效性
    ///
    /// 检查：
    /// - 索引数量是3的倍数
    /// - 所有索引都在有效范围内
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "index count must be a multiple of 3, got {}",
                self.indices.len()
            ));
        }

        let vertex_count = self.vertices.len();
        if let Some((i, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= vertex_count)
        {
            return Err(format!(
                "index {} at position {} is out of range ({} vertices)",
                index, i, vertex_count
            ));
        }

        Ok(())
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Matrix4::identity())
    }
}
