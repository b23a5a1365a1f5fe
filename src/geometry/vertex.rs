/// 顶点定义模块
///
/// 定义导入后送往光线追踪管线的顶点结构，包含位置、UV坐标和法线。

use bytemuck::{Pod, Zeroable};

/// 渲染用顶点
///
/// 内存布局与GPU顶点缓冲区一致，使用 `#[repr(C)]` 保证顺序和对齐。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - texcoord: 8 bytes (2 * f32)
/// - normal: 12 bytes (3 * f32)
/// - **总计**: 32 bytes
///
/// `texcoord` 的 V 分量已经相对源资源翻转（`1 - v`），与渲染端的纹理坐标约定一致。
///
/// # 示例
///
/// ```rust
/// use dxr_demo::geometry::Vertex;
///
/// let vertex = Vertex::new([0.0, 1.0, 0.0], [0.5, 0.5], [0.0, 1.0, 0.0]);
/// assert_eq!(vertex.texcoord, [0.5, 0.5]);
/// ```
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 纹理坐标 (u, v)
    pub texcoord: [f32; 2],

    /// 法线向量 (nx, ny, nz)
    pub normal: [f32; 3],
}

impl Vertex {
    /// 创建一个新的顶点
    #[inline]
    pub fn new(position: [f32; 3], texcoord: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}
