/// 场景图模块
///
/// 各格式加载器的统一输出：一个根节点、按索引引用的网格列表和材质列表。
/// 导入器只读取这里的数据，不直接接触任何文件格式。
///
/// # 坐标约定
///
/// - 节点变换以行主序存储，采用列向量约定（平移位于第4列）
/// - 纹理坐标以左下角为原点（V 轴向上）
///
/// 加载器负责把各自格式的数据转换到这两个约定。

use std::collections::HashMap;

/// 单位矩阵（行主序）
#[rustfmt::skip]
pub const IDENTITY_TRANSFORM: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// 场景节点
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// 节点名称
    pub name: String,

    /// 局部变换（行主序）
    pub transform: [[f32; 4]; 4],

    /// 引用的网格索引（指向 `ImportedScene::meshes`）
    pub mesh_indices: Vec<usize>,

    /// 子节点，保持文件中的顺序
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// 创建一个空节点
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: IDENTITY_TRANSFORM,
            mesh_indices: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 创建引用给定网格的节点
    pub fn with_meshes(name: impl Into<String>, mesh_indices: Vec<usize>) -> Self {
        Self {
            mesh_indices,
            ..Self::new(name)
        }
    }
}

/// 场景中的一个网格
///
/// `faces` 中每个面是一组顶点索引；三角化之后每个面恰好3个索引。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMesh {
    /// 网格名称
    pub name: String,

    /// 顶点位置
    pub positions: Vec<[f32; 3]>,

    /// 顶点法线，缺失时为空
    pub normals: Vec<[f32; 3]>,

    /// 纹理坐标通道，每个通道与 `positions` 等长
    pub texcoords: Vec<Vec<[f32; 2]>>,

    /// 面列表
    pub faces: Vec<Vec<u32>>,

    /// 材质索引（指向 `ImportedScene::materials`）
    pub material_index: Option<usize>,
}

impl SceneMesh {
    /// 顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 是否包含法线
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// 是否包含指定的纹理坐标通道
    pub fn has_texcoords(&self, channel: usize) -> bool {
        self.texcoords.get(channel).is_some_and(|c| !c.is_empty())
    }

    /// 把多边形面扇形拆分为三角形，点和线保持不变
    pub fn triangulate(&mut self) {
        if self.faces.iter().all(|f| f.len() <= 3) {
            return;
        }

        let mut faces = Vec::with_capacity(self.faces.len());
        for face in self.faces.drain(..) {
            if face.len() <= 3 {
                faces.push(face);
                continue;
            }
            for i in 1..face.len() - 1 {
                faces.push(vec![face[0], face[i], face[i + 1]]);
            }
        }
        self.faces = faces;
    }

    /// 合并所有属性完全相同的顶点，并重映射面索引
    ///
    /// 属性长度不一致或面索引越界的网格保持原样，交由导入器报告。
    pub fn join_identical_vertices(&mut self) {
        let count = self.positions.len();
        let consistent = (self.normals.is_empty() || self.normals.len() == count)
            && self.texcoords.iter().all(|c| c.len() == count)
            && self.faces.iter().flatten().all(|&i| (i as usize) < count);
        if !consistent {
            tracing::debug!(mesh = %self.name, "Skipping vertex join on inconsistent mesh");
            return;
        }

        let mut lookup: HashMap<Vec<u32>, u32> = HashMap::with_capacity(count);
        let mut remap = Vec::with_capacity(count);
        let mut positions = Vec::with_capacity(count);
        let mut normals = Vec::with_capacity(self.normals.len());
        let mut texcoords: Vec<Vec<[f32; 2]>> = vec![Vec::with_capacity(count); self.texcoords.len()];

        for i in 0..count {
            let key = self.vertex_key(i);
            let next = positions.len() as u32;
            let index = *lookup.entry(key).or_insert_with(|| {
                positions.push(self.positions[i]);
                if let Some(n) = self.normals.get(i) {
                    normals.push(*n);
                }
                for (dst, src) in texcoords.iter_mut().zip(&self.texcoords) {
                    dst.push(src[i]);
                }
                next
            });
            remap.push(index);
        }

        if positions.len() == count {
            return;
        }

        tracing::debug!(
            mesh = %self.name,
            before = count,
            after = positions.len(),
            "Joined identical vertices"
        );

        for index in self.faces.iter_mut().flatten() {
            *index = remap[*index as usize];
        }
        self.positions = positions;
        self.normals = normals;
        self.texcoords = texcoords;
    }

    /// 顶点所有属性的位模式
    fn vertex_key(&self, i: usize) -> Vec<u32> {
        let mut key: Vec<u32> = self.positions[i].iter().map(|v| v.to_bits()).collect();
        if let Some(n) = self.normals.get(i) {
            key.extend(n.iter().map(|v| v.to_bits()));
        }
        for channel in &self.texcoords {
            key.extend(channel[i].iter().map(|v| v.to_bits()));
        }
        key
    }
}

/// 场景中的一个材质
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMaterial {
    /// 材质名称
    pub name: String,

    /// 漫反射纹理文件名，按纹理槽排列
    pub diffuse_textures: Vec<String>,
}

impl SceneMaterial {
    /// 获取指定槽的漫反射纹理文件名
    pub fn diffuse_texture(&self, slot: usize) -> Option<&str> {
        self.diffuse_textures
            .get(slot)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// 加载后的处理步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostProcess {
    /// 把多边形拆分为三角形
    pub triangulate: bool,

    /// 合并完全相同的顶点
    pub join_identical_vertices: bool,
}

impl PostProcess {
    /// 不做任何处理
    pub const NONE: PostProcess = PostProcess {
        triangulate: false,
        join_identical_vertices: false,
    };

    /// 导入器使用的固定处理：三角化并合并相同顶点
    pub const IMPORT: PostProcess = PostProcess {
        triangulate: true,
        join_identical_vertices: true,
    };
}

/// 加载完成的场景
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedScene {
    /// 根节点
    pub root: SceneNode,

    /// 所有网格
    pub meshes: Vec<SceneMesh>,

    /// 所有材质
    pub materials: Vec<SceneMaterial>,
}

impl ImportedScene {
    /// 创建一个只有根节点的空场景
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root: SceneNode::new(root_name),
            meshes: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// 场景是否声明了材质
    pub fn has_materials(&self) -> bool {
        !self.materials.is_empty()
    }

    /// 对所有网格执行后处理
    pub fn apply(&mut self, post_process: PostProcess) {
        for mesh in &mut self.meshes {
            if post_process.triangulate {
                mesh.triangulate();
            }
            if post_process.join_identical_vertices {
                mesh.join_identical_vertices();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> SceneMesh {
        SceneMesh {
            name: "quad".to_string(),
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 4],
            texcoords: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]],
            faces: vec![vec![0, 1, 2, 3]],
            material_index: None,
        }
    }

    #[test]
    fn test_triangulate_fans_polygons() {
        let mut mesh = quad();
        mesh.faces.push(vec![0, 1]);
        mesh.triangulate();

        assert_eq!(mesh.faces, vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 1]]);
    }

    #[test]
    fn test_join_identical_vertices() {
        let mut mesh = quad();
        // 两个三角形各自持有独立顶点，共享边上的顶点重复
        mesh.positions = vec![
            [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0],
            [0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        ];
        mesh.normals = vec![[0.0, 0.0, 1.0]; 6];
        mesh.texcoords = vec![vec![
            [0.0, 0.0], [1.0, 0.0], [1.0, 1.0],
            [0.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        ]];
        mesh.faces = vec![vec![0, 1, 2], vec![3, 4, 5]];

        mesh.join_identical_vertices();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.normals.len(), 4);
        assert_eq!(mesh.texcoords[0].len(), 4);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);
    }

    #[test]
    fn test_join_keeps_vertices_with_different_uvs() {
        let mut mesh = quad();
        mesh.positions[3] = mesh.positions[0];
        mesh.join_identical_vertices();

        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_join_skips_inconsistent_mesh() {
        let mut mesh = quad();
        mesh.normals.pop();
        let before = mesh.clone();
        mesh.join_identical_vertices();

        assert_eq!(mesh, before);
    }

    #[test]
    fn test_diffuse_texture_slot() {
        let material = SceneMaterial {
            name: "leaf".to_string(),
            diffuse_textures: vec!["leaf.png".to_string()],
        };
        assert_eq!(material.diffuse_texture(0), Some("leaf.png"));
        assert_eq!(material.diffuse_texture(1), None);

        let empty = SceneMaterial {
            name: "blank".to_string(),
            diffuse_textures: vec![String::new()],
        };
        assert_eq!(empty.diffuse_texture(0), None);
    }

    #[test]
    fn test_apply_post_process() {
        let mut scene = ImportedScene::new("root");
        scene.meshes.push(quad());

        scene.apply(PostProcess::NONE);
        assert_eq!(scene.meshes[0].faces.len(), 1);

        scene.apply(PostProcess::IMPORT);
        assert_eq!(scene.meshes[0].faces.len(), 2);
        assert!(!scene.has_materials());
    }
}
