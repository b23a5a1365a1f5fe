//! DXR Demo - 光线追踪演示的场景导入核心
//!
//! 从场景资源文件中按根节点子节点索引导入模型，
//! 生成渲染层使用的顶点缓冲、索引缓冲、变换矩阵和材质纹理路径，
//! 并提供相机参数的持有者。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、场景配置、错误处理）
//! - `math`: 数学类型和矩阵辅助函数
//! - `geometry`: 几何体导入模块（顶点、模型、材质、场景图、OBJ/glTF加载器）
//! - `component`: 场景对象组件（相机）
//!
//! # 使用示例
//!
//! ```no_run
//! use dxr_demo::component::Camera;
//! use dxr_demo::geometry::{ImportOptions, Model};
//! use dxr_demo::math::Color;
//!
//! let camera = Camera::new(1280.0, 720.0);
//!
//! let options = ImportOptions::default().with_tint(Color::CYAN);
//! let crystal = Model::import_mesh_from_file_of_index("assets/models/scene.obj", 0, &options)?;
//!
//! println!("{} triangles, texture {}", crystal.model.triangle_count(), crystal.material.texture_path);
//! # let _ = camera;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod math;
pub mod geometry;
pub mod component;
