//! 组件模块
//!
//! 渲染层读取的场景对象。目前只有相机。

mod camera;

pub use camera::Camera;
