//! 核心功能模块
//!
//! 提供与具体图形 API 无关的基础功能：日志系统、配置管理、场景配置和错误处理。
//!
//! # 模块组织
//!
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载程序设置
//! - `scene`：场景配置，描述相机和要导入的物体
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod scene;
pub mod error;

// 重新导出常用类型，方便使用
pub use error::{Result, DxrError, ConfigError, ImportError};
pub use config::Config;
pub use scene::{SceneConfig, CameraConfig, ObjectConfig};
