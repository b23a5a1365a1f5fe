//! 错误处理模块
//!
//! 定义了项目中使用的统一错误类型，使用 `thiserror` 提供友好的错误消息。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 导入失败的每一种原因都是可区分的错误类型
//! - 易于模式匹配和错误处理

use std::path::PathBuf;
use thiserror::Error;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, DxrError>;

/// 项目的顶层错误类型
#[derive(Debug, Error)]
pub enum DxrError {
    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 模型导入错误
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 日志系统错误
    #[error("Log error: {0}")]
    Log(String),
}

/// 配置相关的错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件未找到
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    /// 配置文件解析失败
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// 配置值无效
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 模型导入相关的错误
///
/// 导入器是唯一可能失败的单元，所有失败都通过这个类型报告。
#[derive(Debug, Error)]
pub enum ImportError {
    /// 资源文件无法读取或解析
    #[error("Failed to load asset '{}': {reason}", path.display())]
    AssetLoadFailed { path: PathBuf, reason: String },

    /// 不支持的文件格式
    #[error("Unsupported asset format: {0}")]
    UnsupportedFormat(String),

    /// 根节点没有指定索引的子节点
    #[error("Child index {index} out of range (root has {count} children)")]
    ChildIndexOutOfRange { index: usize, count: usize },

    /// 子节点没有引用任何网格
    #[error("Child {index} references no mesh")]
    EmptyMeshReference { index: usize },

    /// 资源数据不完整或不一致
    #[error("Malformed asset: {0}")]
    MalformedAsset(String),

    /// 场景有材质，但网格的材质没有漫反射纹理
    #[error("Mesh '{mesh}' has no diffuse texture")]
    MissingTexture { mesh: String, material: Option<usize> },
}

impl ImportError {
    /// 构造加载失败错误
    pub(crate) fn load_failed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ImportError::AssetLoadFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
