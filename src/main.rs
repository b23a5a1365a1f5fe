//! DXR Demo - 场景导入演示程序
//!
//! 加载配置和场景描述，创建相机，并从场景资源中导入每个物体。
//! 导入结果（模型和材质）交给 GPU 资源层创建缓冲区和纹理。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 指定场景文件和窗口尺寸（命令行覆盖）
//! cargo run -- --model assets/models/scene.gltf --width 1280 --height 720
//! ```
//!
//! # 架构概览
//!
//! ```text
//! ┌─────────────┐
//! │   main.rs   │  应用程序入口
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Core     │  配置/日志/场景配置
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Geometry   │  场景加载 + 子节点导入
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Model/Material/Camera │  交给 GPU 资源层
//! └─────────────┘
//! ```

use anyhow::{Context, Result};
use tracing::{error, info};

use dxr_demo::component::Camera;
use dxr_demo::core::{log, Config, SceneConfig};
use dxr_demo::geometry::{ImportOptions, ImportedModel, Model};

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载程序配置文件（config.toml）
/// 2. 应用命令行参数覆盖
/// 3. 初始化日志系统
/// 4. 加载场景配置文件（scene.toml）
/// 5. 创建相机
/// 6. 导入场景中的每个物体
///
/// # 命令行参数
///
/// - `--width <value>`: 设置窗口宽度
/// - `--height <value>`: 设置窗口高度
/// - `--model <path>`: 指定场景资源文件
/// - `--no-vsync`: 关闭垂直同步
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    config.validate().context("Invalid configuration")?;

    // 4. 初始化日志系统（使用配置中的设置）
    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file)
        .context("Failed to initialize logging")?;
    info!("DXR Demo starting...");
    info!(version = env!("CARGO_PKG_VERSION"), "Application initialized");
    info!(
        title = %config.window.title,
        width = config.window.width,
        height = config.window.height,
        vsync = config.window.vsync,
        "Window configuration"
    );

    // 日志系统就绪后的错误同时写入日志
    import_scene(config).inspect_err(|e| error!("{:#}", e))
}

/// 加载场景配置，创建相机并导入所有物体
fn import_scene(mut config: Config) -> Result<()> {
    // 加载场景配置
    let mut scene = SceneConfig::from_file_or_default("scene.toml");
    if let Some(path) = config.model_override.take() {
        scene.model.path = path;
    }

    // 创建相机
    let camera = Camera::from_config(
        &scene.camera,
        config.window.width as f32,
        config.window.height as f32,
    );
    info!(
        width = camera.width,
        height = camera.height,
        fov = camera.vertical_fov,
        position = ?camera.position,
        forward = ?camera.forward,
        "Camera created"
    );

    // 导入物体
    let mut imported: Vec<(String, ImportedModel)> = Vec::with_capacity(scene.objects.len());
    for object in &scene.objects {
        let options = ImportOptions::default()
            .with_tint(object.tint_color())
            .with_missing_texture(config.import.missing_texture);

        let result = Model::import_mesh_from_file_of_index(&scene.model.path, object.child_index, &options)
            .with_context(|| {
                format!(
                    "Failed to import '{}' (child {}) from '{}'",
                    object.name, object.child_index, scene.model.path
                )
            })?;

        imported.push((object.name.clone(), result));
    }

    // 输出导入结果，交给 GPU 资源层
    for (name, result) in &imported {
        info!(
            object = %name,
            vertices = result.model.vertex_count(),
            triangles = result.model.triangle_count(),
            vertex_bytes = result.model.vertex_bytes().len(),
            index_bytes = result.model.index_bytes().len(),
            texture = %result.material.texture_path,
            tint = ?result.material.tint.to_array(),
            "Model ready for upload"
        );
    }

    info!(count = imported.len(), "Scene import complete");
    Ok(())
}
