//! model_viewer - 模型加载命令行工具
//!
//! 加载 OBJ 模型（可选 MTL 材质与纹理目录），输出网格、材质、纹理与包围盒信息。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用 scene.toml 中配置的模型
//! cargo run
//!
//! # 命令行指定模型与材质
//! cargo run -- assets/models/house.obj --mtl assets/models/house.mtl
//!
//! # 追加纹理目录，不翻转 V 坐标，输出调试日志
//! cargo run -- house.obj --textures assets/textures --no-flip-v --log debug
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
//! │    Core     │  配置、日志、错误处理
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Model    │  格式分派、包围盒、自定义纹理
//! └──────┬──────┘
//!        │
//!   ┌────┴─────┐
//!   │          │
//! ┌─▼──────┐ ┌─▼───────┐
//! │Geometry│ │ Texture │  OBJ/MTL 解析与纹理上传
//! └────────┘ └─────────┘
//! ```

use std::path::Path;

use anyhow::Context;
use model_viewer::core::{log, Config, SceneConfig};
use model_viewer::model::ModelLoader;
use model_viewer::texture::ImageTextureStore;
use tracing::{debug, info};

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载查看器配置文件（config.toml）
/// 2. 应用命令行参数覆盖
/// 3. 初始化日志系统
/// 4. 加载场景配置文件（scene.toml）并应用模型参数
/// 5. 加载模型与纹理
/// 6. 输出摘要
///
/// # 命令行参数
///
/// - `<path>`: 模型文件路径
/// - `--mtl <path>`: MTL 材质文件（仅 OBJ）
/// - `--textures <dir>`: 额外纹理目录
/// - `--no-flip-v`: 不翻转纹理坐标 V 分量
/// - `--single-mesh`: 不按材质拆分网格
/// - `--log <level>`: 日志级别
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    let model_args = config.apply_args(std::env::args());

    config.validate().context("Invalid configuration")?;

    // 3. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "model_viewer starting");
    debug!(?config, "Viewer configuration");

    // 4. 场景配置
    let mut scene = SceneConfig::from_file_or_default("scene.toml");
    scene.apply_model_args(&model_args);
    let model_config = &scene.model;

    // 5. 加载模型
    let mut textures = ImageTextureStore::new();
    let mut loader = ModelLoader::new(&config);
    let mtl_path = model_config.mtl_path.as_deref().map(Path::new);

    let mut model = loader
        .load(&model_config.path, mtl_path, &mut textures)
        .with_context(|| format!("Failed to load model '{}'", model_config.path))?;

    let texture_folder = model_config
        .texture_folder
        .as_deref()
        .map(Path::new)
        .or_else(|| config.viewer.auto_texture_folder.then(|| model.directory()));
    if let Some(folder) = texture_folder.map(Path::to_path_buf) {
        model
            .load_textures_from_folder(&folder, &mut textures)
            .with_context(|| format!("Failed to load textures from '{}'", folder.display()))?;
    }

    // 6. 输出摘要
    println!("Model: {}", model.path().display());
    println!(
        "  meshes: {}  vertices: {}  triangles: {}",
        model.meshes().len(),
        model.vertex_count(),
        model.triangle_count()
    );
    for mesh in model.meshes() {
        println!(
            "  [{}] vertices: {}  indices: {}  textures: {}",
            mesh.material.name,
            mesh.data.vertex_count(),
            mesh.data.index_count(),
            mesh.textures.len()
        );
        for texture in &mesh.textures {
            println!("      {} #{} {}", texture.kind, texture.id, texture.path);
        }
    }
    if let Some(bounds) = model.bounds() {
        println!(
            "  bounds: min {:?} max {:?} center {:?}",
            bounds.min.as_slice(),
            bounds.max.as_slice(),
            bounds.center.as_slice()
        );
        println!("  recommended scale: {}", bounds.recommended_scale);
    }
    println!("  decoded textures: {}", textures.len());

    let matrix = model.model_matrix(&model_config.transform);
    debug!(?matrix, "Model matrix");

    info!("model_viewer finished");
    Ok(())
}
