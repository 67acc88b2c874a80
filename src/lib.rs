//! model_viewer - OBJ/MTL 模型快速加载
//!
//! 单遍、行式的 Wavefront OBJ 加载管线：解析时直接完成顶点去重、
//! 按材质分桶与扇形三角化，每个材质输出一个可直接上传到 GPU 的网格。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理、场景配置）
//! - `geometry`: 几何体加载模块（顶点、属性池、材质桶、OBJ/MTL 加载器）
//! - `texture`: 纹理上传协作方与材质纹理绑定
//! - `model`: 模型层（格式分派、包围盒、自定义纹理）
//!
//! # 使用示例
//!
//! ```no_run
//! use model_viewer::core::LoaderConfig;
//! use model_viewer::geometry::loaders::ObjLoader;
//! use std::path::Path;
//!
//! let mut loader = ObjLoader::new(LoaderConfig::default());
//! loader.set_progress_callback(|p| println!("{:.0}%", p * 100.0));
//!
//! // 任何 FnMut(&Path) -> u32 都可以作为纹理上传器
//! let mut upload = |path: &Path| {
//!     println!("upload {}", path.display());
//!     1u32
//! };
//! let meshes = loader.load_obj(Path::new("house.obj"), Some(Path::new("house.mtl")), &mut upload)?;
//!
//! for mesh in &meshes {
//!     let bytes: &[u8] = bytemuck::cast_slice(mesh.vertices());
//!     println!("{}: {} bytes", mesh.material.name, bytes.len());
//! }
//! # Ok::<(), model_viewer::core::ViewerError>(())
//! ```

pub mod core;
pub mod geometry;
pub mod texture;
pub mod model;
