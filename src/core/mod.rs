//! 核心功能模块
//!
//! 本模块提供查看器的基础功能，包括数学类型、日志系统、配置管理和错误处理。
//! 这些模块独立于具体的图形 API。
//!
//! # 模块组织
//!
//! - `math`：基于 nalgebra 的数学类型
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载加载器与日志设置
//! - `scene`：场景配置（模型路径、材质文件、变换）
//! - `error`：错误处理，定义统一的错误类型

pub mod math;
pub mod log;
pub mod config;
pub mod scene;
pub mod error;

// 重新导出常用类型，方便使用
pub use math::{Vector3, Matrix4};
pub use error::{Result, ViewerError};
pub use config::{Config, LoaderConfig, ViewerConfig};
pub use scene::{SceneConfig, Transform};
