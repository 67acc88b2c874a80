//! 错误处理模块
//!
//! 定义了查看器中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//!
//! # 错误分类
//!
//! 加载管线内部的解析异常（数值格式错误、未知指令、越界索引）都在本地
//! 以默认值恢复，不会出现在这里。只有两类加载失败会传给调用者：
//! 文件无法打开或读取（`FileNotFound`）与解析完成但没有产生任何几何体（`EmptyModel`）。
//! 外部导入器返回的索引越界数据报 `InvalidGeometry`。

use std::fmt;
use std::path::PathBuf;

/// 查看器统一的 Result 类型
pub type Result<T> = std::result::Result<T, ViewerError>;

/// 查看器的错误类型
#[derive(Debug)]
pub enum ViewerError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// 纹理错误
    Texture(TextureError),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在、无法打开或读取中途失败
    FileNotFound(PathBuf),

    /// 不支持的文件格式（没有注册对应的导入器）
    UnsupportedFormat(String),

    /// 文件结构合法，但没有产生任何顶点/索引
    EmptyModel(PathBuf),

    /// 只有 OBJ 模型可以附加 MTL 文件
    NotObjModel(PathBuf),

    /// 几何数据无效（索引数量不是3的倍数或越界）
    InvalidGeometry(String),
}

/// 纹理相关的错误
#[derive(Debug)]
pub enum TextureError {
    /// 纹理目录不存在或不是目录
    FolderNotFound(PathBuf),

    /// 文件不是支持的图片格式
    NotAnImage(PathBuf),

    /// 上传失败（上传器返回了空句柄）
    UploadFailed(PathBuf),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Config(e) => write!(f, "Configuration error: {}", e),
            ViewerError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            ViewerError::Texture(e) => write!(f, "Texture error: {}", e),
            ViewerError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::EmptyModel(path) => {
                write!(f, "Loader produced no geometry for: {}", path.display())
            }
            MeshLoadError::NotObjModel(path) => {
                write!(f, "MTL files can only be applied to OBJ models: {}", path.display())
            }
            MeshLoadError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
        }
    }
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::FolderNotFound(path) => {
                write!(f, "Texture folder not found: {}", path.display())
            }
            TextureError::NotAnImage(path) => write!(f, "Not an image file: {}", path.display()),
            TextureError::UploadFailed(path) => {
                write!(f, "Texture failed to load at path: {}", path.display())
            }
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Io(e) => Some(e),
            ViewerError::Config(e) => Some(e),
            ViewerError::MeshLoading(e) => Some(e),
            ViewerError::Texture(e) => Some(e),
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for MeshLoadError {}
impl std::error::Error for TextureError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::Io(err)
    }
}

impl From<ConfigError> for ViewerError {
    fn from(err: ConfigError) -> Self {
        ViewerError::Config(err)
    }
}

impl From<MeshLoadError> for ViewerError {
    fn from(err: MeshLoadError) -> Self {
        ViewerError::MeshLoading(err)
    }
}

impl From<TextureError> for ViewerError {
    fn from(err: TextureError) -> Self {
        ViewerError::Texture(err)
    }
}
