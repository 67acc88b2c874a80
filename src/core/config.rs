//! 配置管理模块
//!
//! 提供查看器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [loader]
//! progress_interval_lines = 10000
//! scan_progress_share = 0.8
//! flip_texcoord_v = true
//! split_by_material = true
//! reserve_capacity = true
//!
//! [viewer]
//! target_size = 2.0
//! auto_texture_folder = false
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 查看器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// OBJ 加载管线配置
    #[serde(default)]
    pub loader: LoaderConfig,

    /// 模型展示配置
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// OBJ 加载管线配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// 每扫描多少行上报一次进度
    #[serde(default = "default_progress_interval")]
    pub progress_interval_lines: usize,

    /// 扫描阶段占整体进度的比例，剩余部分留给网格组装
    #[serde(default = "default_scan_share")]
    pub scan_progress_share: f32,

    /// 解析 `vt` 时是否将 V 坐标存为 `1 - v`
    #[serde(default = "default_flip_v")]
    pub flip_texcoord_v: bool,

    /// 是否按 `usemtl` 拆分为多个网格
    ///
    /// 关闭时所有面都进入同一个网格，且不绑定材质纹理。
    #[serde(default = "default_split_by_material")]
    pub split_by_material: bool,

    /// 是否根据文件大小预分配属性池
    #[serde(default = "default_reserve")]
    pub reserve_capacity: bool,
}

/// 模型展示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// 模型最长边缩放到的目标尺寸
    #[serde(default = "default_target_size")]
    pub target_size: f32,

    /// 加载后是否自动扫描模型所在目录中的纹理
    #[serde(default)]
    pub auto_texture_folder: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// 从命令行字符串解析日志级别
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

// 默认值函数
fn default_progress_interval() -> usize { 10_000 }
fn default_scan_share() -> f32 { 0.8 }
fn default_flip_v() -> bool { true }
fn default_split_by_material() -> bool { true }
fn default_reserve() -> bool { true }
fn default_target_size() -> f32 { 2.0 }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "model_viewer.log".to_string() }

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            progress_interval_lines: default_progress_interval(),
            scan_progress_share: default_scan_share(),
            flip_texcoord_v: default_flip_v(),
            split_by_material: default_split_by_material(),
            reserve_capacity: default_reserve(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target_size: default_target_size(),
            auto_texture_folder: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

/// 命令行中与模型相关的参数
///
/// 这些值不属于持久化配置，只在本次运行中覆盖场景配置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelArgs {
    /// 第一个非选项参数，作为模型路径
    pub model_path: Option<String>,
    /// `--mtl <path>`
    pub mtl_path: Option<String>,
    /// `--textures <dir>`
    pub texture_folder: Option<String>,
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--no-flip-v`: 不翻转纹理坐标的 V 分量
    /// - `--single-mesh`: 不按材质拆分网格
    /// - `--log <level>`: 覆盖日志级别
    /// - `--mtl <path>` / `--textures <dir>` / 模型路径：通过返回值交给调用者
    ///
    /// 第一个参数视为程序名，会被跳过。
    pub fn apply_args<I>(&mut self, args: I) -> ModelArgs
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut model_args = ModelArgs::default();

        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--no-flip-v" => self.loader.flip_texcoord_v = false,
                "--single-mesh" => self.loader.split_by_material = false,
                "--log" => {
                    if let Some(level) = iter.next().and_then(|s| LogLevel::parse(s)) {
                        self.logging.level = level;
                    }
                }
                "--mtl" => model_args.mtl_path = iter.next().cloned(),
                "--textures" => model_args.texture_folder = iter.next().cloned(),
                other if !other.starts_with("--") && model_args.model_path.is_none() => {
                    model_args.model_path = Some(other.to_string());
                }
                _ => {}
            }
        }

        model_args
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.loader.progress_interval_lines == 0 {
            return Err(ConfigError::InvalidValue {
                field: "loader.progress_interval_lines".to_string(),
                reason: "Progress interval must be greater than 0".to_string(),
            }.into());
        }

        if !(0.0..=1.0).contains(&self.loader.scan_progress_share) {
            return Err(ConfigError::InvalidValue {
                field: "loader.scan_progress_share".to_string(),
                reason: "Scan share must be within [0, 1]".to_string(),
            }.into());
        }

        if !(self.viewer.target_size > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "viewer.target_size".to_string(),
                reason: "Target size must be greater than 0".to_string(),
            }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.loader.progress_interval_lines, 10_000);
        assert_eq!(config.loader.scan_progress_share, 0.8);
        assert!(config.loader.flip_texcoord_v);
        assert!(config.loader.split_by_material);
        assert_eq!(config.viewer.target_size, 2.0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.loader.progress_interval_lines = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.loader.scan_progress_share = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.viewer.target_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[loader]\nflip_texcoord_v = false\n").unwrap();
        assert!(!config.loader.flip_texcoord_v);
        assert_eq!(config.loader.progress_interval_lines, 10_000);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let args = config.apply_args([
            "model_viewer",
            "assets/cube.obj",
            "--mtl",
            "assets/cube.mtl",
            "--no-flip-v",
            "--single-mesh",
            "--log",
            "debug",
        ]);

        assert_eq!(args.model_path.as_deref(), Some("assets/cube.obj"));
        assert_eq!(args.mtl_path.as_deref(), Some("assets/cube.mtl"));
        assert!(args.texture_folder.is_none());
        assert!(!config.loader.flip_texcoord_v);
        assert!(!config.loader.split_by_material);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.viewer.target_size = 4.0;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.viewer.target_size, 4.0);
    }
}
