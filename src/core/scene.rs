//! 场景配置模块
//!
//! 定义要查看的模型（OBJ 路径、可选的 MTL 与纹理目录）及其变换。

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::fs;
use crate::core::config::ModelArgs;
use crate::core::error::{Result, ViewerError, ConfigError};
use crate::core::math::{Vector3, Matrix4, DEG_TO_RAD};

/// 3D 变换数据
///
/// 包含位置、旋转和缩放信息。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// 位置 (x, y, z)
    #[serde(default = "default_position")]
    pub position: [f32; 3],

    /// 旋转（欧拉角，度数）(pitch, yaw, roll)
    #[serde(default = "default_rotation")]
    pub rotation: [f32; 3],

    /// 缩放 (x, y, z)
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

fn default_position() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_rotation() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: default_position(),
            rotation: default_rotation(),
            scale: default_scale(),
        }
    }
}

impl Transform {
    /// 创建模型矩阵
    ///
    /// 变换顺序：缩放 -> 旋转 -> 平移
    pub fn to_matrix(&self) -> Matrix4 {
        let pitch = self.rotation[0] * DEG_TO_RAD;
        let yaw = self.rotation[1] * DEG_TO_RAD;
        let roll = self.rotation[2] * DEG_TO_RAD;

        let translation = Matrix4::new_translation(&Vector3::new(
            self.position[0],
            self.position[1],
            self.position[2],
        ));

        let rotation_x = Matrix4::from_axis_angle(&Vector3::x_axis(), pitch);
        let rotation_y = Matrix4::from_axis_angle(&Vector3::y_axis(), yaw);
        let rotation_z = Matrix4::from_axis_angle(&Vector3::z_axis(), roll);
        let rotation = rotation_z * rotation_y * rotation_x;

        let scale = Matrix4::new_nonuniform_scaling(&Vector3::new(
            self.scale[0],
            self.scale[1],
            self.scale[2],
        ));

        // 组合：T * R * S
        translation * rotation * scale
    }
}

/// 模型配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 模型文件路径
    pub path: String,

    /// MTL 材质文件路径（仅 OBJ）
    #[serde(default)]
    pub mtl_path: Option<String>,

    /// 额外纹理目录，加载后自动扫描并绑定到所有网格
    #[serde(default)]
    pub texture_folder: Option<String>,

    /// 用户指定的模型变换，叠加在自动适配变换之后
    #[serde(default)]
    pub transform: Transform,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "assets/models/sphere.obj".to_string(),
            mtl_path: None,
            texture_folder: None,
            transform: Transform::default(),
        }
    }
}

/// 场景配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    /// 模型配置
    #[serde(default)]
    pub model: ModelConfig,
}

impl SceneConfig {
    /// 从文件加载场景配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ViewerError::Config(ConfigError::FileNotFound(format!(
                "Failed to read scene config file '{}': {}",
                path.display(),
                e
            ))))?;

        toml::from_str(&contents)
            .map_err(|e| ViewerError::Config(ConfigError::ParseError(format!(
                "Failed to parse scene config: {}",
                e
            ))))
    }

    /// 从文件加载，如果文件不存在则返回默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded scene config from: {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load scene config: {}, using defaults", e);
                    Self::default()
                }
            }
        } else {
            tracing::info!("Scene config not found, using defaults");
            Self::default()
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::Config(ConfigError::ParseError(format!(
                "Failed to serialize scene config: {}",
                e
            ))))?;

        fs::write(path, contents)?;

        tracing::info!("Saved scene config to: {}", path.display());
        Ok(())
    }

    /// 用命令行参数覆盖模型设置
    ///
    /// 命令行给出新的模型路径时，配置文件里的 MTL 与纹理目录不再适用，一并清除。
    pub fn apply_model_args(&mut self, args: &ModelArgs) {
        if let Some(path) = &args.model_path {
            self.model.path = path.clone();
            self.model.mtl_path = None;
            self.model.texture_folder = None;
        }
        if let Some(mtl) = &args.mtl_path {
            self.model.mtl_path = Some(mtl.clone());
        }
        if let Some(folder) = &args.texture_folder {
            self.model.texture_folder = Some(folder.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transform() {
        let transform = Transform::default();
        assert_eq!(transform.position, [0.0, 0.0, 0.0]);
        assert_eq!(transform.rotation, [0.0, 0.0, 0.0]);
        assert_eq!(transform.scale, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_transform_to_matrix() {
        let transform = Transform {
            position: [1.0, 2.0, 3.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [2.0, 2.0, 2.0],
        };
        let matrix = transform.to_matrix();

        assert!((matrix[(0, 3)] - 1.0).abs() < 0.001);
        assert!((matrix[(1, 3)] - 2.0).abs() < 0.001);
        assert!((matrix[(2, 3)] - 3.0).abs() < 0.001);
        assert!((matrix[(0, 0)] - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_default_scene() {
        let scene = SceneConfig::default();
        assert_eq!(scene.model.path, "assets/models/sphere.obj");
        assert!(scene.model.mtl_path.is_none());
    }

    #[test]
    fn test_scene_from_toml() {
        let scene: SceneConfig = toml::from_str(
            "[model]\npath = \"car.obj\"\nmtl_path = \"car.mtl\"\n",
        )
        .unwrap();
        assert_eq!(scene.model.path, "car.obj");
        assert_eq!(scene.model.mtl_path.as_deref(), Some("car.mtl"));
        assert_eq!(scene.model.transform, Transform::default());
    }

    #[test]
    fn test_apply_model_args() {
        let mut scene = SceneConfig::default();
        scene.model.mtl_path = Some("old.mtl".to_string());

        scene.apply_model_args(&ModelArgs {
            model_path: Some("new.obj".to_string()),
            mtl_path: None,
            texture_folder: Some("tex".to_string()),
        });

        assert_eq!(scene.model.path, "new.obj");
        assert!(scene.model.mtl_path.is_none());
        assert_eq!(scene.model.texture_folder.as_deref(), Some("tex"));
    }
}
