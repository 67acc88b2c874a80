//! 模型层
//!
//! 在网格加载之上记录模型的来源（路径、目录、是否为 OBJ、是否附加了 MTL），
//! 计算包围盒与推荐缩放，并管理用户追加的自定义纹理。
//!
//! # 格式分派
//!
//! `.obj`（不区分大小写）走内置的 [`ObjLoader`]；其他扩展名交给通过
//! [`ModelLoader::register`] 注册的外部 [`MeshLoader`]，没有对应导入器时报
//! `UnsupportedFormat`。
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use model_viewer::core::Config;
//! use model_viewer::model::ModelLoader;
//! use model_viewer::texture::ImageTextureStore;
//!
//! let config = Config::default();
//! let mut loader = ModelLoader::new(&config);
//! let mut textures = ImageTextureStore::new();
//!
//! let model = loader.load("assets/models/house.obj", None, &mut textures)?;
//! println!("{} 个网格，推荐缩放 {}", model.meshes().len(), model.recommended_scale());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::error::{MeshLoadError, Result, TextureError};
use crate::core::math::{vec3_from, Matrix4, Vector3};
use crate::core::scene::Transform;
use crate::geometry::loaders::{is_obj_path, MeshLoader, ObjLoader};
use crate::geometry::material::TextureKind;
use crate::geometry::mesh::Mesh;
use crate::geometry::progress::LoadProgress;
use crate::texture::{is_image_file, TextureRef, TextureUploader};

/// 模型包围盒与推荐缩放
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub min: Vector3,
    pub max: Vector3,
    pub center: Vector3,
    pub size: Vector3,
    /// 使最长边等于目标尺寸的统一缩放；包围盒退化时为 1.0
    pub recommended_scale: f32,
}

impl ModelBounds {
    /// 统计所有网格顶点的包围盒
    ///
    /// 没有任何顶点时返回 `None`。
    pub fn from_meshes(meshes: &[Mesh], target_size: f32) -> Option<Self> {
        let mut positions = meshes
            .iter()
            .flat_map(|mesh| mesh.vertices().iter().map(|v| vec3_from(v.position)));

        let first = positions.next()?;
        let (min, max) = positions.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));

        let center = (min + max) * 0.5;
        let size = max - min;
        let max_dimension = size.max();
        let recommended_scale = if max_dimension > 0.0 {
            target_size / max_dimension
        } else {
            1.0
        };

        Some(Self {
            min,
            max,
            center,
            size,
            recommended_scale,
        })
    }

    /// 最长边长度
    pub fn max_dimension(&self) -> f32 {
        self.size.max()
    }

    /// 把模型中心移到原点并按推荐缩放的变换
    pub fn fit_transform(&self) -> Matrix4 {
        Matrix4::new_scaling(self.recommended_scale) * Matrix4::new_translation(&-self.center)
    }
}

/// 已加载的模型
#[derive(Debug)]
pub struct Model {
    meshes: Vec<Mesh>,
    path: PathBuf,
    directory: PathBuf,
    is_obj: bool,
    has_mtl: bool,
    uv_flipped: bool,
    target_size: f32,
    bounds: Option<ModelBounds>,
    custom_textures: BTreeMap<TextureKind, Vec<TextureRef>>,
}

impl Model {
    /// 由已加载的网格构建模型并计算包围盒
    pub fn from_meshes(
        path: impl Into<PathBuf>,
        meshes: Vec<Mesh>,
        has_mtl: bool,
        target_size: f32,
    ) -> Self {
        let path = path.into();
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let bounds = ModelBounds::from_meshes(&meshes, target_size);

        if let Some(b) = &bounds {
            tracing::info!(
                min = ?b.min.as_slice(),
                max = ?b.max.as_slice(),
                center = ?b.center.as_slice(),
                recommended_scale = b.recommended_scale,
                "Model bounds calculated"
            );
        }

        Self {
            is_obj: is_obj_path(&path),
            meshes,
            path,
            directory,
            has_mtl,
            uv_flipped: false,
            target_size,
            bounds,
            custom_textures: BTreeMap::new(),
        }
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 模型文件所在目录
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn is_obj(&self) -> bool {
        self.is_obj
    }

    pub fn has_mtl(&self) -> bool {
        self.has_mtl
    }

    pub fn is_uv_flipped(&self) -> bool {
        self.uv_flipped
    }

    pub fn bounds(&self) -> Option<&ModelBounds> {
        self.bounds.as_ref()
    }

    pub fn recommended_scale(&self) -> f32 {
        self.bounds.map(|b| b.recommended_scale).unwrap_or(1.0)
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.data.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.data.triangle_count()).sum()
    }

    /// 居中并缩放到目标尺寸的变换
    pub fn fit_transform(&self) -> Matrix4 {
        self.bounds
            .map(|b| b.fit_transform())
            .unwrap_or_else(Matrix4::identity)
    }

    /// 最终模型矩阵：用户变换叠加在自动适配变换之后
    pub fn model_matrix(&self, transform: &Transform) -> Matrix4 {
        transform.to_matrix() * self.fit_transform()
    }

    /// 重新计算包围盒
    pub fn recalculate_bounds(&mut self) {
        self.bounds = ModelBounds::from_meshes(&self.meshes, self.target_size);
    }

    /// 翻转所有网格的纹理坐标 V 分量，并切换翻转标记
    pub fn flip_uv_coordinates(&mut self) {
        for mesh in &mut self.meshes {
            mesh.data.flip_texcoords_v();
        }
        self.uv_flipped = !self.uv_flipped;
        tracing::info!(flipped = self.uv_flipped, "UV coordinates flipped");
    }

    /// 用新的 MTL 文件重新加载模型
    ///
    /// 只适用于 OBJ 模型；路径为空时什么也不做。重新加载会清除自定义纹理。
    pub fn load_material_file(
        &mut self,
        loader: &mut ModelLoader,
        mtl_path: &Path,
        textures: &mut dyn TextureUploader,
    ) -> Result<()> {
        if !self.is_obj {
            return Err(MeshLoadError::NotObjModel(self.path.clone()).into());
        }
        if mtl_path.as_os_str().is_empty() {
            tracing::info!("No MTL file path provided");
            return Ok(());
        }

        self.clear_custom_textures();
        let path = self.path.clone();
        *self = loader.load(&path, Some(mtl_path), textures)?;

        tracing::info!(path = %mtl_path.display(), "MTL file loaded");
        Ok(())
    }

    /// 某类型的自定义纹理
    pub fn custom_textures(&self, kind: TextureKind) -> &[TextureRef] {
        self.custom_textures
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 清除自定义纹理登记（已绑定到网格上的纹理保持不变）
    pub fn clear_custom_textures(&mut self) {
        self.custom_textures.clear();
    }

    /// 上传一张自定义纹理，替换所有网格上同类型的纹理
    ///
    /// 扩展名不是图片格式时返回 `NotAnImage`，上传器返回空句柄时返回 `UploadFailed`。
    pub fn add_custom_texture(
        &mut self,
        path: &Path,
        kind: TextureKind,
        textures: &mut dyn TextureUploader,
    ) -> Result<TextureRef> {
        if !is_image_file(path) {
            return Err(TextureError::NotAnImage(path.to_path_buf()).into());
        }
        let id = textures.upload_texture(path);
        if id == 0 {
            return Err(TextureError::UploadFailed(path.to_path_buf()).into());
        }

        let texture = TextureRef::new(id, kind, path.to_string_lossy());
        self.register_custom(&texture);
        for mesh in &mut self.meshes {
            mesh.replace_texture(texture.clone());
        }
        Ok(texture)
    }

    /// 扫描目录中的图片并按文件名推断类型，追加到所有网格
    ///
    /// 先清除已有的自定义纹理。上传失败的图片被跳过。返回成功加载的数量。
    pub fn load_textures_from_folder(
        &mut self,
        folder: &Path,
        textures: &mut dyn TextureUploader,
    ) -> Result<usize> {
        self.clear_custom_textures();

        if !folder.is_dir() {
            return Err(TextureError::FolderNotFound(folder.to_path_buf()).into());
        }
        tracing::info!(folder = %folder.display(), "Scanning folder for textures");

        let mut images: Vec<PathBuf> = fs::read_dir(folder)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_image_file(path))
            .collect();
        images.sort();

        let mut loaded = 0;
        for path in images {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let kind = TextureKind::from_filename(&filename);

            let id = textures.upload_texture(&path);
            if id == 0 {
                tracing::warn!(path = %path.display(), "Skipping texture that failed to upload");
                continue;
            }

            let texture = TextureRef::new(id, kind, path.to_string_lossy());
            self.register_custom(&texture);
            for mesh in &mut self.meshes {
                mesh.textures.push(texture.clone());
            }
            loaded += 1;
            tracing::info!(kind = %kind, file = %filename, "Custom texture loaded");
        }

        tracing::info!(count = loaded, "Auto-loaded textures from folder");
        Ok(loaded)
    }

    /// 登记自定义纹理；漫反射纹理同时登记为基础色
    fn register_custom(&mut self, texture: &TextureRef) {
        self.custom_textures
            .entry(texture.kind)
            .or_default()
            .push(texture.clone());

        if texture.kind == TextureKind::Diffuse {
            let base_color = TextureRef::new(texture.id, TextureKind::BaseColor, texture.path.clone());
            self.custom_textures
                .entry(TextureKind::BaseColor)
                .or_default()
                .push(base_color);
        }
    }
}

/// 模型加载器
///
/// 持有一个复用的 [`ObjLoader`]、外部导入器列表与共享的加载进度。
pub struct ModelLoader {
    obj: ObjLoader,
    importers: Vec<Box<dyn MeshLoader>>,
    target_size: f32,
    progress: LoadProgress,
}

impl ModelLoader {
    pub fn new(config: &Config) -> Self {
        let progress = LoadProgress::new();
        let mut obj = ObjLoader::new(config.loader.clone());
        obj.set_progress_callback(progress.callback());

        Self {
            obj,
            importers: Vec::new(),
            target_size: config.viewer.target_size,
            progress,
        }
    }

    /// 注册处理非 OBJ 格式的外部导入器
    pub fn register(&mut self, importer: Box<dyn MeshLoader>) {
        tracing::debug!(extensions = ?importer.supported_extensions(), "Importer registered");
        self.importers.push(importer);
    }

    /// 可在其他线程轮询的加载进度
    pub fn progress(&self) -> LoadProgress {
        self.progress.clone()
    }

    /// 加载模型
    ///
    /// # 错误
    ///
    /// - 文件不存在、无法打开或无法读取：`FileNotFound`
    /// - 没有能处理该扩展名的导入器：`UnsupportedFormat`
    /// - 外部导入器返回的网格索引无效：`InvalidGeometry`
    /// - 加载完成但没有产生任何网格：`EmptyModel`
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        mtl_path: Option<&Path>,
        textures: &mut dyn TextureUploader,
    ) -> Result<Model> {
        let path = path.as_ref();
        let _span = crate::load_span!("load_model", path = %path.display()).entered();

        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        self.progress.begin();
        let result = self.import(path, mtl_path, textures);
        self.progress.finish(result.is_ok());

        let meshes = result.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to load model");
            e
        })?;

        let has_mtl = is_obj_path(path) && mtl_path.map_or(false, |p| !p.as_os_str().is_empty());
        tracing::info!(
            path = %path.display(),
            meshes = meshes.len(),
            with_mtl = has_mtl,
            "Model loaded"
        );
        Ok(Model::from_meshes(path, meshes, has_mtl, self.target_size))
    }

    fn import(
        &mut self,
        path: &Path,
        mtl_path: Option<&Path>,
        textures: &mut dyn TextureUploader,
    ) -> Result<Vec<Mesh>> {
        let meshes = if is_obj_path(path) {
            self.obj.try_load_obj(path, mtl_path, textures)?
        } else {
            let importer = self
                .importers
                .iter_mut()
                .find(|importer| importer.supports(path))
                .ok_or_else(|| {
                    MeshLoadError::UnsupportedFormat(format!("不支持的文件格式: {}", path.display()))
                })?;
            let meshes = importer.load_from_file(path, textures)?;
            for mesh in &meshes {
                mesh.data.validate()?;
            }
            meshes
        };

        if meshes.is_empty() {
            return Err(MeshLoadError::EmptyModel(path.to_path_buf()).into());
        }
        Ok(meshes)
    }
}

impl std::fmt::Debug for ModelLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelLoader")
            .field("obj", &self.obj)
            .field("importers", &self.importers.len())
            .field("target_size", &self.target_size)
            .finish()
    }
}
