/// 模型加载器模块
///
/// 提供统一的模型加载接口和 OBJ/MTL 的具体实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（内置的快速行式解析器）
/// - **MTL**: OBJ 配套的材质库
///
/// 其他格式通过实现 [`MeshLoader`] 的外部导入器注册到 [`crate::model::ModelLoader`]。
///
/// # 使用示例
///
/// ```rust,no_run
/// use model_viewer::core::LoaderConfig;
/// use model_viewer::geometry::loaders::ObjLoader;
/// use model_viewer::texture::ImageTextureStore;
/// use std::path::Path;
///
/// let mut loader = ObjLoader::new(LoaderConfig::default());
/// let mut textures = ImageTextureStore::new();
/// let meshes = loader.load_obj(Path::new("model.obj"), None, &mut textures)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::Result;
use crate::geometry::mesh::Mesh;
use crate::texture::TextureUploader;
use std::io::{self, BufRead};
use std::path::Path;

pub mod mtl_loader;
pub mod obj_loader;

// 重新导出加载器
pub use mtl_loader::{load_mtl, parse_mtl};
pub use obj_loader::ObjLoader;

/// 网格加载器 trait
///
/// 所有格式的加载器都实现此 trait，模型层据此按扩展名分派。
///
/// # 实现要求
///
/// - 返回 CPU 侧的 [`Mesh`]，纹理只通过 `textures` 上传，不直接接触 GPU
/// - 加载器实例可以复用，但每次加载之间不得残留状态
///
/// # 示例实现
///
/// ```rust,ignore
/// use model_viewer::geometry::loaders::MeshLoader;
///
/// pub struct PlyLoader;
///
/// impl MeshLoader for PlyLoader {
///     fn load_from_file(&mut self, path: &Path, textures: &mut dyn TextureUploader) -> Result<Vec<Mesh>> {
///         todo!()
///     }
///
///     fn supported_extensions(&self) -> &'static [&'static str] {
///         &["ply"]
///     }
/// }
/// ```
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 返回
    ///
    /// - `Ok(meshes)`: 加载完成（可能为空）
    /// - `Err(ViewerError)`: 加载失败
    fn load_from_file(
        &mut self,
        path: &Path,
        textures: &mut dyn TextureUploader,
    ) -> Result<Vec<Mesh>>;

    /// 支持的扩展名数组（小写，不含点号）
    fn supported_extensions(&self) -> &'static [&'static str];

    /// 是否能处理该路径（按扩展名，不区分大小写）
    fn supports(&self, path: &Path) -> bool {
        extension_of(path)
            .map(|ext| self.supported_extensions().contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

/// 小写扩展名
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// 是否为 OBJ 文件（扩展名不区分大小写）
pub fn is_obj_path(path: &Path) -> bool {
    extension_of(path).as_deref() == Some("obj")
}

/// 拆出行首指令与其后的剩余部分
///
/// 空行与注释行返回 `None`。剩余部分保留指令后的原始空白。
pub(crate) fn split_directive(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let end = line.find(char::is_whitespace).unwrap_or(line.len());
    Some((&line[..end], &line[end..]))
}

/// 逐行读取，回调参数为去掉换行符的行内容与该行占用的字节数
///
/// 非 UTF-8 字节按替换字符处理，不会中断读取。
pub(crate) fn for_each_line<R, F>(mut reader: R, mut f: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(&str, u64),
{
    let mut buf = Vec::with_capacity(256);
    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(());
        }

        let mut end = buf.len();
        while end > 0 && matches!(buf[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        let line = String::from_utf8_lossy(&buf[..end]);
        f(&line, read as u64);
    }
}
