//! 纹理模块
//!
//! 加载管线不直接接触 GPU：纹理通过 [`TextureUploader`] 交给渲染协作方，
//! 协作方返回一个非零句柄，失败时返回 0。
//!
//! - `store`：基于 `image` crate 的 CPU 侧上传器实现
//! - `binder`：把材质中的纹理文件名解析为 [`TextureRef`]

pub mod binder;
pub mod store;

use std::path::Path;

pub use crate::geometry::material::TextureKind;
pub use binder::TextureBinder;
pub use store::{DecodedTexture, ImageTextureStore};

/// 纹理句柄，0 表示无效
pub type TextureHandle = u32;

/// 支持的图片扩展名（小写）
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "tga", "bmp", "hdr", "dds", "tiff", "exr",
];

/// 已上传纹理的引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRef {
    /// 上传协作方返回的句柄（非零）
    pub id: TextureHandle,
    /// 语义类型
    pub kind: TextureKind,
    /// 上传时使用的路径
    pub path: String,
}

impl TextureRef {
    pub fn new(id: TextureHandle, kind: TextureKind, path: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            path: path.into(),
        }
    }
}

/// 纹理上传协作方
///
/// 成功返回非零句柄，失败返回 0。调用方不会重试失败的上传。
pub trait TextureUploader {
    fn upload_texture(&mut self, path: &Path) -> TextureHandle;
}

impl<F> TextureUploader for F
where
    F: FnMut(&Path) -> TextureHandle,
{
    fn upload_texture(&mut self, path: &Path) -> TextureHandle {
        self(path)
    }
}

/// 按扩展名判断是否为图片文件（不区分大小写）
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let ext = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
