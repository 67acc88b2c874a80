/// CPU 侧纹理存储
///
/// [`TextureUploader`] 的默认实现：用 `image` crate 解码图片并保存像素，
/// 按路径缓存，同一路径只解码一次。渲染后端可以从这里取像素数据上传到显存。

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use super::{TextureHandle, TextureUploader};

/// 解码后的纹理
#[derive(Debug, Clone)]
pub struct DecodedTexture {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// 每像素通道数（1、2、3 或 4）
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedTexture {
    fn from_image(path: PathBuf, image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (channels, pixels) = match image.color().channel_count() {
            1 => (1, image.into_luma8().into_raw()),
            2 => (2, image.into_luma_alpha8().into_raw()),
            3 => (3, image.into_rgb8().into_raw()),
            _ => (4, image.into_rgba8().into_raw()),
        };

        Self {
            path,
            width,
            height,
            channels,
            pixels,
        }
    }
}

/// 基于 `image` 的纹理存储
///
/// 句柄从 1 开始分配，0 表示解码失败。
#[derive(Debug, Default)]
pub struct ImageTextureStore {
    textures: Vec<DecodedTexture>,
    by_path: HashMap<PathBuf, TextureHandle>,
}

impl ImageTextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按句柄取纹理
    pub fn get(&self, handle: TextureHandle) -> Option<&DecodedTexture> {
        if handle == 0 {
            return None;
        }
        self.textures.get(handle as usize - 1)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// 释放所有纹理，之后分配的句柄重新从 1 开始
    pub fn clear(&mut self) {
        self.textures.clear();
        self.by_path.clear();
    }
}

impl TextureUploader for ImageTextureStore {
    fn upload_texture(&mut self, path: &Path) -> TextureHandle {
        if let Some(&handle) = self.by_path.get(path) {
            return handle;
        }

        match image::open(path) {
            Ok(image) => {
                let texture = DecodedTexture::from_image(path.to_path_buf(), image);
                tracing::debug!(
                    path = %path.display(),
                    width = texture.width,
                    height = texture.height,
                    channels = texture.channels,
                    "Texture decoded"
                );
                self.textures.push(texture);
                let handle = self.textures.len() as TextureHandle;
                self.by_path.insert(path.to_path_buf(), handle);
                handle
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Texture failed to load");
                0
            }
        }
    }
}
