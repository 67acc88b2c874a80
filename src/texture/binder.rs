/// 材质纹理绑定
///
/// 把材质记录中的纹理文件名拼接到模型目录下，交给上传协作方，
/// 并用语义类型包装返回的句柄。

use std::path::{Path, PathBuf};

use super::{TextureRef, TextureUploader};
use crate::geometry::material::{find_material, MaterialRecord};

/// 纹理绑定器
#[derive(Debug, Clone, Default)]
pub struct TextureBinder {
    directory: PathBuf,
}

impl TextureBinder {
    /// 以 `directory` 作为纹理文件名的基准目录
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// 解析指定材质的所有纹理
    ///
    /// 材质不存在时返回空列表；上传失败（句柄为 0）的纹理被跳过，不会重试。
    pub fn resolve(
        &self,
        material_name: &str,
        materials: &[MaterialRecord],
        uploader: &mut dyn TextureUploader,
    ) -> Vec<TextureRef> {
        match find_material(materials, material_name) {
            Some(material) => self.resolve_record(material, uploader),
            None => Vec::new(),
        }
    }

    /// 解析一条材质记录的所有纹理
    pub fn resolve_record(
        &self,
        material: &MaterialRecord,
        uploader: &mut dyn TextureUploader,
    ) -> Vec<TextureRef> {
        material
            .textures()
            .filter_map(|(kind, filename)| {
                let path = self.directory.join(filename);
                match uploader.upload_texture(&path) {
                    0 => {
                        tracing::warn!(
                            material = %material.name,
                            kind = %kind,
                            path = %path.display(),
                            "Skipping texture that failed to upload"
                        );
                        None
                    }
                    id => Some(TextureRef::new(id, kind, path.to_string_lossy())),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::material::TextureKind;

    fn brick() -> MaterialRecord {
        let mut mat = MaterialRecord::named("brick");
        mat.diffuse_texture = Some("brick diffuse.png".to_string());
        mat.normal_texture = Some("brick_n.png".to_string());
        mat.specular_texture = Some("missing.png".to_string());
        mat
    }

    #[test]
    fn test_resolve_joins_directory_and_skips_failures() {
        let binder = TextureBinder::new("models/house");
        let mut uploaded = Vec::new();
        let mut uploader = |path: &Path| {
            uploaded.push(path.to_path_buf());
            if path.ends_with("missing.png") { 0 } else { uploaded.len() as u32 }
        };

        let refs = binder.resolve("brick", &[brick()], &mut uploader);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind, TextureKind::Diffuse);
        assert_eq!(
            Path::new(&refs[0].path),
            Path::new("models/house").join("brick diffuse.png")
        );
        assert_eq!(refs[1].kind, TextureKind::Normal);
        assert_eq!(uploaded.len(), 3);
    }

    #[test]
    fn test_unknown_material_yields_nothing() {
        let binder = TextureBinder::new("models");
        let mut uploader = |_: &Path| -> u32 { panic!("should not upload") };
        assert!(binder.resolve("nope", &[brick()], &mut uploader).is_empty());
    }
}
