/// 材质数据模块
///
/// 定义从 MTL 文件解析出的材质记录，以及纹理的语义类型。

use std::fmt;

/// 纹理的语义类型
///
/// 替代字符串形式的类型名，渲染协作方通过 [`TextureKind::uniform_name`]
/// 取得着色器中的采样器名前缀。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureKind {
    Diffuse,
    Specular,
    Normal,
    Height,
    Emission,
    Roughness,
    Metallic,
    Ao,
    Opacity,
    /// PBR 基础色，自定义漫反射纹理会同时登记为基础色
    BaseColor,
}

impl TextureKind {
    /// 材质记录中可以出现的纹理类型（按绑定顺序）
    pub const MATERIAL_SLOTS: [TextureKind; 9] = [
        TextureKind::Diffuse,
        TextureKind::Specular,
        TextureKind::Normal,
        TextureKind::Height,
        TextureKind::Emission,
        TextureKind::Roughness,
        TextureKind::Metallic,
        TextureKind::Ao,
        TextureKind::Opacity,
    ];

    /// 着色器中的采样器名前缀
    pub fn uniform_name(self) -> &'static str {
        match self {
            TextureKind::Diffuse => "texture_diffuse",
            TextureKind::Specular => "texture_specular",
            TextureKind::Normal => "texture_normal",
            TextureKind::Height => "texture_height",
            TextureKind::Emission => "texture_emission",
            TextureKind::Roughness => "texture_roughness",
            TextureKind::Metallic => "texture_metallic",
            TextureKind::Ao => "texture_ao",
            TextureKind::Opacity => "texture_opacity",
            TextureKind::BaseColor => "texture_basecolor",
        }
    }

    /// 根据文件名推断纹理类型
    ///
    /// 去掉扩展名后按常见命名做子串匹配，按 漫反射 → 法线 → 高光 → 粗糙度 →
    /// 金属度 → 高度 → 自发光 → AO 的顺序取第一个命中；都不命中时视为漫反射。
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        let stem = match lower.rfind('.') {
            Some(dot) => &lower[..dot],
            None => lower.as_str(),
        };

        const PATTERNS: [(TextureKind, &[&str]); 8] = [
            (TextureKind::Diffuse, &["diffuse", "diff", "albedo", "basecolor", "base_color", "color"]),
            (TextureKind::Normal, &["normal", "norm", "nrm"]),
            (TextureKind::Specular, &["specular", "spec"]),
            (TextureKind::Roughness, &["roughness", "rough"]),
            (TextureKind::Metallic, &["metallic", "metal", "met"]),
            (TextureKind::Height, &["height", "displacement", "disp", "bump"]),
            (TextureKind::Emission, &["emission", "emissive", "emit", "glow"]),
            (TextureKind::Ao, &["ao", "ambient", "occlusion"]),
        ];

        PATTERNS
            .iter()
            .find(|(_, needles)| needles.iter().any(|n| stem.contains(n)))
            .map(|(kind, _)| *kind)
            .unwrap_or(TextureKind::Diffuse)
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uniform_name())
    }
}

/// 材质记录
///
/// 由 MTL 文件的一个 `newmtl` 块构建，构建完成后只读。
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRecord {
    /// 材质名（唯一键）
    pub name: String,

    /// 环境光颜色 (Ka)
    pub ambient: [f32; 3],
    /// 漫反射颜色 (Kd)
    pub diffuse: [f32; 3],
    /// 高光颜色 (Ks)
    pub specular: [f32; 3],
    /// 自发光颜色 (Ke)
    pub emission: [f32; 3],

    /// 高光指数 (Ns)
    pub shininess: f32,
    /// 不透明度 (d，或 1 - Tr)
    pub opacity: f32,
    /// 折射率 (Ni)
    pub refraction: f32,
    /// 粗糙度 (Pr)
    pub roughness: f32,
    /// 金属度 (Pm)
    pub metallic: f32,

    pub diffuse_texture: Option<String>,
    pub specular_texture: Option<String>,
    pub normal_texture: Option<String>,
    pub height_texture: Option<String>,
    pub emission_texture: Option<String>,
    pub roughness_texture: Option<String>,
    pub metallic_texture: Option<String>,
    pub ao_texture: Option<String>,
    pub opacity_texture: Option<String>,
}

impl Default for MaterialRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.8, 0.8, 0.8],
            specular: [1.0, 1.0, 1.0],
            emission: [0.0, 0.0, 0.0],
            shininess: 32.0,
            opacity: 1.0,
            refraction: 1.0,
            roughness: 0.5,
            metallic: 0.0,
            diffuse_texture: None,
            specular_texture: None,
            normal_texture: None,
            height_texture: None,
            emission_texture: None,
            roughness_texture: None,
            metallic_texture: None,
            ao_texture: None,
            opacity_texture: None,
        }
    }
}

impl MaterialRecord {
    /// 创建一个带名称、其余为默认值的材质
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 指定类型的纹理文件名
    pub fn texture(&self, kind: TextureKind) -> Option<&str> {
        match kind {
            TextureKind::Diffuse => self.diffuse_texture.as_deref(),
            TextureKind::Specular => self.specular_texture.as_deref(),
            TextureKind::Normal => self.normal_texture.as_deref(),
            TextureKind::Height => self.height_texture.as_deref(),
            TextureKind::Emission => self.emission_texture.as_deref(),
            TextureKind::Roughness => self.roughness_texture.as_deref(),
            TextureKind::Metallic => self.metallic_texture.as_deref(),
            TextureKind::Ao => self.ao_texture.as_deref(),
            TextureKind::Opacity => self.opacity_texture.as_deref(),
            TextureKind::BaseColor => None,
        }
    }

    /// 指定类型的纹理槽位（基础色没有 MTL 指令，返回 `None`）
    pub fn texture_slot_mut(&mut self, kind: TextureKind) -> Option<&mut Option<String>> {
        match kind {
            TextureKind::Diffuse => Some(&mut self.diffuse_texture),
            TextureKind::Specular => Some(&mut self.specular_texture),
            TextureKind::Normal => Some(&mut self.normal_texture),
            TextureKind::Height => Some(&mut self.height_texture),
            TextureKind::Emission => Some(&mut self.emission_texture),
            TextureKind::Roughness => Some(&mut self.roughness_texture),
            TextureKind::Metallic => Some(&mut self.metallic_texture),
            TextureKind::Ao => Some(&mut self.ao_texture),
            TextureKind::Opacity => Some(&mut self.opacity_texture),
            TextureKind::BaseColor => None,
        }
    }

    /// 所有非空纹理（按 [`TextureKind::MATERIAL_SLOTS`] 顺序）
    pub fn textures(&self) -> impl Iterator<Item = (TextureKind, &str)> + '_ {
        TextureKind::MATERIAL_SLOTS
            .iter()
            .filter_map(move |&kind| {
                self.texture(kind)
                    .filter(|name| !name.is_empty())
                    .map(|name| (kind, name))
            })
    }
}

/// 在材质列表中按名称查找
///
/// 材质数量通常只有几十个，线性查找即可。
pub fn find_material<'a>(materials: &'a [MaterialRecord], name: &str) -> Option<&'a MaterialRecord> {
    materials.iter().find(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_defaults() {
        let mat = MaterialRecord::named("Foo");
        assert_eq!(mat.name, "Foo");
        assert_eq!(mat.diffuse, [0.8, 0.8, 0.8]);
        assert_eq!(mat.shininess, 32.0);
        assert_eq!(mat.opacity, 1.0);
        assert_eq!(mat.textures().count(), 0);
    }

    #[test]
    fn test_textures_iteration_order() {
        let mut mat = MaterialRecord::named("Foo");
        mat.normal_texture = Some("n.png".to_string());
        mat.diffuse_texture = Some("d.png".to_string());
        mat.ao_texture = Some(String::new());

        let textures: Vec<_> = mat.textures().collect();
        assert_eq!(
            textures,
            vec![(TextureKind::Diffuse, "d.png"), (TextureKind::Normal, "n.png")]
        );
    }

    #[test]
    fn test_texture_kind_from_filename() {
        assert_eq!(TextureKind::from_filename("Brick_Albedo.png"), TextureKind::Diffuse);
        assert_eq!(TextureKind::from_filename("brick_nrm.jpg"), TextureKind::Normal);
        assert_eq!(TextureKind::from_filename("brick_spec.tga"), TextureKind::Specular);
        assert_eq!(TextureKind::from_filename("brick_rough.png"), TextureKind::Roughness);
        assert_eq!(TextureKind::from_filename("brick_metal.png"), TextureKind::Metallic);
        assert_eq!(TextureKind::from_filename("brick_disp.png"), TextureKind::Height);
        assert_eq!(TextureKind::from_filename("lamp_glow.png"), TextureKind::Emission);
        assert_eq!(TextureKind::from_filename("brick_ao.png"), TextureKind::Ao);
        assert_eq!(TextureKind::from_filename("brick.png"), TextureKind::Diffuse);
    }

    #[test]
    fn test_extension_ignored_in_inference() {
        // ".norm" 扩展名不能让文件被识别为法线贴图
        assert_eq!(TextureKind::from_filename("wall.norm"), TextureKind::Diffuse);
    }

    #[test]
    fn test_find_material() {
        let materials = vec![MaterialRecord::named("A"), MaterialRecord::named("B")];
        assert_eq!(find_material(&materials, "B").map(|m| m.name.as_str()), Some("B"));
        assert!(find_material(&materials, "C").is_none());
    }
}
