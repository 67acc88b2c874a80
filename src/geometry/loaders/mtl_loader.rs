/// MTL 材质文件加载器
///
/// 行式、按指令分派（区分大小写）的解析器，产出有序的 [`MaterialRecord`] 列表。
///
/// # 支持的指令
///
/// | 指令 | 字段 |
/// |---|---|
/// | `newmtl` | 开始新材质 |
/// | `Ka` / `Kd` / `Ks` / `Ke` | 环境光 / 漫反射 / 高光 / 自发光颜色 |
/// | `Ns` / `d` / `Tr` / `Ni` / `Pr` / `Pm` | 高光指数 / 不透明度 / 透明度 / 折射率 / 粗糙度 / 金属度 |
/// | `map_Kd` `map_Ks` `map_Bump`/`bump` `map_Disp` `map_Ke` `map_Pr` `map_Pm` `map_Ao` `map_d` | 纹理文件名 |
///
/// 纹理文件名取指令之后的整行剩余部分（只去掉紧跟指令的一个空格），
/// 所以文件名中间的空格会被保留。

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{for_each_line, split_directive};
use crate::geometry::material::{MaterialRecord, TextureKind};

/// MTL 指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MtlDirective {
    NewMaterial,
    Ambient,
    Diffuse,
    Specular,
    Emission,
    Shininess,
    Dissolve,
    Transparency,
    Refraction,
    Roughness,
    Metallic,
    Map(TextureKind),
}

impl MtlDirective {
    fn from_token(token: &str) -> Option<Self> {
        let directive = match token {
            "newmtl" => MtlDirective::NewMaterial,
            "Ka" => MtlDirective::Ambient,
            "Kd" => MtlDirective::Diffuse,
            "Ks" => MtlDirective::Specular,
            "Ke" => MtlDirective::Emission,
            "Ns" => MtlDirective::Shininess,
            "d" => MtlDirective::Dissolve,
            "Tr" => MtlDirective::Transparency,
            "Ni" => MtlDirective::Refraction,
            "Pr" => MtlDirective::Roughness,
            "Pm" => MtlDirective::Metallic,
            "map_Kd" => MtlDirective::Map(TextureKind::Diffuse),
            "map_Ks" => MtlDirective::Map(TextureKind::Specular),
            "map_Bump" | "bump" => MtlDirective::Map(TextureKind::Normal),
            "map_Disp" => MtlDirective::Map(TextureKind::Height),
            "map_Ke" => MtlDirective::Map(TextureKind::Emission),
            "map_Pr" => MtlDirective::Map(TextureKind::Roughness),
            "map_Pm" => MtlDirective::Map(TextureKind::Metallic),
            "map_Ao" => MtlDirective::Map(TextureKind::Ao),
            "map_d" => MtlDirective::Map(TextureKind::Opacity),
            _ => return None,
        };
        Some(directive)
    }
}

/// 从文件加载材质表
///
/// 文件无法打开时记录错误并返回空列表，不向调用者报错。
pub fn load_mtl<P: AsRef<Path>>(path: P) -> Vec<MaterialRecord> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to open MTL file");
            return Vec::new();
        }
    };

    let materials = parse_mtl(BufReader::new(file));
    tracing::info!(
        path = %path.display(),
        count = materials.len(),
        "Loaded materials from MTL file"
    );
    materials
}

/// 从任意读取器解析材质表
///
/// 读取中途出错时保留已解析的材质。
pub fn parse_mtl<R: BufRead>(reader: R) -> Vec<MaterialRecord> {
    let mut parser = MtlParser::default();

    if let Err(e) = for_each_line(reader, |line, _| parser.parse_line(line)) {
        tracing::warn!(error = %e, "MTL read interrupted, keeping materials parsed so far");
    }

    parser.finish()
}

#[derive(Default)]
struct MtlParser {
    materials: Vec<MaterialRecord>,
    current: MaterialRecord,
}

impl MtlParser {
    fn parse_line(&mut self, line: &str) {
        let Some((token, rest)) = split_directive(line) else {
            return;
        };
        let Some(directive) = MtlDirective::from_token(token) else {
            return;
        };

        if directive == MtlDirective::NewMaterial {
            self.flush();
            self.current = MaterialRecord::named(rest.trim());
            return;
        }

        let mat = &mut self.current;
        match directive {
            MtlDirective::NewMaterial => {}
            MtlDirective::Ambient => read_vec3(rest, &mut mat.ambient),
            MtlDirective::Diffuse => read_vec3(rest, &mut mat.diffuse),
            MtlDirective::Specular => read_vec3(rest, &mut mat.specular),
            MtlDirective::Emission => read_vec3(rest, &mut mat.emission),
            MtlDirective::Shininess => read_f32(rest, &mut mat.shininess),
            MtlDirective::Dissolve => read_f32(rest, &mut mat.opacity),
            MtlDirective::Transparency => {
                let mut transparency = 1.0 - mat.opacity;
                read_f32(rest, &mut transparency);
                mat.opacity = 1.0 - transparency;
            }
            MtlDirective::Refraction => read_f32(rest, &mut mat.refraction),
            MtlDirective::Roughness => read_f32(rest, &mut mat.roughness),
            MtlDirective::Metallic => read_f32(rest, &mut mat.metallic),
            MtlDirective::Map(kind) => {
                if let Some(slot) = mat.texture_slot_mut(kind) {
                    *slot = Some(texture_filename(rest).to_string());
                }
            }
        }
    }

    /// 有名字的当前材质进入结果列表
    fn flush(&mut self) {
        let current = std::mem::take(&mut self.current);
        if !current.name.is_empty() {
            self.materials.push(current);
        }
    }

    fn finish(mut self) -> Vec<MaterialRecord> {
        self.flush();
        self.materials
    }
}

/// 指令后的纹理文件名：只去掉一个分隔用的空白字符，保留中间的空格
fn texture_filename(rest: &str) -> &str {
    let rest = rest.strip_prefix(char::is_whitespace).unwrap_or(rest);
    rest.trim_end()
}

/// 依次读取最多三个分量，遇到无法解析的分量即停止，其余分量保持原值
fn read_vec3(rest: &str, out: &mut [f32; 3]) {
    for (slot, token) in out.iter_mut().zip(rest.split_whitespace()) {
        match token.parse::<f32>() {
            Ok(value) => *slot = value,
            Err(_) => break,
        }
    }
}

fn read_f32(rest: &str, out: &mut f32) {
    if let Some(Ok(value)) = rest.split_whitespace().next().map(str::parse::<f32>) {
        *out = value;
    }
}
