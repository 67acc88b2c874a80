/// 顶点属性池与顶点解析
///
/// 保存 `v` / `vt` / `vn` 记录解析出的原始属性，并把面引用（如 `12/4/7`）
/// 解析为完整的 [`Vertex`]。

use super::vertex::Vertex;

/// 原始顶点属性池
///
/// 三个只追加的数组，OBJ 中以 1 为起始下标引用。每次加载开始时清空。
#[derive(Debug, Default, Clone)]
pub struct AttributePools {
    pub positions: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
}

impl AttributePools {
    pub fn new() -> Self {
        Self::default()
    }

    /// 根据文件大小粗略预分配容量
    ///
    /// 估算比例：每个位置/法线行约 50 字节，纹理坐标行约 60 字节。
    pub fn reserve_for_file_size(&mut self, file_size: u64) {
        let size = file_size as usize;
        self.positions.reserve(size / 50);
        self.texcoords.reserve(size / 60);
        self.normals.reserve(size / 50);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.texcoords.clear();
        self.normals.clear();
    }

    /// 解析一个面顶点引用
    ///
    /// 格式为 `pos[/[tex]][/norm]`。每个下标只接受 1 起始的正整数，
    /// 缺失、为零、为负、越界或不是数字时，该属性保留默认值。
    /// 切线与副切线总是默认值。
    pub fn resolve(&self, key: &str) -> Vertex {
        let mut vertex = Vertex::default();
        let mut fields = key.split('/');

        if let Some(p) = fields.next().and_then(|f| lookup(&self.positions, f)) {
            vertex.position = p;
        }
        if let Some(t) = fields.next().and_then(|f| lookup(&self.texcoords, f)) {
            vertex.texcoord = t;
        }
        if let Some(n) = fields.next().and_then(|f| lookup(&self.normals, f)) {
            vertex.normal = n;
        }

        vertex
    }
}

/// 按 OBJ 的 1 起始下标取值
fn lookup<T: Copy>(pool: &[T], field: &str) -> Option<T> {
    let index = parse_index(field)?;
    pool.get(index - 1).copied()
}

/// 解析正整数下标
///
/// 与 `strtol` 一致只读取开头的数字部分（`"7abc"` 视为 7），
/// 不接受负数与零。
fn parse_index(field: &str) -> Option<usize> {
    let field = field.trim_start();
    let field = field.strip_prefix('+').unwrap_or(field);
    let digits_end = field
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(field.len());

    match field[..digits_end].parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(index) => Some(index),
    }
}
