/// 网格数据结构模块
///
/// 定义CPU侧的网格数据容器，以及加载管线交给渲染协作方的输出网格。

use super::material::{MaterialRecord, TextureKind};
use super::vertex::Vertex;
use crate::core::error::{MeshLoadError, Result};
use crate::texture::TextureRef;

/// CPU侧网格数据
///
/// 存储从文件加载的原始网格数据，包含顶点和索引。
/// 这是一个简单的数据持有者，不包含GPU资源。
///
/// # 示例
///
/// ```rust
/// use model_viewer::geometry::mesh::MeshData;
/// use model_viewer::geometry::vertex::Vertex;
///
/// let mesh = MeshData {
///     vertices: vec![
///         Vertex::at([0.0, 0.0, 0.0]),
///         Vertex::at([1.0, 0.0, 0.0]),
///         Vertex::at([0.0, 0.0, 1.0]),
///     ],
///     indices: vec![0, 1, 2],
///     name: Some("Triangle".to_string()),
/// };
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// 顶点数组
    pub vertices: Vec<Vertex>,

    /// 索引数组
    ///
    /// 三角形顶点索引，每3个索引定义一个三角形。
    pub indices: Vec<u32>,

    /// 网格名称（通常是材质键）
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个空的网格数据
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            name: None,
        }
    }

    /// 由顶点和索引创建网格数据
    pub fn from_parts(vertices: Vec<Vertex>, indices: Vec<u32>, name: Option<String>) -> Self {
        Self {
            vertices,
            indices,
            name,
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是3的倍数（每个三角形3个顶点）
    /// - 所有索引都在有效范围内
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "索引数量必须是3的倍数，当前为: {}",
                self.indices.len()
            ))
            .into());
        }

        let vertex_count = self.vertices.len() as u32;
        if let Some((i, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index >= vertex_count)
        {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "索引 {} 处的值 {} 超出顶点范围 (共 {} 个顶点)",
                i, index, vertex_count
            ))
            .into());
        }

        Ok(())
    }

    /// 翻转所有顶点纹理坐标的 V 分量（`v = 1 - v`）
    pub fn flip_texcoords_v(&mut self) {
        for vertex in &mut self.vertices {
            vertex.texcoord[1] = 1.0 - vertex.texcoord[1];
        }
    }
}

impl Default for MeshData {
    fn default() -> Self {
        Self::new()
    }
}

/// 输出网格
///
/// 加载管线交给渲染协作方的单元：一个材质桶对应一个网格，
/// 包含几何数据、已上传的纹理引用和材质属性。
#[derive(Debug, Clone)]
pub struct Mesh {
    pub data: MeshData,
    pub textures: Vec<TextureRef>,
    pub material: MaterialRecord,
}

impl Mesh {
    pub fn new(data: MeshData, textures: Vec<TextureRef>, material: MaterialRecord) -> Self {
        Self {
            data,
            textures,
            material,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.data.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.data.indices
    }

    /// 指定类型的第一张纹理
    pub fn texture(&self, kind: TextureKind) -> Option<&TextureRef> {
        self.textures.iter().find(|t| t.kind == kind)
    }

    /// 用新纹理替换所有同类型的纹理
    pub fn replace_texture(&mut self, texture: TextureRef) {
        self.textures.retain(|t| t.kind != texture.kind);
        self.textures.push(texture);
    }
}
