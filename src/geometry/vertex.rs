/// 几何体顶点定义模块
///
/// 定义加载管线输出的完整顶点结构，包含位置、法线、UV坐标、切线和副切线。

use bytemuck::{Pod, Zeroable};

/// 未提供法线时使用的默认法线
pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// 默认切线（加载管线不从 UV 推导切线空间）
pub const DEFAULT_TANGENT: [f32; 3] = [1.0, 0.0, 0.0];

/// 默认副切线
pub const DEFAULT_BITANGENT: [f32; 3] = [0.0, 1.0, 0.0];

/// 完整的3D顶点结构
///
/// 内存布局与GPU兼容，使用 `#[repr(C)]` 保证顺序和对齐，
/// 上传协作方可以直接 `bytemuck::cast_slice` 整个顶点数组。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - normal: 12 bytes (3 * f32)
/// - texcoord: 8 bytes (2 * f32)
/// - tangent: 12 bytes (3 * f32)
/// - bitangent: 12 bytes (3 * f32)
/// - **总计**: 56 bytes
///
/// # 示例
///
/// ```rust
/// use model_viewer::geometry::vertex::Vertex;
///
/// let vertex = Vertex::at([0.0, 1.0, 0.0]);
/// assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
/// assert_eq!(vertex.tangent, [1.0, 0.0, 0.0]);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 法线向量 (nx, ny, nz)
    ///
    /// 面引用省略法线时为 `(0, 1, 0)`。
    pub normal: [f32; 3],

    /// 纹理坐标 (u, v)
    pub texcoord: [f32; 2],

    /// 切线向量 (tx, ty, tz)
    pub tangent: [f32; 3],

    /// 副切线向量 (bx, by, bz)
    pub bitangent: [f32; 3],
}

impl Vertex {
    /// 创建一个新的顶点
    #[inline]
    pub fn new(
        position: [f32; 3],
        normal: [f32; 3],
        texcoord: [f32; 2],
        tangent: [f32; 3],
        bitangent: [f32; 3],
    ) -> Self {
        Self {
            position,
            normal,
            texcoord,
            tangent,
            bitangent,
        }
    }

    /// 只有位置的顶点，其余属性取默认值
    #[inline]
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            normal: DEFAULT_NORMAL,
            texcoord: [0.0, 0.0],
            tangent: DEFAULT_TANGENT,
            bitangent: DEFAULT_BITANGENT,
        }
    }
}
