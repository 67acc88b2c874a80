/// 几何体加载和处理模块
///
/// 提供 OBJ/MTL 模型加载功能。
/// 包含顶点定义、属性池、材质桶、网格数据结构以及进度上报。
///
/// # 模块结构
///
/// - `vertex`: 顶点数据结构定义
/// - `attributes`: 原始属性池与面顶点引用解析
/// - `bucket`: 按材质分桶、顶点去重与扇形三角化
/// - `material`: 材质记录与纹理类型
/// - `mesh`: 网格数据与输出网格
/// - `progress`: 加载进度上报
/// - `loaders`: OBJ / MTL 加载器
///
/// # 架构设计
///
/// ```text
/// OBJ 文件 ──逐行──> ObjLoader::parse_line
///                     ├─ v / vt / vn ──> AttributePools
///                     ├─ usemtl      ──> 当前材质键
///                     └─ f           ──> MeshBucket（去重 + 三角化）
///     ↓
/// ObjLoader::finish ──> TextureBinder ──> TextureUploader
///     ↓
/// Vec<Mesh>（CPU 侧数据，交给渲染协作方）
/// ```

pub mod vertex;
pub mod attributes;
pub mod bucket;
pub mod material;
pub mod mesh;
pub mod progress;
pub mod loaders;

// 重新导出常用类型
pub use attributes::AttributePools;
pub use bucket::{fan_triangulate, MeshBucket, MeshPartitioner, DEFAULT_MATERIAL_KEY};
pub use material::{MaterialRecord, TextureKind};
pub use mesh::{Mesh, MeshData};
pub use progress::{LoadProgress, ProgressReporter};
pub use vertex::Vertex;
