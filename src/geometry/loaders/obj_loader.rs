/// OBJ 文件加载器
///
/// 单遍、行式的 Wavefront OBJ 解析器。解析时把面顶点引用直接去重、
/// 按材质分桶并扇形三角化，扫描结束后每个非空材质桶输出一个 [`Mesh`]。
///
/// 只识别 `v`、`vt`、`vn`、`f`、`usemtl` 五种指令，其余指令（`o`、`g`、`s`、
/// `mtllib` 等）一律忽略。数值格式错误不会让整行失败，对应分量保持默认值。
use super::mtl_loader::load_mtl;
use super::{for_each_line, split_directive, MeshLoader};
use crate::core::config::LoaderConfig;
use crate::core::error::{MeshLoadError, Result, ViewerError};
use crate::geometry::attributes::AttributePools;
use crate::geometry::bucket::{MeshBucket, MeshPartitioner, DEFAULT_MATERIAL_KEY};
use crate::geometry::material::{find_material, MaterialRecord};
use crate::geometry::mesh::{Mesh, MeshData};
use crate::geometry::progress::{ProgressReporter, ASSEMBLY_PROGRESS};
use crate::texture::{TextureBinder, TextureUploader};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

/// OBJ 行指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Position,
    TexCoord,
    Normal,
    UseMaterial,
    Face,
}

/// 指令分派表（区分大小写）
const DIRECTIVES: &[(&str, Directive)] = &[
    ("v", Directive::Position),
    ("vt", Directive::TexCoord),
    ("vn", Directive::Normal),
    ("usemtl", Directive::UseMaterial),
    ("f", Directive::Face),
];

impl Directive {
    fn lookup(token: &str) -> Option<Self> {
        DIRECTIVES
            .iter()
            .find(|(name, _)| *name == token)
            .map(|&(_, directive)| directive)
    }
}

/// 单次扫描的统计
#[derive(Debug, Default, Clone, Copy)]
struct ScanStats {
    lines: usize,
    faces: usize,
    triangles: usize,
}

/// OBJ 格式加载器
///
/// 加载器实例持有属性池、材质桶和去重缓存，每次加载开始时全部清空，
/// 因此同一实例可以重复使用。不同实例之间没有共享状态。
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
/// loader.set_progress_callback(|p| println!("{:.0}%", p * 100.0));
///
/// let mut textures = ImageTextureStore::new();
/// let meshes = loader.load_obj(
///     Path::new("house.obj"),
///     Some(Path::new("house.mtl")),
///     &mut textures,
/// )?;
/// println!("加载了 {} 个网格", meshes.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ObjLoader {
    config: LoaderConfig,
    pools: AttributePools,
    partitioner: MeshPartitioner,
    /// 不按材质拆分时所有面进入这里
    combined: MeshBucket,
    current_material: String,
    materials: Vec<MaterialRecord>,
    progress: ProgressReporter,
    stats: ScanStats,
}

impl ObjLoader {
    pub fn new(config: LoaderConfig) -> Self {
        let progress =
            ProgressReporter::new(config.progress_interval_lines, config.scan_progress_share);
        Self {
            config,
            pools: AttributePools::new(),
            partitioner: MeshPartitioner::new(),
            combined: MeshBucket::new(),
            current_material: DEFAULT_MATERIAL_KEY.to_string(),
            materials: Vec::new(),
            progress,
            stats: ScanStats::default(),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// 注册进度回调，参数为 [0, 1] 内的进度
    ///
    /// 回调在加载线程上同步调用。
    pub fn set_progress_callback<F>(&mut self, callback: F)
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.progress.set_callback(Box::new(callback));
    }

    pub fn clear_progress_callback(&mut self) {
        self.progress.clear_callback();
    }

    /// 当前加载使用的材质表
    pub fn materials(&self) -> &[MaterialRecord] {
        &self.materials
    }

    pub fn set_materials(&mut self, materials: Vec<MaterialRecord>) {
        self.materials = materials;
    }

    /// 属性池（只读）
    pub fn pools(&self) -> &AttributePools {
        &self.pools
    }

    /// 清空所有解析状态（属性池、材质桶、去重缓存、材质表）
    pub fn clear(&mut self) {
        self.pools.clear();
        self.partitioner.clear();
        self.combined = MeshBucket::new();
        self.current_material = DEFAULT_MATERIAL_KEY.to_string();
        self.materials.clear();
        self.stats = ScanStats::default();
    }

    /// 加载 OBJ 文件
    ///
    /// # 参数
    ///
    /// - `obj_path`: OBJ 文件路径，纹理文件名相对于它所在的目录解析
    /// - `mtl_path`: 可选的 MTL 文件路径（不读取 OBJ 中的 `mtllib`）
    /// - `uploader`: 纹理上传协作方
    ///
    /// # 返回
    ///
    /// 每个非空材质桶一个网格，按材质首次使用的顺序排列。
    /// OBJ 文件无法打开或读取时记录警告并返回空列表；是否视为失败由调用者决定。
    /// 需要区分这两种情况时使用 [`ObjLoader::try_load_obj`]。
    pub fn load_obj(
        &mut self,
        obj_path: &Path,
        mtl_path: Option<&Path>,
        uploader: &mut dyn TextureUploader,
    ) -> Result<Vec<Mesh>> {
        match self.try_load_obj(obj_path, mtl_path, uploader) {
            Err(ViewerError::MeshLoading(MeshLoadError::FileNotFound(_))) => Ok(Vec::new()),
            result => result,
        }
    }

    /// 加载 OBJ 文件，无法打开或读取时返回 `MeshLoadError::FileNotFound`
    ///
    /// 成功解析但没有几何体时仍返回空列表。
    pub fn try_load_obj(
        &mut self,
        obj_path: &Path,
        mtl_path: Option<&Path>,
        uploader: &mut dyn TextureUploader,
    ) -> Result<Vec<Mesh>> {
        let _span = crate::load_span!("load_obj", path = %obj_path.display()).entered();
        let start = Instant::now();

        let file = match File::open(obj_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %obj_path.display(), error = %e, "Failed to open OBJ file");
                self.clear();
                return Err(MeshLoadError::FileNotFound(obj_path.to_path_buf()).into());
            }
        };
        let total_bytes = file.metadata().map(|m| m.len()).unwrap_or(0);
        tracing::info!(
            path = %obj_path.display(),
            size_mb = total_bytes as f64 / (1024.0 * 1024.0),
            "Loading OBJ file"
        );

        let materials = match mtl_path {
            Some(mtl) if !mtl.as_os_str().is_empty() => load_mtl(mtl),
            _ => Vec::new(),
        };

        let texture_dir = obj_path.parent().unwrap_or_else(|| Path::new(""));
        let meshes = match self.load_from_reader(
            BufReader::new(file),
            total_bytes,
            materials,
            texture_dir,
            uploader,
        ) {
            Ok(meshes) => meshes,
            Err(ViewerError::Io(e)) => {
                tracing::warn!(path = %obj_path.display(), error = %e, "Failed to read OBJ file");
                self.clear();
                return Err(MeshLoadError::FileNotFound(obj_path.to_path_buf()).into());
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            path = %obj_path.display(),
            meshes = meshes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "OBJ loaded"
        );
        Ok(meshes)
    }

    /// 从任意读取器加载
    ///
    /// `total_bytes` 只用于进度估算，可以不准确。
    pub fn load_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        total_bytes: u64,
        materials: Vec<MaterialRecord>,
        texture_dir: &Path,
        uploader: &mut dyn TextureUploader,
    ) -> Result<Vec<Mesh>> {
        self.clear();
        self.materials = materials;
        if self.config.reserve_capacity {
            self.pools.reserve_for_file_size(total_bytes);
        }

        let mut consumed = 0u64;
        let mut line_number = 0usize;
        for_each_line(reader, |line, bytes| {
            consumed += bytes;
            line_number += 1;
            self.parse_line(line);
            self.progress.scan_line(line_number, consumed, total_bytes);
        })?;
        self.stats.lines = line_number;

        tracing::debug!(
            lines = self.stats.lines,
            positions = self.pools.positions.len(),
            texcoords = self.pools.texcoords.len(),
            normals = self.pools.normals.len(),
            faces = self.stats.faces,
            triangles = self.stats.triangles,
            "OBJ scan complete"
        );
        self.progress.report(ASSEMBLY_PROGRESS);

        let meshes = self.finish(texture_dir, uploader);
        self.progress.report(1.0);
        Ok(meshes)
    }

    /// 处理一行 OBJ 文本（不含换行符）
    pub fn parse_line(&mut self, line: &str) {
        let Some((token, rest)) = split_directive(line) else {
            return;
        };
        let Some(directive) = Directive::lookup(token) else {
            return;
        };

        match directive {
            Directive::Position => self.pools.positions.push(parse_floats(rest)),
            Directive::TexCoord => {
                let [u, v] = parse_floats(rest);
                let v = if self.config.flip_texcoord_v { 1.0 - v } else { v };
                self.pools.texcoords.push([u, v]);
            }
            Directive::Normal => self.pools.normals.push(parse_floats(rest)),
            Directive::UseMaterial => {
                // 没有名字的 usemtl 不改变当前材质
                let name = rest.trim();
                if !name.is_empty() {
                    self.current_material = name.to_string();
                }
            }
            Directive::Face => self.add_face(rest),
        }
    }

    fn add_face(&mut self, rest: &str) {
        let refs = rest.split_whitespace();
        let triangles = if self.config.split_by_material {
            self.partitioner
                .bucket_mut(&self.current_material)
                .add_face(refs, &self.pools)
        } else {
            self.combined.add_face(refs, &self.pools)
        };

        self.stats.faces += 1;
        self.stats.triangles += triangles;
    }

    /// 组装输出网格
    ///
    /// 按创建顺序取出非空材质桶，解析各自的纹理；
    /// 不按材质拆分时输出一个不带纹理的合并网格。
    pub fn finish(
        &mut self,
        texture_dir: &Path,
        uploader: &mut dyn TextureUploader,
    ) -> Vec<Mesh> {
        let binder = TextureBinder::new(texture_dir);
        let mut meshes = Vec::new();

        for (key, bucket) in self.partitioner.drain_non_empty() {
            let textures = binder.resolve(&key, &self.materials, uploader);
            let material = find_material(&self.materials, &key)
                .cloned()
                .unwrap_or_else(|| MaterialRecord::named(&key));
            let (vertices, indices) = bucket.into_parts();

            tracing::debug!(
                material = %key,
                vertices = vertices.len(),
                indices = indices.len(),
                textures = textures.len(),
                "Mesh assembled"
            );
            meshes.push(Mesh::new(
                MeshData::from_parts(vertices, indices, Some(key)),
                textures,
                material,
            ));
        }

        if meshes.is_empty() && !self.combined.is_empty() {
            let (vertices, indices) = std::mem::take(&mut self.combined).into_parts();
            tracing::debug!(
                vertices = vertices.len(),
                indices = indices.len(),
                "Combined mesh assembled"
            );
            meshes.push(Mesh::new(
                MeshData::from_parts(vertices, indices, Some(DEFAULT_MATERIAL_KEY.to_string())),
                Vec::new(),
                MaterialRecord::named(DEFAULT_MATERIAL_KEY),
            ));
        }

        meshes
    }
}

impl Default for ObjLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(
        &mut self,
        path: &Path,
        textures: &mut dyn TextureUploader,
    ) -> Result<Vec<Mesh>> {
        self.load_obj(path, None, textures)
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["obj"]
    }
}

/// 依次解析最多 `N` 个浮点分量
///
/// 遇到缺失或无法解析的分量即停止，其余分量保持 0。
fn parse_floats<const N: usize>(rest: &str) -> [f32; N] {
    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(rest.split_whitespace()) {
        match token.parse::<f32>() {
            Ok(value) => *slot = value,
            Err(_) => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::material::TextureKind;
    use std::sync::{Arc, Mutex};

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3
f 1 3 4
";

    fn load_with(config: LoaderConfig, src: &str, materials: Vec<MaterialRecord>) -> Vec<Mesh> {
        let mut loader = ObjLoader::new(config);
        let mut uploader = |_: &Path| 1u32;
        loader
            .load_from_reader(src.as_bytes(), src.len() as u64, materials, Path::new(""), &mut uploader)
            .unwrap()
    }

    fn load(src: &str) -> Vec<Mesh> {
        load_with(LoaderConfig::default(), src, Vec::new())
    }

    fn assert_indices_valid(mesh: &Mesh) {
        assert!(mesh.data.validate().is_ok());
    }

    #[test]
    fn test_shared_vertices_are_deduplicated() {
        let meshes = load(QUAD);
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].vertices().len(), 4);
        assert_eq!(meshes[0].indices(), &[0, 1, 2, 0, 2, 3]);
        assert_indices_valid(&meshes[0]);
    }

    #[test]
    fn test_polygon_fan_triangulation() {
        let meshes = load("v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nf 1 2 3 4 5\n");
        assert_eq!(meshes[0].indices().len(), 9);
        assert_eq!(meshes[0].data.triangle_count(), 3);
        assert_indices_valid(&meshes[0]);
    }

    #[test]
    fn test_missing_normal_uses_default() {
        let meshes = load("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        for vertex in meshes[0].vertices() {
            assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
            assert_eq!(vertex.texcoord, [0.0, 0.0]);
            assert_eq!(vertex.tangent, [1.0, 0.0, 0.0]);
            assert_eq!(vertex.bitangent, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_full_references() {
        let meshes = load(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3//1\n",
        );
        let vertices = meshes[0].vertices();
        assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[0].texcoord, [0.0, 1.0]);
        assert_eq!(vertices[2].texcoord, [0.0, 0.0]);
        assert_eq!(vertices[2].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_texcoord_v_is_flipped() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.25 0.75\nf 1/1 2/1 3/1\n";
        let meshes = load(src);
        assert_eq!(meshes[0].vertices()[0].texcoord, [0.25, 0.25]);

        let config = LoaderConfig {
            flip_texcoord_v: false,
            ..LoaderConfig::default()
        };
        let meshes = load_with(config, src, Vec::new());
        assert_eq!(meshes[0].vertices()[0].texcoord, [0.25, 0.75]);
    }

    #[test]
    fn test_usemtl_partitions_meshes() {
        let mut red = MaterialRecord::named("red");
        red.diffuse = [1.0, 0.0, 0.0];
        red.diffuse_texture = Some("red.png".to_string());

        let src = format!("{QUAD}usemtl red\nf 1 2 3\nusemtl blue\nf 1 3 4\nf 2 3 4\n");
        let meshes = load_with(LoaderConfig::default(), &src, vec![red]);

        let names: Vec<_> = meshes.iter().map(|m| m.data.name.clone()).collect();
        assert_eq!(
            names,
            vec![
                Some("default".to_string()),
                Some("red".to_string()),
                Some("blue".to_string())
            ]
        );

        assert_eq!(meshes[1].vertices().len(), 3);
        assert_eq!(meshes[1].material.diffuse, [1.0, 0.0, 0.0]);
        assert_eq!(meshes[1].textures.len(), 1);
        assert_eq!(meshes[1].textures[0].kind, TextureKind::Diffuse);

        // 未知材质使用默认属性，不绑定纹理
        assert_eq!(meshes[2].vertices().len(), 4);
        assert_eq!(meshes[2].indices().len(), 6);
        assert!(meshes[2].textures.is_empty());
        assert_eq!(meshes[2].material.name, "blue");

        meshes.iter().for_each(assert_indices_valid);
    }

    #[test]
    fn test_two_materials_two_meshes() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl a\nf 1 2 3\nusemtl b\nf 1 2 3\n";
        let meshes = load(src);
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].vertices().len(), 3);
        assert_eq!(meshes[1].vertices().len(), 3);
    }

    #[test]
    fn test_no_usemtl_single_default_mesh() {
        let meshes = load(QUAD);
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].data.name.as_deref(), Some("default"));
        assert_eq!(meshes[0].material.name, "default");
    }

    #[test]
    fn test_single_mesh_mode_ignores_materials() {
        let mut red = MaterialRecord::named("red");
        red.diffuse_texture = Some("red.png".to_string());
        let config = LoaderConfig {
            split_by_material: false,
            ..LoaderConfig::default()
        };

        let src = format!("{QUAD}usemtl red\nf 1 2 3\nusemtl blue\nf 1 3 4\n");
        let meshes = load_with(config, &src, vec![red]);

        assert_eq!(meshes.len(), 1);
        assert!(meshes[0].textures.is_empty());
        assert_eq!(meshes[0].vertices().len(), 4);
        assert_eq!(meshes[0].indices().len(), 12);
    }

    #[test]
    fn test_comments_only_is_empty() {
        let meshes = load("# nothing here\n\n   \n# still nothing\n");
        assert!(meshes.is_empty());
    }

    #[test]
    fn test_degenerate_faces_emit_nothing() {
        let meshes = load("v 0 0 0\nv 1 0 0\nf 1 2\nf\n");
        assert!(meshes.is_empty());
    }

    #[test]
    fn test_unknown_directives_ignored() {
        let src = format!("mtllib scene.mtl\no Cube\ng group\ns 1\nvp 0.5\nl 1 2\nV 9 9 9\n{QUAD}");
        let meshes = load(&src);
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].vertices().len(), 4);
        assert_eq!(meshes[0].vertices()[0].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_malformed_numbers_keep_defaults() {
        let meshes = load("v 1 abc 3\nv 1 0 0\nv 0 1 0\nvn x y z\nf 1//1 2 3\n");
        let vertices = meshes[0].vertices();
        assert_eq!(vertices[0].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[0].normal, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_references_fall_back() {
        let meshes = load("v 1 1 1\nf 1 5 -1\n");
        let vertices = meshes[0].vertices();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0].position, [1.0, 1.0, 1.0]);
        assert_eq!(vertices[1].position, [0.0, 0.0, 0.0]);
        assert_eq!(vertices[2].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reload_is_idempotent() {
        let src = format!("{QUAD}usemtl a\nf 1 2 3\n");
        let mut loader = ObjLoader::default();
        let mut uploader = |_: &Path| 0u32;

        let first = loader
            .load_from_reader(src.as_bytes(), src.len() as u64, Vec::new(), Path::new(""), &mut uploader)
            .unwrap();
        let second = loader
            .load_from_reader(src.as_bytes(), src.len() as u64, Vec::new(), Path::new(""), &mut uploader)
            .unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.data, b.data);
        }
    }

    #[test]
    fn test_second_file_is_not_contaminated_by_first() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.obj");
        let second = dir.path().join("second.obj");
        std::fs::write(
            &first,
            "v 9 9 9\nv 8 8 8\nv 7 7 7\nv 6 6 6\nvn 0 0 1\n\
             usemtl stone\nf 1//1 2//1 3//1\nusemtl wood\nf 1//1 3//1 4//1\n",
        )
        .unwrap();
        std::fs::write(&second, "v 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\n").unwrap();

        let mut loader = ObjLoader::default();
        let mut uploader = |_: &Path| 0u32;
        let meshes = loader.load_obj(&first, None, &mut uploader).unwrap();
        assert_eq!(meshes.len(), 2);

        let meshes = loader.load_obj(&second, None, &mut uploader).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].material.name, DEFAULT_MATERIAL_KEY);
        assert_eq!(meshes[0].data.name.as_deref(), Some(DEFAULT_MATERIAL_KEY));
        assert_eq!(meshes[0].indices(), &[0, 1, 2]);

        let positions: Vec<[f32; 3]> = meshes[0].vertices().iter().map(|v| v.position).collect();
        assert_eq!(positions, vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(meshes[0].vertices().iter().all(|v| v.normal == [0.0, 1.0, 0.0]));

        assert_eq!(loader.pools().positions.len(), 3);
        assert!(loader.pools().normals.is_empty());
    }

    #[test]
    fn test_progress_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let config = LoaderConfig {
            progress_interval_lines: 2,
            ..LoaderConfig::default()
        };
        let mut loader = ObjLoader::new(config);
        loader.set_progress_callback(move |p| sink.lock().unwrap().push(p));

        let mut uploader = |_: &Path| 0u32;
        loader
            .load_from_reader(QUAD.as_bytes(), QUAD.len() as u64, Vec::new(), Path::new(""), &mut uploader)
            .unwrap();

        let seen = seen.lock().unwrap();
        // 6 行：第 2、4、6 行各一次，之后 0.9 与 1.0
        assert_eq!(seen.len(), 5);
        assert!(seen[..3].iter().all(|&p| p > 0.0 && p <= 0.8 + 1e-6));
        assert!((seen[2] - 0.8).abs() < 1e-6);
        assert_eq!(seen[3], ASSEMBLY_PROGRESS);
        assert_eq!(seen[4], 1.0);
    }

    #[test]
    fn test_texture_paths_relative_to_obj_directory() {
        let dir = tempfile::tempdir().unwrap();
        let obj = dir.path().join("crate.obj");
        let mtl = dir.path().join("crate.mtl");
        std::fs::write(&obj, format!("{QUAD}usemtl wood\nf 1 2 3\n")).unwrap();
        std::fs::write(&mtl, "newmtl wood\nmap_Kd wood grain.png\n").unwrap();

        let mut requested = Vec::new();
        let mut uploader = |path: &Path| {
            requested.push(path.to_path_buf());
            42u32
        };
        let mut loader = ObjLoader::default();
        let meshes = loader.load_obj(&obj, Some(mtl.as_path()), &mut uploader).unwrap();

        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[1].textures[0].id, 42);
        assert_eq!(requested, vec![dir.path().join("wood grain.png")]);
    }

    #[test]
    fn test_missing_obj_file_is_empty() {
        let mut loader = ObjLoader::default();
        let mut uploader = |_: &Path| 0u32;
        let meshes = loader
            .load_obj(Path::new("no/such/model.obj"), None, &mut uploader)
            .unwrap();
        assert!(meshes.is_empty());
    }

    #[test]
    fn test_unreadable_obj_is_empty_but_strict_load_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folder.obj");
        std::fs::create_dir(&path).unwrap();

        let mut loader = ObjLoader::default();
        let mut uploader = |_: &Path| 0u32;
        let meshes = loader.load_obj(&path, None, &mut uploader).unwrap();
        assert!(meshes.is_empty());

        let err = loader.try_load_obj(&path, None, &mut uploader).unwrap_err();
        assert!(matches!(
            err,
            ViewerError::MeshLoading(MeshLoadError::FileNotFound(_))
        ));
        assert!(loader.pools().positions.is_empty());
    }
}
