/// 按材质分桶的网格累积
///
/// 解析过程中，每个材质键（包括第一次 `usemtl` 之前使用的 `"default"`）
/// 都有一个独立的 [`MeshBucket`]，保存该材质的顶点、索引和去重缓存。

use std::collections::HashMap;

use super::attributes::AttributePools;
use super::vertex::Vertex;

/// 第一次 `usemtl` 之前的面使用的材质键
pub const DEFAULT_MATERIAL_KEY: &str = "default";

/// 单个材质的顶点/索引累积区
///
/// 不变式：`cache` 中的每个索引都指向 `vertices` 中的有效元素，
/// 每个不同的面顶点引用字符串恰好产生一个顶点。
#[derive(Debug, Default, Clone)]
pub struct MeshBucket {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    cache: HashMap<String, u32>,
}

impl MeshBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得引用对应的顶点下标，不存在时解析并追加
    pub fn get_or_create(&mut self, key: &str, pools: &AttributePools) -> u32 {
        if let Some(&index) = self.cache.get(key) {
            return index;
        }

        let index = self.vertices.len() as u32;
        self.vertices.push(pools.resolve(key));
        self.cache.insert(key.to_string(), index);
        index
    }

    /// 添加一个多边形面
    ///
    /// 逐个解析/去重顶点后按扇形三角化，少于 3 个引用的面不产生三角形。
    /// 返回产生的三角形数量。
    pub fn add_face<'a, I>(&mut self, refs: I, pools: &AttributePools) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let face: Vec<u32> = refs
            .into_iter()
            .map(|key| self.get_or_create(key, pools))
            .collect();

        let before = self.indices.len();
        fan_triangulate(&face, &mut self.indices);
        (self.indices.len() - before) / 3
    }

    /// 不同的面顶点引用数量
    pub fn unique_refs(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// 拆出顶点与索引，丢弃缓存
    pub fn into_parts(self) -> (Vec<Vertex>, Vec<u32>) {
        (self.vertices, self.indices)
    }
}

/// 扇形三角化
///
/// `n` 个顶点的多边形产生 `n - 2` 个三角形 `(f[0], f[i], f[i + 1])`。
/// 只对凸的平面多边形正确。
pub fn fan_triangulate(face: &[u32], out: &mut Vec<u32>) {
    if face.len() < 3 {
        return;
    }
    out.reserve((face.len() - 2) * 3);
    for pair in face[1..].windows(2) {
        out.extend_from_slice(&[face[0], pair[0], pair[1]]);
    }
}

/// 材质键 → 网格桶
///
/// 桶在第一次使用某个材质键时创建，并按创建顺序输出，保证结果确定。
#[derive(Debug, Default)]
pub struct MeshPartitioner {
    buckets: Vec<(String, MeshBucket)>,
    lookup: HashMap<String, usize>,
}

impl MeshPartitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得材质键对应的桶，不存在时创建
    pub fn bucket_mut(&mut self, key: &str) -> &mut MeshBucket {
        let slot = match self.lookup.get(key) {
            Some(&slot) => slot,
            None => {
                self.buckets.push((key.to_string(), MeshBucket::new()));
                let slot = self.buckets.len() - 1;
                self.lookup.insert(key.to_string(), slot);
                slot
            }
        };
        &mut self.buckets[slot].1
    }

    pub fn get(&self, key: &str) -> Option<&MeshBucket> {
        self.lookup.get(key).map(|&slot| &self.buckets[slot].1)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.lookup.clear();
    }

    /// 按创建顺序取出所有非空桶，并清空分区器
    pub fn drain_non_empty(&mut self) -> Vec<(String, MeshBucket)> {
        self.lookup.clear();
        std::mem::take(&mut self.buckets)
            .into_iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .collect()
    }
}
