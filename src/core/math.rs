//! 数学类型模块
//!
//! 基于 `nalgebra` 的简洁类型别名，以及加载管线使用的少量辅助函数。

pub use nalgebra::{Matrix4 as Mat4, Vector3 as Vec3};

// 类型别名，使用更简洁的名称
pub type Vector3 = Vec3<f32>;
pub type Matrix4 = Mat4<f32>;

/// 角度转弧度
pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

/// 从顶点数组字段构造向量
#[inline]
pub fn vec3_from(a: [f32; 3]) -> Vector3 {
    Vector3::new(a[0], a[1], a[2])
}
