//! Godot builtin ↔ bevy::math конвертация
//!
//! Godot `real` = f32 (без feature double-precision), поэтому 1:1 копия полей.

use bevy::math::{Quat, Vec2, Vec3};
use godot::builtin::{Quaternion, Vector2, Vector3};

#[inline]
pub fn to_vec2(v: Vector2) -> Vec2 {
    Vec2::new(v.x, v.y)
}

#[inline]
pub fn to_vec3(v: Vector3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_vector3(v: Vec3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_quat(q: Quaternion) -> Quat {
    Quat::from_xyzw(q.x, q.y, q.z, q.w)
}
