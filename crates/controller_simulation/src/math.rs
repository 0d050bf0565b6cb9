//! Scalar helpers (Godot-совместимая семантика)
//!
//! Повторяем поведение `Mathf.LerpAngle` / `Mathf.MoveToward`, чтобы headless
//! симуляция и GDExtension давали одинаковые числа.

use std::f32::consts::{PI, TAU};

/// Градусы → радианы
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Интерполяция угла по кратчайшей дуге
///
/// Разница `to - from` заворачивается в (-π, π], поэтому переход 170° → -170°
/// идёт через 180°, а не через 0°.
#[inline]
pub fn lerp_angle(from: f32, to: f32, weight: f32) -> f32 {
    let difference = (to - from) % TAU;
    let distance = (2.0 * difference) % TAU - difference;
    from + distance * weight
}

/// Шаг `from` к `to` не больше чем на `delta` (без перелёта)
#[inline]
pub fn move_toward(from: f32, to: f32, delta: f32) -> f32 {
    let diff = to - from;
    if diff.abs() <= delta {
        to
    } else {
        from + diff.signum() * delta
    }
}
