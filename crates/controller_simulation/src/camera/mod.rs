//! Camera pivot (spring arm) — mouse look + clamp
//!
//! # Архитектура
//! - CameraPivot = Node3D над SpringArm/Camera, child of player body
//! - Rotation хранится как Quat, Euler раскладка YXZ (как Godot `Node3D.rotation`)
//! - Mouse motion: yaw вокруг parent Y, pitch вокруг parent X (left-multiply)
//!
//! # Clamp
//! - ready: все три оси в конус `max_spring_rotation` (roll 0° → обнуляется)
//! - каждый mouse event: только pitch (X), чтобы камера не переворачивалась

pub mod systems;

use bevy::prelude::*;

use crate::math::deg_to_rad;

pub use systems::*;

/// Ориентация CameraPivot относительно player body
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraPivot {
    pub rotation: Quat,
}

impl Default for CameraPivot {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraPivot {
    /// Pivot из Euler углов (радианы, x = pitch, y = yaw, z = roll)
    pub fn from_euler(euler: Vec3) -> Self {
        let mut pivot = Self::default();
        pivot.set_euler(euler);
        pivot
    }

    /// Euler углы (радианы), порядок YXZ
    pub fn euler(&self) -> Vec3 {
        let (yaw, pitch, roll) = self.rotation.to_euler(EulerRot::YXZ);
        Vec3::new(pitch, yaw, roll)
    }

    pub fn set_euler(&mut self, euler: Vec3) {
        self.rotation = Quat::from_euler(EulerRot::YXZ, euler.y, euler.x, euler.z);
    }

    /// Yaw (радианы) — используется для camera-relative movement
    pub fn yaw(&self) -> f32 {
        self.euler().y
    }

    pub fn pitch(&self) -> f32 {
        self.euler().x
    }

    /// Clamp всех осей в конус ±`max_degrees` (вызывается один раз в ready)
    pub fn clamp_to_cone(&mut self, max_degrees: Vec3) {
        let limit = max_radians(max_degrees);
        let euler = self.euler();
        self.set_euler(euler.clamp(-limit, limit));
    }

    /// Mouse look: yaw по `relative.x`, pitch по `relative.y`, clamp pitch
    ///
    /// Sensitivity в градусах за pixel. Мышь вправо/вниз → отрицательный угол.
    pub fn apply_mouse_look(
        &mut self,
        relative: Vec2,
        sensitivity_h: f32,
        sensitivity_v: f32,
        max_degrees: Vec3,
    ) {
        let yaw_delta = deg_to_rad(-relative.x * sensitivity_h);
        let pitch_delta = deg_to_rad(-relative.y * sensitivity_v);

        // Parent-space вращения: новый поворот слева
        self.rotation = Quat::from_rotation_y(yaw_delta) * self.rotation;
        self.rotation = Quat::from_rotation_x(pitch_delta) * self.rotation;

        let max_pitch = deg_to_rad(max_degrees.x);
        let mut euler = self.euler();
        euler.x = euler.x.clamp(-max_pitch, max_pitch);
        self.set_euler(euler);
    }
}

fn max_radians(max_degrees: Vec3) -> Vec3 {
    Vec3::new(
        deg_to_rad(max_degrees.x),
        deg_to_rad(max_degrees.y),
        deg_to_rad(max_degrees.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONE: Vec3 = Vec3::new(30.0, 30.0, 0.0);

    #[test]
    fn test_clamp_to_cone_limits_every_axis() {
        let mut pivot = CameraPivot::from_euler(Vec3::new(
            deg_to_rad(60.0),
            deg_to_rad(-45.0),
            deg_to_rad(10.0),
        ));

        pivot.clamp_to_cone(CONE);

        let euler = pivot.euler();
        assert!((euler.x - deg_to_rad(30.0)).abs() < 1e-4, "pitch = {}", euler.x);
        assert!((euler.y + deg_to_rad(30.0)).abs() < 1e-4, "yaw = {}", euler.y);
        assert!(euler.z.abs() < 1e-4, "roll = {}", euler.z);
    }

    #[test]
    fn test_clamp_to_cone_keeps_rotation_inside() {
        let inside = Vec3::new(deg_to_rad(10.0), deg_to_rad(-20.0), 0.0);
        let mut pivot = CameraPivot::from_euler(inside);

        pivot.clamp_to_cone(CONE);

        assert!((pivot.euler() - inside).length() < 1e-4);
    }

    #[test]
    fn test_mouse_right_turns_yaw_negative() {
        let mut pivot = CameraPivot::default();

        // 100 px вправо * 0.05 °/px = -5°
        pivot.apply_mouse_look(Vec2::new(100.0, 0.0), 0.05, 0.05, CONE);

        assert!((pivot.yaw() - deg_to_rad(-5.0)).abs() < 1e-4, "yaw = {}", pivot.yaw());
        assert!(pivot.pitch().abs() < 1e-5);
    }

    #[test]
    fn test_pitch_clamped_on_mouse_look() {
        let mut pivot = CameraPivot::default();

        // 10 * 200 px вниз * 0.05 = -100° суммарно → clamp до -30°
        for _ in 0..10 {
            pivot.apply_mouse_look(Vec2::new(0.0, 200.0), 0.05, 0.05, CONE);
        }

        assert!(
            (pivot.pitch() + deg_to_rad(30.0)).abs() < 1e-4,
            "pitch = {}",
            pivot.pitch()
        );
    }

    #[test]
    fn test_yaw_not_clamped_on_mouse_look() {
        let mut pivot = CameraPivot::default();

        // 90° влево — дальше конуса ready, но mouse look yaw свободен
        pivot.apply_mouse_look(Vec2::new(-1800.0, 0.0), 0.05, 0.05, CONE);

        assert!((pivot.yaw() - deg_to_rad(90.0)).abs() < 1e-3, "yaw = {}", pivot.yaw());
    }

    #[test]
    fn test_zero_sensitivity_ignores_motion() {
        let mut pivot = CameraPivot::default();

        pivot.apply_mouse_look(Vec2::new(500.0, -500.0), 0.0, 0.0, CONE);

        assert!(pivot.rotation.angle_between(Quat::IDENTITY) < 1e-5);
    }
}
