//! Locomotion — один physics tick контроллера
//!
//! Порядок (как в CharacterBody3D `_physics_process`):
//! 1. В воздухе: `velocity += gravity * delta`
//! 2. Jump (just pressed + on floor): `velocity.y = jump_velocity`
//! 3. Input axis → direction в basis тела → поворот на camera yaw
//! 4. Есть direction: XZ = direction * speed, Body yaw → atan2(vx, vz) через lerp_angle
//!    Нет direction: XZ → 0 через move_toward (шаг = speed)
//!
//! Дальше caller отдаёт velocity в move-and-slide (Godot или headless).

use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::math::{lerp_angle, move_toward};

/// Snapshot input для одного physics tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct LocomotionInput {
    /// Movement axis (`Input.get_vector`): x вправо, y назад (Godot +Z)
    pub move_axis: Vec2,
    /// Jump action just pressed в этом tick
    pub jump_just_pressed: bool,
}

/// Yaw визуального Body (поворачивается к направлению движения)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BodyFacing {
    pub yaw: f32,
}

/// Окружение тела на момент tick (читается из physics backend)
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    pub on_floor: bool,
    pub gravity: Vec3,
    pub delta: f32,
    /// Ориентация CharacterBody (root) — input axis сначала в её basis
    pub body_rotation: Quat,
    /// Yaw CameraPivot (радианы)
    pub camera_yaw: f32,
}

/// Один physics tick: новая velocity + обновлённый facing
pub fn step(
    velocity: Vec3,
    input: LocomotionInput,
    ctx: TickContext,
    facing: &mut BodyFacing,
    config: &ControllerConfig,
) -> Vec3 {
    let mut next = velocity;

    if !ctx.on_floor {
        next += ctx.gravity * ctx.delta;
    }

    if input.jump_just_pressed && ctx.on_floor {
        next.y = config.jump_velocity;
    }

    let direction = movement_direction(input.move_axis, ctx.body_rotation, ctx.camera_yaw);

    if direction != Vec3::ZERO {
        next.x = direction.x * config.speed;
        next.z = direction.z * config.speed;

        let heading = next.x.atan2(next.z);
        facing.yaw = lerp_angle(facing.yaw, heading, config.facing_weight);
    } else {
        // Тормозим от velocity ДО этого tick (шаг = speed → почти всегда стоп за tick)
        next.x = move_toward(velocity.x, 0.0, config.speed);
        next.z = move_toward(velocity.z, 0.0, config.speed);
    }

    next
}

/// Input axis → world direction (normalized или ZERO)
///
/// Axis кладётся в плоскость XZ, поворачивается basis тела, нормализуется,
/// затем поворачивается вокруг +Y на yaw камеры.
pub fn movement_direction(move_axis: Vec2, body_rotation: Quat, camera_yaw: f32) -> Vec3 {
    let local = Vec3::new(move_axis.x, 0.0, move_axis.y);
    let direction = (body_rotation * local).normalize_or_zero();
    Quat::from_rotation_y(camera_yaw) * direction
}

/// 4 action strength → axis (семантика `Input.get_vector`)
///
/// x = right - left, y = down - up. Внутри deadzone → ZERO, длина ≤ 1.
pub fn input_vector(left: f32, right: f32, up: f32, down: f32, deadzone: f32) -> Vec2 {
    let raw = Vec2::new(right - left, down - up);
    let length = raw.length();

    if length <= deadzone {
        return Vec2::ZERO;
    }

    // Rescale (deadzone..1) → (0..1), как Godot
    let clamped = length.min(1.0);
    let scale = if deadzone < 1.0 {
        ((clamped - deadzone) / (1.0 - deadzone)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    raw / length * scale
}
