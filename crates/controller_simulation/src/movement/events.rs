//! Input events (host → ECS)

use bevy::prelude::*;

/// Event: mouse motion (pixels, как `InputEventMouseMotion.relative`)
///
/// Обрабатывается `apply_mouse_look` — по одному повороту pivot на event.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct MouseLookEvent {
    pub relative: Vec2,
}

/// Event: состояние movement actions за кадр
///
/// Генерируется host'ом (Godot Input / headless driver).
/// Последний event кадра задаёт axis, любой jump=true латчится.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LocomotionInputEvent {
    /// Movement axis (x вправо, y назад), длина ≤ 1
    pub move_axis: Vec2,
    /// Jump action just pressed
    pub jump: bool,
}
