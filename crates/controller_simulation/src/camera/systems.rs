//! Camera pivot systems (ECS host)
//!
//! - `init_camera_pivot`: clamp в конус при spawn, facing стартует с yaw pivot (аналог `_ready`)
//! - `apply_mouse_look`: MouseLookEvent → CameraPivot (аналог `_input`)

use bevy::prelude::*;

use super::CameraPivot;
use crate::components::{ControllerSettings, SpringPlayer};
use crate::locomotion::BodyFacing;
use crate::movement::MouseLookEvent;

/// Clamp начальной ориентации pivot в spring cone
///
/// # Schedule
/// - PreUpdate, до apply_mouse_look (Added<CameraPivot> = только что spawned)
pub fn init_camera_pivot(
    mut query: Query<
        (Entity, &mut CameraPivot, &mut BodyFacing, &ControllerSettings),
        Added<CameraPivot>,
    >,
) {
    for (entity, mut pivot, mut facing, settings) in query.iter_mut() {
        pivot.clamp_to_cone(settings.0.max_spring_rotation());
        facing.yaw = pivot.yaw();

        crate::logger::log(&format!(
            "Entity {:?}: camera pivot ready (euler = {:?})",
            entity,
            pivot.euler()
        ));
    }
}

/// Mouse look — каждый event поворачивает pivot и clamp'ит pitch
///
/// # Schedule
/// - PreUpdate (до FixedUpdate, чтобы tick видел свежий camera yaw)
pub fn apply_mouse_look(
    mut events: EventReader<MouseLookEvent>,
    mut player_query: Query<(&mut CameraPivot, &ControllerSettings), With<SpringPlayer>>,
) {
    let Ok((mut pivot, settings)) = player_query.single_mut() else {
        // Нет player → events просто сгорают
        events.clear();
        return;
    };

    let config = &settings.0;
    let cone = config.max_spring_rotation();

    for event in events.read() {
        pivot.apply_mouse_look(
            event.relative,
            config.sensitivity_h,
            config.sensitivity_v,
            cone,
        );
    }
}
