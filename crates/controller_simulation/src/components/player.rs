//! Player control marker + tuning

use bevy::prelude::*;

use crate::camera::CameraPivot;
use crate::config::ControllerConfig;
use crate::locomotion::BodyFacing;

use super::movement::{CharacterVelocity, Grounded, PendingLocomotion};

/// Marker component для spring-arm player (mouse look + WASD + jump)
///
/// Через Required Components автоматически получает всё состояние контроллера:
/// CameraPivot, BodyFacing, CharacterVelocity, Grounded, PendingLocomotion.
///
/// # Single-player
/// Input systems используют `single()` — ожидается ровно один SpringPlayer.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    ControllerSettings,
    CameraPivot,
    BodyFacing,
    CharacterVelocity,
    Grounded,
    PendingLocomotion,
    Transform
)]
pub struct SpringPlayer;

/// Tuning конкретного player (копия ControllerConfig на entity)
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ControllerSettings(pub ControllerConfig);
