//! Movement компоненты: velocity, floor contact, input snapshot

use bevy::prelude::*;

use crate::locomotion::LocomotionInput;

/// Velocity CharacterBody (m/s), мутируется каждый physics tick
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterVelocity(pub Vec3);

/// Контакт с полом по результату последнего move-and-slide
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Grounded(pub bool);

/// Последний input snapshot для следующего physics tick
///
/// Jump латчится: нажатие между tick'ами не теряется,
/// но потребляется ровно одним tick (семантика "just pressed").
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PendingLocomotion {
    pub move_axis: Vec2,
    pub jump_latched: bool,
}

impl PendingLocomotion {
    /// Забрать input для tick (jump сбрасывается)
    pub fn take(&mut self) -> LocomotionInput {
        let input = LocomotionInput {
            move_axis: self.move_axis,
            jump_just_pressed: self.jump_latched,
        };
        self.jump_latched = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes_jump_once() {
        let mut pending = PendingLocomotion {
            move_axis: Vec2::new(0.0, -1.0),
            jump_latched: true,
        };

        let first = pending.take();
        assert!(first.jump_just_pressed);
        assert_eq!(first.move_axis, Vec2::new(0.0, -1.0));

        let second = pending.take();
        assert!(!second.jump_just_pressed);
        // Axis держится пока не придёт новый input
        assert_eq!(second.move_axis, Vec2::new(0.0, -1.0));
    }
}
