//! Kinematic контроллер spring-arm player (ECS host)
//!
//! Архитектура:
//! - Velocity интегрируем сами (`locomotion::step`), не через Rapier forces
//! - Move-and-slide backend:
//!   - Headless: плоский пол на `floor_y`, приземление гасит падение
//!   - Rapier: KinematicCharacterController (slide + snap to ground)
//!
//! Детерминизм: fixed timestep 60Hz, input латчится до ближайшего tick.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::camera::{apply_mouse_look, init_camera_pivot, CameraPivot};
use crate::components::{
    CharacterVelocity, ControllerSettings, Grounded, PendingLocomotion, SpringPlayer,
};
use crate::config::ControllerConfig;
use crate::locomotion::{self, BodyFacing, TickContext};
use crate::movement::{LocomotionInputEvent, MouseLookEvent};

/// Мировая гравитация host'а (m/s²), аналог project setting `physics/3d/default_gravity`
///
/// Resource опционален: без него каждый player падает с `ControllerConfig::gravity`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GravityField(pub Vec3);

/// Локальная гравитация для entity (аналог Area3D gravity override)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GravityOverride(pub Vec3);

/// Чем разрешаем коллизии после интеграции velocity
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub enum MovementBackend {
    /// Без Rapier: бесконечный пол на высоте `floor_y`
    Headless { floor_y: f32 },
    /// Rapier KinematicCharacterController
    ///
    /// RapierPhysicsPlugin обязан жить в fixed schedule (`rapier_plugin()`):
    /// иначе при нескольких tick'ах за кадр KCC применит только последний translation.
    Rapier,
}

impl Default for MovementBackend {
    fn default() -> Self {
        Self::Headless { floor_y: 0.0 }
    }
}

fn headless_backend(backend: Res<MovementBackend>) -> bool {
    matches!(*backend, MovementBackend::Headless { .. })
}

fn rapier_backend(backend: Res<MovementBackend>) -> bool {
    matches!(*backend, MovementBackend::Rapier)
}

/// LocomotionInputEvent → PendingLocomotion
///
/// Последний event кадра задаёт axis, jump латчится до tick.
///
/// # Schedule
/// - PreUpdate (FixedUpdate идёт раньше Update в Main schedule)
pub fn collect_locomotion_input(
    mut events: EventReader<LocomotionInputEvent>,
    mut player_query: Query<&mut PendingLocomotion, With<SpringPlayer>>,
) {
    let Ok(mut pending) = player_query.single_mut() else {
        events.clear();
        return;
    };

    for event in events.read() {
        pending.move_axis = if !event.move_axis.is_finite() {
            Vec2::ZERO
        } else {
            event.move_axis.clamp_length_max(1.0)
        };
        pending.jump_latched |= event.jump;
    }
}

/// Physics tick: gravity + jump + camera-relative movement + facing
///
/// Работает в FixedUpdate (60Hz). Grounded = результат предыдущего slide.
pub fn integrate_locomotion(
    mut query: Query<
        (
            &ControllerSettings,
            &CameraPivot,
            &Transform,
            &Grounded,
            Option<&GravityOverride>,
            &mut PendingLocomotion,
            &mut BodyFacing,
            &mut CharacterVelocity,
        ),
        With<SpringPlayer>,
    >,
    gravity_field: Option<Res<GravityField>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (settings, pivot, transform, grounded, gravity_override, mut pending, mut facing, mut velocity) in
        query.iter_mut()
    {
        let input = pending.take();
        let ctx = TickContext {
            on_floor: grounded.0,
            gravity: resolve_gravity(gravity_override, gravity_field.as_deref(), &settings.0),
            delta,
            body_rotation: transform.rotation,
            camera_yaw: pivot.yaw(),
        };

        if input.jump_just_pressed && ctx.on_floor {
            crate::logger::log(&format!(
                "SpringPlayer: jump! velocity.y = {:.1} m/s",
                settings.0.jump_velocity
            ));
        }

        velocity.0 = locomotion::step(velocity.0, input, ctx, &mut facing, &settings.0);
    }
}

/// Приоритет: GravityOverride entity → GravityField host'а → config fallback
fn resolve_gravity(
    gravity_override: Option<&GravityOverride>,
    gravity_field: Option<&GravityField>,
    config: &ControllerConfig,
) -> Vec3 {
    gravity_override
        .map(|g| g.0)
        .or(gravity_field.map(|g| g.0))
        .unwrap_or_else(|| config.gravity())
}

/// Headless move-and-slide: интеграция position + плоский пол
///
/// Приземление: y clamp на floor_y, отрицательная velocity.y → 0.
pub fn move_and_slide_headless(
    mut query: Query<(&mut Transform, &mut CharacterVelocity, &mut Grounded), With<SpringPlayer>>,
    backend: Res<MovementBackend>,
    time: Res<Time<Fixed>>,
) {
    let MovementBackend::Headless { floor_y } = *backend else {
        return;
    };
    let delta = time.delta_secs();

    for (mut transform, mut velocity, mut grounded) in query.iter_mut() {
        transform.translation += velocity.0 * delta;

        if transform.translation.y <= floor_y {
            if !grounded.0 && velocity.0.y < 0.0 {
                crate::logger::log(&format!(
                    "SpringPlayer: landed (impact {:.2} m/s)",
                    -velocity.0.y
                ));
            }
            transform.translation.y = floor_y;
            velocity.0.y = velocity.0.y.max(0.0);
            grounded.0 = true;
        } else {
            grounded.0 = false;
        }
    }
}

/// Rapier: результат предыдущего move → Grounded (+ гасим падение на полу)
pub fn read_rapier_controller_output(
    mut query: Query<
        (&KinematicCharacterControllerOutput, &mut CharacterVelocity, &mut Grounded),
        With<SpringPlayer>,
    >,
) {
    for (output, mut velocity, mut grounded) in query.iter_mut() {
        grounded.0 = output.grounded;
        if output.grounded && velocity.0.y < 0.0 {
            velocity.0.y = 0.0;
        }
    }
}

/// Rapier: velocity * dt → KinematicCharacterController.translation
pub fn drive_rapier_controller(
    mut query: Query<(&CharacterVelocity, &mut KinematicCharacterController), With<SpringPlayer>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (velocity, mut controller) in query.iter_mut() {
        controller.translation = Some(velocity.0 * delta);
    }
}

/// Plugin spring-arm контроллера
///
/// Input/mouse look в PreUpdate, physics tick в FixedUpdate.
#[derive(Default)]
pub struct ControllerPlugin {
    pub backend: MovementBackend,
}

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MouseLookEvent>()
            .add_event::<LocomotionInputEvent>()
            .insert_resource(self.backend)
            .register_type::<CameraPivot>()
            .register_type::<BodyFacing>()
            .register_type::<CharacterVelocity>()
            .register_type::<Grounded>()
            .register_type::<PendingLocomotion>()
            .register_type::<GravityOverride>();

        app.add_systems(
            PreUpdate,
            (init_camera_pivot, apply_mouse_look, collect_locomotion_input).chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                read_rapier_controller_output.run_if(rapier_backend),
                integrate_locomotion,
                move_and_slide_headless.run_if(headless_backend),
                drive_rapier_controller.run_if(rapier_backend),
            )
                .chain(),
        );
    }
}

/// Spawn helper для spring-arm player
///
/// Создает entity с полным набором компонентов:
/// - SpringPlayer (+ required: pivot, facing, velocity, grounded, input)
/// - ControllerSettings из config
/// - Rapier: KinematicPositionBased + capsule + KinematicCharacterController
pub fn spawn_spring_player(
    commands: &mut Commands,
    position: Vec3,
    config: ControllerConfig,
) -> Entity {
    commands
        .spawn((
            SpringPlayer,
            ControllerSettings(config),
            Transform::from_translation(position),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.4), // Высота 1.8m (0.5 + 0.5 + 2 * 0.4), радиус 0.4m
            KinematicCharacterController::default(),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_is_headless_floor_zero() {
        assert_eq!(
            MovementBackend::default(),
            MovementBackend::Headless { floor_y: 0.0 }
        );
    }

    #[test]
    fn test_spawn_spring_player_has_full_controller_state() {
        let mut world = World::new();
        let config = ControllerConfig {
            speed: 7.0,
            ..default()
        };

        let entity = spawn_spring_player(&mut world.commands(), Vec3::new(0.0, 1.0, 0.0), config);
        world.flush();

        assert!(world.get::<SpringPlayer>(entity).is_some());
        assert!(world.get::<CameraPivot>(entity).is_some());
        assert!(world.get::<PendingLocomotion>(entity).is_some());
        assert!(world.get::<KinematicCharacterController>(entity).is_some());
        assert_eq!(world.get::<ControllerSettings>(entity).unwrap().0.speed, 7.0);
        assert_eq!(
            world.get::<Transform>(entity).unwrap().translation,
            Vec3::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn test_gravity_priority() {
        let config = ControllerConfig {
            gravity: [0.0, -20.0, 0.0],
            ..default()
        };
        let field = GravityField(Vec3::new(0.0, -5.0, 0.0));
        let local = GravityOverride(Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(resolve_gravity(None, None, &config), Vec3::new(0.0, -20.0, 0.0));
        assert_eq!(resolve_gravity(None, Some(&field), &config), field.0);
        assert_eq!(resolve_gravity(Some(&local), Some(&field), &config), local.0);
    }
}
