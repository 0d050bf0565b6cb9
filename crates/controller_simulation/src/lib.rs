//! Spring-arm player controller — simulation core
//!
//! Engine-independent ядро контроллера: mouse look с clamp'ом pivot,
//! гравитация, прыжок, camera-relative движение, плавный поворот Body.
//!
//! HYBRID ARCHITECTURE:
//! - core = math/config/locomotion (чистые функции, тестируются без движка)
//! - Godot = CharacterBody3D, move_and_slide, Input (controller_godot)
//! - Bevy ECS = headless host того же ядра (тесты, soak driver)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod camera;
pub mod components;
pub mod config;
pub mod locomotion;
pub mod logger;
pub mod math;
pub mod movement;
pub mod physics;

// Re-export базовых типов для удобства
pub use camera::CameraPivot;
pub use components::*;
pub use config::{ConfigError, ControllerConfig};
pub use locomotion::{BodyFacing, LocomotionInput, TickContext};
pub use logger::*;
pub use movement::{LocomotionInputEvent, MouseLookEvent};
pub use physics::{
    spawn_spring_player, ControllerPlugin, GravityField, GravityOverride, MovementBackend,
};

/// Частота physics tick (как Godot `physics/common/physics_ticks_per_second`)
pub const PHYSICS_TICKS_PER_SECOND: f64 = 60.0;

/// Главный plugin симуляции (fixed timestep + controller)
///
/// Для `MovementBackend::Rapier` сам добавляет RapierPhysicsPlugin в fixed
/// schedule: KCC должен применять translation каждый tick, а не раз в кадр.
#[derive(Default)]
pub struct SimulationPlugin {
    pub backend: MovementBackend,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для physics tick
            .insert_resource(Time::<Fixed>::from_hz(PHYSICS_TICKS_PER_SECOND))
            .add_plugins(ControllerPlugin {
                backend: self.backend,
            });

        if self.backend == MovementBackend::Rapier {
            app.add_plugins(rapier_plugin());
        }
    }
}

/// Rapier в FixedPostUpdate — сразу после нашего FixedUpdate tick
pub fn rapier_plugin() -> RapierPhysicsPlugin<NoUserData> {
    RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule()
}

/// Детерминистичный RNG resource (seeded) для soak driver
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт вручную: один `app.update()` = ровно один physics tick.
pub fn create_headless_app(seed: u64) -> App {
    create_app(seed, MovementBackend::default(), 1)
}

/// Headless App с Rapier backend (коллизии через KinematicCharacterController)
///
/// `ticks_per_update` — сколько physics tick'ов в одном `app.update()`
/// (2 = рендер 30fps при физике 60Hz).
pub fn create_headless_rapier_app(seed: u64, ticks_per_update: u32) -> App {
    create_app(seed, MovementBackend::Rapier, ticks_per_update)
}

fn create_app(seed: u64, backend: MovementBackend, ticks_per_update: u32) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins);

    // Rapier читает GlobalTransform коллайдеров
    if backend == MovementBackend::Rapier {
        app.add_plugins(TransformPlugin);
    }

    app.add_plugins(SimulationPlugin { backend })
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            ticks_per_update.max(1) as f64 / PHYSICS_TICKS_PER_SECOND,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
