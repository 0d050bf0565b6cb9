//! Headless soak run spring-arm контроллера
//!
//! Гоняет Bevy App без рендера со случайным (seeded) input:
//! mouse jitter, WASD, прыжки. Печатает позицию/pivot каждые 100 тиков.
//!
//! Usage: `controller_simulation [config.ron] [seed] [log_level]`
//!
//! log_level: debug | info | warn | error (default debug)

use std::path::PathBuf;

use bevy::prelude::*;
use controller_simulation::{
    create_headless_app, locomotion::input_vector, log_error, log_info, log_warning,
    set_log_level, CameraPivot, CharacterVelocity, ControllerConfig, ControllerSettings,
    DeterministicRng, Grounded, LocomotionInputEvent, LogLevel, MouseLookEvent, SpringPlayer,
};
use rand::Rng;

const TICK_COUNT: usize = 1000;

fn main() {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let log_level = args.next();

    controller_simulation::init_logger();
    if let Some(value) = log_level {
        match LogLevel::parse(&value) {
            Some(level) => set_log_level(level),
            None => log_warning(&format!("Unknown log level {:?}, keeping debug", value)),
        }
    }

    let config = match config_path {
        Some(path) => match ControllerConfig::load_or_default(&path) {
            Ok(config) => config,
            Err(e) => {
                log_error(&format!("{}", e));
                std::process::exit(1);
            }
        },
        None => ControllerConfig::default(),
    };

    let mut app = create_headless_app(seed);
    log_info(&format!(
        "Starting headless controller run (seed: {}, ticks: {})",
        seed, TICK_COUNT
    ));

    let player = app
        .world_mut()
        .spawn((
            SpringPlayer,
            ControllerSettings(config),
            Transform::from_xyz(0.0, 2.0, 0.0),
        ))
        .id();

    for tick in 0..TICK_COUNT {
        let (mouse, input) = random_input(app.world_mut());
        app.world_mut().send_event(mouse);
        app.world_mut().send_event(input);
        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let Some(transform) = world.get::<Transform>(player) else {
                log_error("SpringPlayer despawned during soak run");
                return;
            };
            let velocity = world.get::<CharacterVelocity>(player).map(|v| v.0).unwrap_or_default();
            let grounded = world.get::<Grounded>(player).is_some_and(|g| g.0);
            let pivot = world.get::<CameraPivot>(player).map(|p| p.euler()).unwrap_or_default();

            log_info(&format!(
                "Tick {}: pos {:.2?} vel {:.2?} grounded {} pivot {:.3?}",
                tick, transform.translation, velocity, grounded, pivot
            ));
        }
    }

    log_info("Headless run complete!");
}

/// Случайный кадр input (mouse motion + movement actions)
fn random_input(world: &mut World) -> (MouseLookEvent, LocomotionInputEvent) {
    let mut rng = world.resource_mut::<DeterministicRng>();
    let rng = &mut rng.rng;

    let relative = Vec2::new(rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0));

    let mut strength = || if rng.gen_bool(0.3) { 1.0 } else { 0.0 };
    let (left, right, up, down) = (strength(), strength(), strength(), strength());
    let move_axis = input_vector(left, right, up, down, 0.2);

    (
        MouseLookEvent { relative },
        LocomotionInputEvent {
            move_axis,
            jump: rng.gen_bool(0.02),
        },
    )
}
