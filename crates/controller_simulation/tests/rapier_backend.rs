//! Rapier backend integration test
//!
//! Headless App + RapierPhysicsPlugin (fixed schedule) + KinematicCharacterController.
//! Пол: cuboid с верхней гранью на y = 0, capsule player стоит на y ≈ 0.9.
//!
//! Проверяем:
//! - Приземление: Grounded из KCC output, velocity.y гасится
//! - Ходьба ~5m за 60 tick
//! - Прыжок + приземление
//! - Дистанция не зависит от числа tick'ов за кадр

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use controller_simulation::*;

/// Центр capsule над полом: half_height 0.5 + radius 0.4
const STANDING_HEIGHT: f32 = 0.9;

fn spawn_ground(app: &mut App) {
    app.world_mut().spawn((
        Collider::cuboid(50.0, 0.5, 50.0),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));
}

fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    let world = app.world_mut();
    let entity = spawn_spring_player(&mut world.commands(), position, ControllerConfig::default());
    world.flush();
    entity
}

fn run_updates(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<Transform>(entity).unwrap().translation
}

fn grounded(app: &App, entity: Entity) -> bool {
    app.world().get::<Grounded>(entity).unwrap().0
}

fn send_move(app: &mut App, move_axis: Vec2, jump: bool) {
    app.world_mut()
        .send_event(LocomotionInputEvent { move_axis, jump });
}

/// App + пол + player, уже стоящий на полу
fn settled_app(ticks_per_update: u32) -> (App, Entity) {
    let mut app = create_headless_rapier_app(1, ticks_per_update);
    spawn_ground(&mut app);
    let player = spawn_player(&mut app, Vec3::new(0.0, STANDING_HEIGHT + 0.5, 0.0));

    run_updates(&mut app, 120 / ticks_per_update as usize);
    assert!(grounded(&app, player), "player must settle on the ground");

    (app, player)
}

#[test]
fn test_rapier_player_settles_on_ground() {
    let (app, player) = settled_app(1);

    let height = translation(&app, player).y;
    assert!(
        (height - STANDING_HEIGHT).abs() < 0.1,
        "height = {}",
        height
    );

    // Grounded → падение погашено, гравитация не копится
    let velocity = app.world().get::<CharacterVelocity>(player).unwrap().0;
    assert!(velocity.y.abs() < 0.2, "vy = {}", velocity.y);
}

#[test]
fn test_rapier_player_walks_forward() {
    let (mut app, player) = settled_app(1);
    let start = translation(&app, player);

    send_move(&mut app, Vec2::new(0.0, -1.0), false);
    run_updates(&mut app, 60);

    let travelled = translation(&app, player) - start;
    assert!(
        travelled.z < -4.5 && travelled.z > -5.5,
        "z = {}",
        travelled.z
    );
    assert!(travelled.x.abs() < 0.05, "x = {}", travelled.x);
    assert!(grounded(&app, player));
}

#[test]
fn test_rapier_jump_and_land() {
    let (mut app, player) = settled_app(1);
    let floor = translation(&app, player).y;

    send_move(&mut app, Vec2::ZERO, true);

    // Пик прыжка 4.5²/(2*9.8) ≈ 1.03m над полом
    let mut peak = floor;
    let mut left_ground = false;
    for _ in 0..120 {
        app.update();
        peak = peak.max(translation(&app, player).y);
        left_ground |= !grounded(&app, player);
    }

    assert!(left_ground, "jump must leave the ground");
    let rise = peak - floor;
    assert!(rise > 0.8 && rise < 1.4, "rise = {}", rise);
    assert!(grounded(&app, player));
    assert!((translation(&app, player).y - floor).abs() < 0.1);
}

#[test]
fn test_rapier_distance_independent_of_frame_rate() {
    let walk = |ticks_per_update: u32| {
        let (mut app, player) = settled_app(ticks_per_update);
        let start = translation(&app, player);

        send_move(&mut app, Vec2::new(1.0, 0.0), false);
        run_updates(&mut app, 60 / ticks_per_update as usize);

        translation(&app, player).x - start.x
    };

    let at_60fps = walk(1);
    let at_30fps = walk(2);

    assert!(at_60fps > 4.5, "60fps = {}", at_60fps);
    assert!(
        (at_60fps - at_30fps).abs() < 0.3,
        "60fps = {}, 30fps = {}",
        at_60fps,
        at_30fps
    );
}
