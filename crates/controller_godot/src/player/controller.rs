//! SpringPlayer — CharacterBody3D с spring-arm камерой
//!
//! Сцена:
//! ```text
//! SpringPlayer (CharacterBody3D, этот класс)
//! ├─ CollisionShape3D
//! ├─ Body (Node3D, визуал — поворачивается к направлению движения)
//! └─ CameraPivot (Node3D)
//!    └─ SpringArm3D
//!       └─ Camera3D
//! ```
//!
//! Flow:
//! 1. ready(): находим CameraPivot/Body, capture mouse, clamp pivot в конус, facing = yaw pivot
//! 2. input(): InputEventMouseMotion → CameraPivot::apply_mouse_look
//! 3. physics_process(): locomotion::step → set_velocity → move_and_slide
//!
//! Вся арифметика в controller_simulation, здесь только Godot API.

use godot::classes::{
    input, CharacterBody3D, ICharacterBody3D, Input, InputEvent, InputEventMouseMotion, Node3D,
    ProjectSettings,
};
use godot::prelude::*;

use controller_simulation::locomotion::{self, BodyFacing, LocomotionInput, TickContext};
use controller_simulation::{CameraPivot, ControllerConfig};

use crate::shared::{to_quat, to_vec2, to_vec3, to_vector3};

const CAMERA_PIVOT_PATH: &str = "CameraPivot";
const BODY_PATH: &str = "Body";

/// Input map actions (built-in `ui_*` actions Godot проекта)
struct ActionNames {
    left: StringName,
    right: StringName,
    up: StringName,
    down: StringName,
    jump: StringName,
}

impl Default for ActionNames {
    fn default() -> Self {
        Self {
            left: StringName::from("ui_left"),
            right: StringName::from("ui_right"),
            up: StringName::from("ui_up"),
            down: StringName::from("ui_down"),
            jump: StringName::from("ui_accept"),
        }
    }
}

#[derive(GodotClass)]
#[class(base=CharacterBody3D)]
pub struct SpringPlayer {
    /// Горизонтальная mouse sensitivity (°/px)
    #[export(range = (0.0, 0.5))]
    camera_sensitivity_h: f32,

    /// Вертикальная mouse sensitivity (°/px)
    #[export(range = (0.0, 0.5))]
    camera_sensitivity_v: f32,

    /// Опциональный RON файл с tuning (speed, jump, cone, facing)
    #[export(file = "*.ron")]
    config_path: GString,

    config: ControllerConfig,
    actions: ActionNames,

    // Node references (cached in ready)
    camera_pivot: Option<Gd<Node3D>>,
    body: Option<Gd<Node3D>>,

    facing: BodyFacing,

    base: Base<CharacterBody3D>,
}

#[godot_api]
impl ICharacterBody3D for SpringPlayer {
    fn init(base: Base<CharacterBody3D>) -> Self {
        let config = ControllerConfig::default();

        Self {
            camera_sensitivity_h: config.sensitivity_h,
            camera_sensitivity_v: config.sensitivity_v,
            config_path: GString::new(),
            config,
            actions: ActionNames::default(),
            camera_pivot: None,
            body: None,
            facing: BodyFacing::default(),
            base,
        }
    }

    fn ready(&mut self) {
        self.load_config();

        let Some(mut camera_pivot) = self.base().try_get_node_as::<Node3D>(CAMERA_PIVOT_PATH) else {
            controller_simulation::log_error(
                "SpringPlayer: CameraPivot not found! Check scene structure (controller disabled).",
            );
            return;
        };
        let Some(body) = self.base().try_get_node_as::<Node3D>(BODY_PATH) else {
            controller_simulation::log_error(
                "SpringPlayer: Body not found! Check scene structure (controller disabled).",
            );
            return;
        };

        Input::singleton().set_mouse_mode(input::MouseMode::CAPTURED);

        // Clamp начальной ориентации pivot в конус; Body довернётся от yaw камеры
        let mut pivot = CameraPivot::from_euler(to_vec3(camera_pivot.get_rotation()));
        pivot.clamp_to_cone(self.config.max_spring_rotation());
        camera_pivot.set_rotation(to_vector3(pivot.euler()));
        self.facing = BodyFacing { yaw: pivot.yaw() };

        self.camera_pivot = Some(camera_pivot);
        self.body = Some(body);

        controller_simulation::log("SpringPlayer ready (mouse captured)");
    }

    fn input(&mut self, event: Gd<InputEvent>) {
        let Ok(motion) = event.try_cast::<InputEventMouseMotion>() else {
            return;
        };
        let Some(mut camera_pivot) = self.camera_pivot.clone() else {
            return;
        };

        let mut pivot = CameraPivot::from_euler(to_vec3(camera_pivot.get_rotation()));
        pivot.apply_mouse_look(
            to_vec2(motion.get_relative()),
            self.camera_sensitivity_h,
            self.camera_sensitivity_v,
            self.config.max_spring_rotation(),
        );
        camera_pivot.set_rotation(to_vector3(pivot.euler()));
    }

    fn physics_process(&mut self, delta: f64) {
        let (Some(camera_pivot), Some(mut body)) = (self.camera_pivot.clone(), self.body.clone())
        else {
            return;
        };

        let input = Input::singleton();
        let actions = &self.actions;
        let locomotion_input = LocomotionInput {
            move_axis: to_vec2(input.get_vector(
                &actions.left,
                &actions.right,
                &actions.up,
                &actions.down,
            )),
            jump_just_pressed: input.is_action_just_pressed(&actions.jump),
        };

        let ctx = TickContext {
            on_floor: self.base().is_on_floor(),
            gravity: to_vec3(self.base().get_gravity()),
            delta: delta as f32,
            body_rotation: to_quat(self.base().get_quaternion()),
            camera_yaw: camera_pivot.get_rotation().y,
        };

        let velocity = to_vec3(self.base().get_velocity());
        let previous_yaw = self.facing.yaw;
        let next = locomotion::step(velocity, locomotion_input, ctx, &mut self.facing, &self.config);

        if self.facing.yaw != previous_yaw {
            let mut rotation = body.get_rotation();
            rotation.y = self.facing.yaw;
            body.set_rotation(rotation);
        }

        self.base_mut().set_velocity(to_vector3(next));
        self.base_mut().move_and_slide();
    }
}

#[godot_api]
impl SpringPlayer {
    /// Перечитать `config_path` (например после правки файла в редакторе)
    #[func]
    fn reload_config(&mut self) {
        self.load_config();
    }

    /// Текущий yaw CameraPivot (радианы) — для HUD/компаса
    #[func]
    fn get_camera_yaw(&self) -> f32 {
        self.camera_pivot
            .as_ref()
            .map(|pivot| pivot.get_rotation().y)
            .unwrap_or(0.0)
    }
}

impl SpringPlayer {
    /// Загрузка RON config; ошибки логируем и оставляем текущие значения
    ///
    /// Sensitivity из файла переписывает exports, дальше exports — источник правды
    /// (можно крутить в инспекторе на лету).
    fn load_config(&mut self) {
        if self.config_path.is_empty() {
            self.sync_sensitivities();
            return;
        }

        let path = ProjectSettings::singleton().globalize_path(&self.config_path);
        let path = std::path::PathBuf::from(path.to_string());

        match ControllerConfig::load(&path) {
            Ok(config) => {
                self.camera_sensitivity_h = config.sensitivity_h;
                self.camera_sensitivity_v = config.sensitivity_v;
                self.config = config;
                controller_simulation::log_info(&format!(
                    "SpringPlayer: config loaded from {:?}",
                    path
                ));
            }
            Err(e) => {
                controller_simulation::log_error(&format!(
                    "SpringPlayer: {} ({:?}), keeping current tuning",
                    e, path
                ));
                self.sync_sensitivities();
            }
        }
    }

    fn sync_sensitivities(&mut self) {
        self.config.sensitivity_h = self.camera_sensitivity_h;
        self.config.sensitivity_v = self.camera_sensitivity_v;
        self.config.clamp_sensitivities();
        self.camera_sensitivity_h = self.config.sensitivity_h;
        self.camera_sensitivity_v = self.config.sensitivity_v;
    }
}

