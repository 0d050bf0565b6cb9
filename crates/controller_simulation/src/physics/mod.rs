//! Physics simulation module
//!
//! Kinematic контроллер, move-and-slide, гравитация.

pub mod movement;

// Re-export основных типов
pub use movement::{
    spawn_spring_player,
    ControllerPlugin,
    GravityField,
    GravityOverride,
    MovementBackend,
};
