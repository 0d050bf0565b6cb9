//! ECS Components для spring-arm player
//!
//! - player: marker + tuning (SpringPlayer, ControllerSettings)
//! - movement: velocity, floor contact, input snapshot

pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use movement::*;
pub use player::*;
