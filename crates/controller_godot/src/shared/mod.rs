//! Shared helpers для Godot слоя

pub mod convert;

pub use convert::*;
