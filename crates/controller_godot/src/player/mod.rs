//! Player module — SpringPlayer (CharacterBody3D GDExtension class)

pub mod controller;

pub use controller::SpringPlayer;
