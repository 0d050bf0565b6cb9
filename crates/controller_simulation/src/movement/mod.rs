//! Movement domain — input events
//!
//! Содержит:
//! - MouseLookEvent (mouse motion → CameraPivot)
//! - LocomotionInputEvent (axis + jump → PendingLocomotion)

pub mod events;

pub use events::*;
