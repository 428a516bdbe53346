//! Firstlook Core - Shared types for the first-person look controller
//!
//! This crate provides the foundational types used by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Transform for the camera's local placement
//! - The collaborator interfaces the controller drives (body rotation, collider)

pub mod rig;
pub mod types;

pub use glam::{Quat, Vec2, Vec3};
pub use rig::{BodyRotationSink, ColliderGeometry};
pub use types::Transform;
