//! Kinematic character body with a capsule collider

use firstlook_core::{BodyRotationSink, ColliderGeometry};
use glam::{Quat, Vec3};
use nalgebra::{Isometry3, Translation3};
use rapier3d::prelude::*;
use tracing::debug;

use crate::convert::{quat_from_na, quat_to_na, vec3_from_na, vec3_to_na};
use crate::{PhysicsError, PhysicsWorld};

/// Smallest capsule half-height rapier is given when the collider shrinks
const MIN_HALF_HEIGHT: f32 = 0.01;

/// Character body configuration
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
        }
    }
}

impl CharacterBodyConfig {
    /// Shortest total height the capsule can be built at
    pub fn min_collider_height(&self) -> f32 {
        2.0 * (self.radius + MIN_HALF_HEIGHT)
    }

    /// Reject a collider height the capsule cannot take.
    ///
    /// Below the minimum the shape would be rebuilt taller than asked while
    /// its center still moves by the full requested change.
    pub fn check_collider_height(&self, height: f32) -> Result<(), PhysicsError> {
        let min = self.min_collider_height();
        if height >= min {
            Ok(())
        } else {
            Err(PhysicsError::ColliderTooShort { height, min })
        }
    }
}

/// A character body living in the physics world
#[derive(Debug, Clone, Default)]
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// Rigid body handle, once spawned
    pub body_handle: Option<RigidBodyHandle>,
    /// Capsule collider handle, once spawned
    pub collider_handle: Option<ColliderHandle>,
}

impl CharacterBody {
    /// Create a character body with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a character body with custom config
    pub fn with_config(config: CharacterBodyConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Spawn the body in the physics world.
    ///
    /// The capsule is parented to a kinematic position-based body and
    /// centered half its height above the body origin.
    pub fn spawn(
        &mut self,
        physics: &mut PhysicsWorld,
        position: Vec3,
        rotation: Quat,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = RigidBodyBuilder::kinematic_position_based()
            .position(Isometry3::from_parts(
                Translation3::new(position.x, position.y, position.z),
                quat_to_na(rotation),
            ))
            .can_sleep(false)
            .build();

        let half_height = capsule_half_height(self.config.height, self.config.radius);
        let collider = ColliderBuilder::capsule_y(half_height, self.config.radius)
            .translation(vector![0.0, self.config.height / 2.0, 0.0])
            .friction(0.0)
            .restitution(0.0)
            .build();

        let (body_handle, collider_handle) = physics.insert_attached(body, collider);
        self.body_handle = Some(body_handle);
        self.collider_handle = Some(collider_handle);
        debug!(?position, height = self.config.height, "character body spawned");
        (body_handle, collider_handle)
    }

    /// Borrow the spawned body as a rig the look controller can drive
    pub fn rig<'w>(&self, physics: &'w mut PhysicsWorld) -> Result<CharacterRig<'w>, PhysicsError> {
        let (Some(body), Some(collider)) = (self.body_handle, self.collider_handle) else {
            return Err(PhysicsError::NotSpawned);
        };
        CharacterRig::new(physics, body, collider)
    }
}

fn capsule_half_height(height: f32, radius: f32) -> f32 {
    ((height - 2.0 * radius) / 2.0).max(MIN_HALF_HEIGHT)
}

/// Exclusive view over one character's body and capsule collider.
///
/// Rotation requests are staged as the body's next kinematic rotation and
/// become visible after the next [`PhysicsWorld::step`].
pub struct CharacterRig<'w> {
    world: &'w mut PhysicsWorld,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    radius: f32,
}

impl<'w> CharacterRig<'w> {
    /// Bind a body/collider pair, failing if either is missing or the
    /// collider is not a capsule attached to the body
    pub fn new(
        world: &'w mut PhysicsWorld,
        body: RigidBodyHandle,
        collider: ColliderHandle,
    ) -> Result<Self, PhysicsError> {
        if !world.bodies.contains(body) {
            return Err(PhysicsError::MissingBody(body));
        }
        let attached = world
            .colliders
            .get(collider)
            .ok_or(PhysicsError::MissingCollider(collider))?;
        if attached.parent() != Some(body) {
            return Err(PhysicsError::Detached { collider, body });
        }
        let radius = attached
            .shape()
            .as_capsule()
            .map(|capsule| capsule.radius)
            .ok_or(PhysicsError::NotACapsule(collider))?;

        Ok(Self {
            world,
            body,
            collider,
            radius,
        })
    }
}

impl BodyRotationSink for CharacterRig<'_> {
    fn body_rotation(&self) -> Quat {
        self.world
            .bodies
            .get(self.body)
            .map_or(Quat::IDENTITY, |body| quat_from_na(body.rotation()))
    }

    fn request_body_rotation(&mut self, rotation: Quat) {
        if let Some(body) = self.world.bodies.get_mut(self.body) {
            body.set_next_kinematic_rotation(quat_to_na(rotation));
            body.wake_up(true);
        }
    }
}

impl ColliderGeometry for CharacterRig<'_> {
    fn collider_height(&self) -> f32 {
        self.world
            .colliders
            .get(self.collider)
            .and_then(|collider| collider.shape().as_capsule())
            .map_or(0.0, |capsule| capsule.height() + 2.0 * capsule.radius)
    }

    fn collider_center(&self) -> Vec3 {
        self.world
            .colliders
            .get(self.collider)
            .and_then(|collider| collider.position_wrt_parent())
            .map_or(Vec3::ZERO, |pos| vec3_from_na(&pos.translation.vector))
    }

    /// Heights under [`CharacterBodyConfig::min_collider_height`] are
    /// raised to it; check configured heights up front.
    fn set_collider_height(&mut self, height: f32) {
        let half_height = capsule_half_height(height, self.radius);
        if let Some(collider) = self.world.colliders.get_mut(self.collider) {
            collider.set_shape(SharedShape::capsule_y(half_height, self.radius));
        }
    }

    fn set_collider_center(&mut self, center: Vec3) {
        if let Some(collider) = self.world.colliders.get_mut(self.collider) {
            collider.set_translation_wrt_parent(vec3_to_na(center));
        }
    }
}
