//! Firstlook Physics - Character collaborators backed by rapier3d
//!
//! The world holds kinematic character bodies only. Nothing is simulated
//! under gravity; a step exists to commit the rotations the bodies were
//! asked for since the previous step.

mod character_body;
mod convert;
mod error;

pub use character_body::{CharacterBody, CharacterBodyConfig, CharacterRig};
pub use error::PhysicsError;

use rapier3d::prelude::*;

/// Commit rate used by [`PhysicsWorld::new`]: one step per 60 Hz frame
pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Rapier world for kinematic character bodies
pub struct PhysicsWorld {
    timestep: f32,

    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,

    // Pipeline state rapier needs to step, unused between steps
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd: CCDSolver,
}

impl PhysicsWorld {
    /// Create a world stepped at [`DEFAULT_TIMESTEP`]
    pub fn new() -> Self {
        Self::with_timestep(DEFAULT_TIMESTEP)
    }

    /// Create a world stepped at `timestep` seconds
    pub fn with_timestep(timestep: f32) -> Self {
        let params = IntegrationParameters {
            dt: timestep,
            ..IntegrationParameters::default()
        };

        Self {
            timestep,
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd: CCDSolver::new(),
        }
    }

    /// Seconds covered by one [`PhysicsWorld::step`]
    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Commit every pending kinematic rotation request.
    ///
    /// Kinematic position-based bodies move to their next position during
    /// the step, so a rotation requested through a [`CharacterRig`] is
    /// visible only after this call.
    pub fn step(&mut self) {
        self.pipeline.step(
            &Vector::zeros(),
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }

    /// Insert a body with its collider attached
    pub(crate) fn insert_attached(
        &mut self,
        body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body_handle = self.bodies.insert(body);
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);
        (body_handle, collider_handle)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timestep() {
        assert_eq!(PhysicsWorld::new().timestep(), 1.0 / 60.0);
        assert_eq!(PhysicsWorld::with_timestep(0.01).timestep(), 0.01);
    }

    #[test]
    fn test_step_leaves_kinematic_body_in_place() {
        let mut world = PhysicsWorld::new();
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(vector![0.0, 2.0, 0.0])
            .build();
        let (handle, _) = world.insert_attached(body, ColliderBuilder::ball(0.5).build());

        for _ in 0..120 {
            world.step();
        }
        let body = &world.bodies[handle];
        assert_eq!(body.translation().y, 2.0);
    }

    #[test]
    fn test_attached_collider_has_parent() {
        let mut world = PhysicsWorld::new();
        let body = RigidBodyBuilder::kinematic_position_based().build();
        let (body, collider) = world.insert_attached(body, ColliderBuilder::ball(0.5).build());
        assert_eq!(world.colliders[collider].parent(), Some(body));
    }
}
