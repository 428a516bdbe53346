use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

/// Errors raised while binding or sizing a character in the physics world.
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("character has not been spawned into the physics world")]
    NotSpawned,

    #[error("rigid body {0:?} is not present in the physics world")]
    MissingBody(RigidBodyHandle),

    #[error("collider {0:?} is not present in the physics world")]
    MissingCollider(ColliderHandle),

    #[error("collider {collider:?} is not attached to body {body:?}")]
    Detached {
        collider: ColliderHandle,
        body: RigidBodyHandle,
    },

    #[error("collider {0:?} is not a capsule")]
    NotACapsule(ColliderHandle),

    #[error("collider height {height} is below the capsule minimum {min}")]
    ColliderTooShort { height: f32, min: f32 },
}
