//! Look controller: per-frame orientation and stance update

use firstlook_core::{BodyRotationSink, ColliderGeometry, Transform};
use glam::Quat;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::input::LookFrame;
use crate::stance::{blend_factor, StanceBlender, StanceConfig, StanceSample};

use super::{clamp_pitch, LookConfig, LookMode, OrientationAccumulator};

/// What one update wrote
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Camera local rotation written this frame (unit length)
    pub camera_rotation: Quat,
    /// Absolute body rotation requested from the body sink
    pub body_request: Quat,
    /// Camera height and collider values written this frame
    pub stance: StanceSample,
}

/// State that exists only while the controller is active
#[derive(Debug, Clone)]
struct ActiveState {
    orientation: OrientationAccumulator,
    stance: StanceBlender,
}

impl ActiveState {
    fn capture<C>(stance: &StanceConfig, camera: &Transform, character: &C) -> Self
    where
        C: BodyRotationSink + ColliderGeometry,
    {
        let body_rotation = character.body_rotation();
        let collider_height = character.collider_height();
        let collider_center = character.collider_center();
        info!(
            collider_height,
            ?collider_center,
            "look controller activated"
        );

        Self {
            orientation: OrientationAccumulator::new(body_rotation, camera.rotation),
            stance: StanceBlender::new(stance.clone(), collider_height, collider_center),
        }
    }
}

/// First-person look controller.
///
/// Sole writer, each frame, of the camera's local rotation and height, the
/// body rotation request, and the collider height/center. Rotation is
/// always written before the stance pass touches the camera transform.
#[derive(Debug, Clone)]
pub struct LookController {
    look: LookConfig,
    stance: StanceConfig,
    active: Option<ActiveState>,
}

impl LookController {
    /// Create a controller, rejecting configuration the update cannot honor
    pub fn new(look: LookConfig, stance: StanceConfig) -> Result<Self, ConfigError> {
        look.validate()?;
        stance.validate()?;
        debug!(mode = ?look.mode(), ?look.pitch_range, "look controller configured");

        Ok(Self {
            look,
            stance,
            active: None,
        })
    }

    /// Rotation application mode
    pub fn mode(&self) -> LookMode {
        self.look.mode()
    }

    /// Whether [`LookController::activate`] has run since the last deactivation
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Accumulated target rotations, while active
    pub fn orientation(&self) -> Option<&OrientationAccumulator> {
        self.active.as_ref().map(|active| &active.orientation)
    }

    /// Stance blender, while active
    pub fn stance(&self) -> Option<&StanceBlender> {
        self.active.as_ref().map(|active| &active.stance)
    }

    /// Capture the initial rotations and the standing collider defaults.
    ///
    /// Re-activating discards the previous accumulated state.
    pub fn activate<C>(&mut self, camera: &Transform, character: &C)
    where
        C: BodyRotationSink + ColliderGeometry,
    {
        self.active = Some(ActiveState::capture(&self.stance, camera, character));
    }

    /// Drop the per-activation state; nothing else is held
    pub fn deactivate(&mut self) {
        if self.active.take().is_some() {
            info!("look controller deactivated");
        }
    }

    /// Run one frame. Activates first if needed.
    pub fn update<C>(
        &mut self,
        frame: LookFrame,
        dt: f32,
        camera: &mut Transform,
        character: &mut C,
    ) -> FrameOutput
    where
        C: BodyRotationSink + ColliderGeometry,
    {
        let stance_config = &self.stance;
        let active = self
            .active
            .get_or_insert_with(|| ActiveState::capture(stance_config, &*camera, &*character));

        let (yaw_delta, pitch_delta) = active
            .orientation
            .advance(frame.look_delta, self.look.sensitivity);

        let (camera_rotation, body_request) = match self.look.mode() {
            LookMode::Instant => {
                // Only this frame's delta is applied, then clamped.
                let range = self.look.pitch_range;
                let local = clamp_pitch(camera.rotation * pitch_delta, range.min, range.max);
                (local, character.body_rotation() * yaw_delta)
            }
            LookMode::Smoothed => {
                let t = blend_factor(dt, self.look.interpolation_speed);
                (
                    camera
                        .rotation
                        .slerp(active.orientation.camera_rotation(), t),
                    character
                        .body_rotation()
                        .slerp(active.orientation.body_rotation(), t),
                )
            }
        };

        camera.set_rotation(camera_rotation);
        character.request_body_rotation(body_request);

        let stance = active.stance.tick(dt, frame.crouching);
        camera.set_height(stance.camera_local_y);
        character.set_collider_height(stance.collider_height);
        character.set_collider_center(stance.collider_center);

        FrameOutput {
            camera_rotation: camera.rotation,
            body_request,
            stance,
        }
    }
}
