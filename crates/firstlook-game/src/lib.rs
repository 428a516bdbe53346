//! Firstlook Game - First-person orientation and stance
//!
//! Turns look input into camera pitch and body yaw, clamps pitch, and
//! blends the crouch stance into camera height and collider shape.

pub mod error;
pub mod input;
pub mod look;
pub mod stance;

pub use error::ConfigError;
pub use input::{InputAction, InputBindings, InputHandler, InputSettings, InputState, LookFrame};
pub use look::{
    clamp_pitch, pitch_degrees, FrameOutput, LookConfig, LookController, LookMode,
    OrientationAccumulator, PitchRange,
};
pub use stance::{StanceBlender, StanceConfig, StanceSample};
