//! Look system module
//!
//! Accumulates yaw and pitch from look input and applies them to the
//! camera and character body, either instantly (with a pitch clamp) or
//! smoothed.

mod clamp;
mod config;
mod controller;
mod orientation;

pub use clamp::{clamp_pitch, pitch_degrees};
pub use config::{LookConfig, LookMode, PitchRange};
pub use controller::{FrameOutput, LookController};
pub use orientation::{OrientationAccumulator, PITCH_AXIS, YAW_AXIS};
