//! Firstlook - headless first-person look session
//!
//! Runs a scripted session that drives the look controller against a rapier
//! character body. Usage: `firstlook [settings.toml]`, or `firstlook --init`
//! to write the default settings file.

mod script;
mod settings;

use std::path::Path;

use anyhow::{Context, Result};
use firstlook_core::Transform;
use firstlook_game::{pitch_degrees, FrameOutput, InputHandler, LookController};
use firstlook_physics::{CharacterBody, PhysicsWorld};
use glam::{Quat, Vec3};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings::Settings;

/// Body yaw in degrees, positive to the right
fn yaw_degrees(body: Quat) -> f32 {
    (2.0 * (-body.y).atan2(body.w)).to_degrees()
}

/// Build the character body, rejecting stance heights its capsule cannot take
fn build_character(settings: &Settings) -> Result<CharacterBody> {
    let config = settings.character.body_config();
    config
        .check_collider_height(config.height)
        .context("Standing height does not fit the character capsule")?;
    config
        .check_collider_height(settings.stance.crouch_collider_height)
        .context("Crouch collider height does not fit the character capsule")?;
    Ok(CharacterBody::with_config(config))
}

fn log_frame(frame: u32, out: &FrameOutput, camera: &Transform) {
    info!(
        frame,
        yaw = yaw_degrees(out.body_request),
        look = ?(out.body_request * camera.forward()),
        pitch = pitch_degrees(out.camera_rotation),
        camera_y = out.stance.camera_local_y,
        collider_height = out.stance.collider_height,
        "frame"
    );
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--init") {
        return Settings::default().save();
    }

    info!("Starting firstlook session...");
    let settings = match arg {
        Some(path) => Settings::load_from(Path::new(&path)),
        None => Settings::load(),
    };

    let mut controller = LookController::new(settings.look.clone(), settings.stance.clone())
        .context("Invalid look configuration")?;

    info!(mode = ?controller.mode(), "Look controller ready");

    let mut character = build_character(&settings)?;
    let mut physics = PhysicsWorld::new();
    character.spawn(&mut physics, Vec3::ZERO, Quat::IDENTITY);

    let mut camera = Transform::from_position(Vec3::new(0.0, settings.stance.stand_height, 0.0));
    let mut input = InputHandler::with_settings(&settings.input);
    let dt = physics.timestep();

    {
        let rig = character
            .rig(&mut physics)
            .context("Character is not bound to the physics world")?;
        controller.activate(&camera, &rig);
    }

    for frame in 0..script::SESSION_FRAMES {
        script::feed(&mut input, frame);
        let look = input.state.look_frame();

        let out = {
            let mut rig = character.rig(&mut physics)?;
            controller.update(look, dt, &mut camera, &mut rig)
        };
        physics.step();
        input.end_frame();

        if frame % 30 == 0 || frame + 1 == script::SESSION_FRAMES {
            log_frame(frame, &out, &camera);
        }
    }

    controller.deactivate();
    info!("Session finished");
    Ok(())
}
