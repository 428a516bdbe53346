//! Scripted input for the headless session
//!
//! Feeds synthetic winit events into the input handler so the session
//! exercises capture gating, look, the pitch clamp, and crouch.

use firstlook_game::InputHandler;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Frames in one scripted session (four seconds at 60 Hz)
pub const SESSION_FRAMES: u32 = 240;

/// Feed the events scheduled for `frame`
pub fn feed(input: &mut InputHandler, frame: u32) {
    match frame {
        // Click to capture the cursor
        0 => input.handle_mouse_button(MouseButton::Left, ElementState::Pressed),
        1 => input.handle_mouse_button(MouseButton::Left, ElementState::Released),
        _ => {}
    }

    match frame {
        // Turn right
        2..=61 => input.handle_mouse_motion((1.5, 0.0)),
        // Look up well past the pitch limit
        62..=91 => input.handle_mouse_motion((0.0, -4.0)),
        // Come back down
        92..=111 => input.handle_mouse_motion((0.0, 2.0)),
        _ => {}
    }

    match frame {
        120 => input.handle_keyboard(PhysicalKey::Code(KeyCode::ControlLeft), ElementState::Pressed),
        180 => input.handle_keyboard(PhysicalKey::Code(KeyCode::ControlLeft), ElementState::Released),
        // Release capture; later motion is dropped
        200 => input.handle_keyboard(PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed),
        201 => input.handle_keyboard(PhysicalKey::Code(KeyCode::Escape), ElementState::Released),
        _ => {}
    }

    if frame > 200 {
        input.handle_mouse_motion((3.0, 3.0));
    }
}
