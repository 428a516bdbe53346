//! Input system with action-based mapping
//!
//! Turns raw winit events into the per-frame look delta and crouch flag the
//! look controller consumes. Look capture gating lives here: pointer motion
//! only counts while the cursor is captured.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Crouch while held (either Control key by default)
    Crouch,
    /// Capture the cursor for look input (left mouse button by default)
    CaptureCursor,
    /// Release the cursor (Escape by default)
    ReleaseCursor,
}

/// Input settings persisted alongside the controller configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Invert the vertical look axis
    pub invert_y: bool,
}

/// Everything the look controller reads for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookFrame {
    /// Look delta, zero while the cursor is not captured
    pub look_delta: Vec2,
    /// Crouch input held this frame
    pub crouching: bool,
}

impl LookFrame {
    /// A frame of look input with crouch released
    pub fn look(look_delta: Vec2) -> Self {
        Self {
            look_delta,
            crouching: false,
        }
    }
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
    /// Pointer movement delta accumulated this frame
    pub look_delta: Vec2,
    /// Whether the cursor is captured (invisible, locked)
    pub cursor_captured: bool,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Sample this frame's look delta and crouch flag
    pub fn look_frame(&self) -> LookFrame {
        LookFrame {
            look_delta: if self.cursor_captured {
                self.look_delta
            } else {
                Vec2::ZERO
            },
            crouching: self.is_held(InputAction::Crouch),
        }
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.look_delta = Vec2::ZERO;
    }

    /// Clear all input state
    pub fn clear_all(&mut self) {
        self.held.clear();
        self.clear_frame();
    }
}

/// Binding of a physical key to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    /// Keyboard key
    Key(KeyCode),
    /// Mouse button
    Mouse(u32), // 0 = left, 1 = right, 2 = middle
}

/// Maps physical inputs to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key/button to action mappings
    bindings: HashMap<InputBinding, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        bindings.bind(KeyCode::ControlLeft, InputAction::Crouch);
        bindings.bind(KeyCode::ControlRight, InputAction::Crouch);
        bindings.bind(KeyCode::Escape, InputAction::ReleaseCursor);
        bindings.bind_mouse(0, InputAction::CaptureCursor);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(InputBinding::Key(key), action);
    }

    /// Bind a mouse button to an action
    pub fn bind_mouse(&mut self, button: u32, action: InputAction) {
        self.bindings.insert(InputBinding::Mouse(button), action);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&InputBinding::Key(key));
    }

    /// Get the action for a binding, if any
    pub fn get_action(&self, binding: &InputBinding) -> Option<InputAction> {
        self.bindings.get(binding).copied()
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.get_action(&InputBinding::Key(key))
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
    /// Invert Y axis
    pub invert_y: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            bindings: InputBindings::default(),
            invert_y: false,
        }
    }

    /// Create a handler from persisted settings
    pub fn with_settings(settings: &InputSettings) -> Self {
        Self {
            invert_y: settings.invert_y,
            ..Self::new()
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            if let Some(action) = self.bindings.get_key_action(key_code) {
                self.apply(action, element_state);
            }
        }
    }

    /// Handle a mouse button event
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let button_id = match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(id) => id as u32,
        };

        if let Some(action) = self.bindings.get_action(&InputBinding::Mouse(button_id)) {
            self.apply(action, state);
        }
    }

    /// Handle raw pointer motion; ignored unless the cursor is captured
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.state.cursor_captured {
            let y_mult = if self.invert_y { -1.0 } else { 1.0 };
            self.state.look_delta += Vec2::new(delta.0 as f32, delta.1 as f32 * y_mult);
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }

    /// Set cursor capture state
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.state.cursor_captured = captured;
        if !captured {
            self.state.look_delta = Vec2::ZERO;
        }
    }

    fn apply(&mut self, action: InputAction, element_state: ElementState) {
        match element_state {
            ElementState::Pressed => {
                if !self.state.held.contains(&action) {
                    self.state.just_pressed.insert(action);
                    match action {
                        InputAction::CaptureCursor => self.set_cursor_captured(true),
                        InputAction::ReleaseCursor => self.set_cursor_captured(false),
                        InputAction::Crouch => {}
                    }
                }
                self.state.held.insert(action);
            }
            ElementState::Released => {
                self.state.held.remove(&action);
                self.state.just_released.insert(action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_key_action(KeyCode::ControlLeft),
            Some(InputAction::Crouch)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::ControlRight),
            Some(InputAction::Crouch)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::Escape),
            Some(InputAction::ReleaseCursor)
        );
    }

    #[test]
    fn test_unbind_crouch_key() {
        let mut handler = InputHandler::new();
        handler.bindings.unbind(KeyCode::ControlLeft);
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::ControlLeft), ElementState::Pressed);
        assert!(!handler.state.look_frame().crouching);
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::ControlRight), ElementState::Pressed);
        assert!(handler.state.look_frame().crouching);
    }

    #[test]
    fn test_motion_ignored_until_captured() {
        let mut handler = InputHandler::new();
        handler.handle_mouse_motion((5.0, 3.0));
        assert_eq!(handler.state.look_frame().look_delta, Vec2::ZERO);

        handler.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        handler.handle_mouse_motion((5.0, 3.0));
        handler.handle_mouse_motion((1.0, -1.0));
        assert_eq!(handler.state.look_frame().look_delta, Vec2::new(6.0, 2.0));
    }

    #[test]
    fn test_release_cursor_zeroes_look() {
        let mut handler = InputHandler::new();
        handler.set_cursor_captured(true);
        handler.handle_mouse_motion((4.0, 4.0));
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed);
        assert!(!handler.state.cursor_captured);
        assert_eq!(handler.state.look_frame().look_delta, Vec2::ZERO);
    }

    #[test]
    fn test_crouch_held_across_frames() {
        let mut handler = InputHandler::new();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::ControlLeft), ElementState::Pressed);
        assert!(handler.state.look_frame().crouching);
        assert!(handler.state.is_just_pressed(InputAction::Crouch));

        handler.end_frame();
        assert!(handler.state.look_frame().crouching);
        assert!(!handler.state.is_just_pressed(InputAction::Crouch));

        handler.handle_keyboard(PhysicalKey::Code(KeyCode::ControlLeft), ElementState::Released);
        assert!(!handler.state.look_frame().crouching);
        assert!(handler.state.is_just_released(InputAction::Crouch));
    }

    #[test]
    fn test_invert_y() {
        let mut handler = InputHandler::with_settings(&InputSettings { invert_y: true });
        handler.set_cursor_captured(true);
        handler.handle_mouse_motion((0.0, 2.0));
        assert_eq!(handler.state.look_delta, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn test_end_frame_clears_delta() {
        let mut handler = InputHandler::new();
        handler.set_cursor_captured(true);
        handler.handle_mouse_motion((3.0, 0.0));
        handler.end_frame();
        assert_eq!(handler.state.look_delta, Vec2::ZERO);
        assert!(handler.state.cursor_captured);
    }

    #[test]
    fn test_clear_all_drops_held_crouch() {
        let mut handler = InputHandler::new();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::ControlLeft), ElementState::Pressed);
        handler.state.clear_all();
        assert!(!handler.state.look_frame().crouching);
        assert!(!handler.state.is_just_pressed(InputAction::Crouch));
    }
}
