//! Input system with action-based mapping
//!
//! Hosts translate their own devices into [`InputAction`]s; the controller
//! only sees the resulting [`InputState`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Game actions that drive the movement controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
    /// Toggle sprinting (Shift by default)
    Sprint,
    /// Flip gravity (G by default)
    ReverseGravity,
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Analog stick axis, added to the digital left/right axis
    pub analog_axis: f32,
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

    /// Record a press; repeats while held do not count as new presses
    pub fn press(&mut self, action: InputAction) {
        if !self.held.contains(&action) {
            self.just_pressed.insert(action);
        }
        self.held.insert(action);
    }

    /// Record a release. A press from this frame still counts.
    pub fn release(&mut self, action: InputAction) {
        self.held.remove(&action);
    }

    /// Horizontal movement axis in [-1, 1]
    pub fn movement_axis(&self) -> f32 {
        let mut axis = self.analog_axis;
        if self.is_held(InputAction::MoveLeft) {
            axis -= 1.0;
        }
        if self.is_held(InputAction::MoveRight) {
            axis += 1.0;
        }
        axis.clamp(-1.0, 1.0)
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
    }
}
