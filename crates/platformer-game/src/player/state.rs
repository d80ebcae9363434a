//! Per-entity mutable controller state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ProfileKind;

/// Whether the body is supported by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicState {
    Ground,
    Air,
}

/// Everything the controller mutates between steps.
///
/// Owned by exactly one controller. Profiles are referenced through
/// `profile`, never copied in.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    pub physic_state: PhysicState,
    /// Velocity the horizontal model is steering toward the target
    pub horizontal_velocity: Vec2,
    /// Fall velocity accumulator
    pub gravity: f32,
    /// Remaining jump velocity
    pub jump_force: Vec2,
    pub is_jumping: bool,
    pub is_in_coyote_time: bool,
    pub gravity_reversed: bool,
    /// Whether the current jump already bounced off a surface
    pub has_bounced: bool,
    /// A jump request waiting for the next landing
    pub jump_buffered: bool,
    pub is_sprinting: bool,
    /// Seconds spent airborne since the last landing
    pub air_time: f32,
    /// `air_time` when the current jump started
    pub jump_start_air_time: f32,
    /// Active movement profile
    pub profile: ProfileKind,
    /// Movement axis in [-1, 1]
    pub movement_input: f32,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            physic_state: PhysicState::Ground,
            horizontal_velocity: Vec2::ZERO,
            gravity: 0.0,
            jump_force: Vec2::ZERO,
            is_jumping: false,
            is_in_coyote_time: false,
            gravity_reversed: false,
            has_bounced: false,
            jump_buffered: false,
            is_sprinting: false,
            air_time: 0.0,
            jump_start_air_time: 0.0,
            profile: ProfileKind::Ground,
            movement_input: 0.0,
        }
    }
}

impl ControllerState {
    pub fn is_grounded(&self) -> bool {
        self.physic_state == PhysicState::Ground
    }

    /// Unit vector pointing away from the supporting surface
    pub fn up(&self) -> Vec2 {
        if self.gravity_reversed {
            Vec2::NEG_Y
        } else {
            Vec2::Y
        }
    }
}
