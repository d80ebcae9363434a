//! Platformer Game - Player movement and input
//!
//! Provides the platformer movement controller, its tuning profiles, and
//! action-based input state.

pub mod input;
pub mod player;

pub use input::{InputAction, InputState};
pub use player::{
    ControllerProfiles, ControllerState, CoyoteBoundary, GravityProfile, JumpOutcome,
    JumpProfile, MovementProfile, PhysicState, PlayerController, ProfileError, ProfileKind,
    StepOutput,
};
