//! Player controller module
//!
//! Platformer movement: ground/air transitions, coyote time, jump buffering,
//! curve-shaped jumps with a single ceiling bounce, and gravity reversal.

mod controller;
mod gravity;
mod horizontal;
mod integrator;
mod jump;
mod profiles;
mod state;

pub use controller::{PlayerController, StepOutput};
pub use integrator::VelocityIntegrator;
pub use jump::JumpOutcome;
pub use profiles::{
    ControllerProfiles, CoyoteBoundary, GravityProfile, JumpProfile, MovementProfile,
    ProfileError, ProfileKind,
};
pub use state::{ControllerState, PhysicState};
