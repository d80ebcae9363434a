//! Platformer Physics - Body state and contact queries
//!
//! The movement controller never resolves collisions itself. It reads and
//! writes a [`Body2D`] and asks a [`ContactQuery`] what the body is touching.
//! [`Stage`] is a small axis-aligned world that plays the collision system's
//! part for headless runs and tests.

mod body;
mod contact;
mod stage;

pub use body::Body2D;
pub use contact::{ContactQuery, ContactReport, ContactSide, SurfaceContact};
pub use stage::{Stage, StageConfig};
