//! Platformer Core - Core types and utilities for the platformer simulation
//!
//! This crate provides the foundational types used by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Fixed-step game time, simulated clock and deadlines
//! - Remap curves for tunable response shapes
//! - Entity ids and axis-aligned rectangles

pub mod curve;
pub mod math;
pub mod time;
pub mod types;

pub use curve::{CurveError, RemapCurve};
pub use glam::Vec2;
pub use math::{clamp01, move_towards, move_towards_f32};
pub use time::{Deadline, GameTime, SimClock, TimeConfig};
pub use types::{Aabb, EntityId};
