//! Gravity: a fall accumulator eased in during coyote time

use glam::Vec2;
use platformer_core::{clamp01, move_towards_f32};
use platformer_physics::Body2D;

use super::{ControllerState, CoyoteBoundary, GravityProfile};

/// Scale applied to gravity while coyote time is running
pub(crate) fn coyote_factor(state: &ControllerState, profile: &GravityProfile) -> f32 {
    if !state.is_in_coyote_time {
        return 1.0;
    }
    let ratio = if profile.coyote_time > 0.0 {
        clamp01(state.air_time / profile.coyote_time)
    } else {
        1.0
    };
    profile.coyote_remap.evaluate(ratio)
}

/// End coyote time once the grace window has passed
pub(crate) fn expire_coyote(state: &mut ControllerState, profile: &GravityProfile) {
    let expired = match profile.coyote_boundary {
        CoyoteBoundary::Inclusive => state.air_time > profile.coyote_time,
        CoyoteBoundary::Exclusive => state.air_time >= profile.coyote_time,
    };
    if expired {
        state.is_in_coyote_time = false;
    }
}

/// Advance the fall accumulator and return the vertical velocity change.
///
/// Only pulls toward the current "down"; never pushes the body back up.
pub(crate) fn gravity_delta(
    state: &mut ControllerState,
    profile: &GravityProfile,
    body_velocity: Vec2,
    dt: f32,
) -> Vec2 {
    if state.is_grounded() || state.is_jumping {
        return Vec2::ZERO;
    }

    let rate = (profile.acceleration * coyote_factor(state, profile) * dt).max(0.0);
    let target = if state.gravity_reversed {
        -profile.max_force
    } else {
        profile.max_force
    };
    state.gravity = move_towards_f32(state.gravity, target, rate);

    let delta = state.gravity - body_velocity.y;
    let delta = if state.gravity_reversed {
        delta.min(profile.max_acceleration).max(0.0)
    } else {
        delta.max(-profile.max_acceleration).min(0.0)
    };
    Vec2::new(0.0, delta)
}

/// Landing handler: forget the fall entirely
pub(crate) fn reset_on_landing(state: &mut ControllerState, body: &mut Body2D) {
    state.gravity = 0.0;
    state.air_time = 0.0;
    body.velocity.y = 0.0;
}
