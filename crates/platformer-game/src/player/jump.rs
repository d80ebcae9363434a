//! Jump: impulse, curve-shaped release, and a single ceiling bounce

use glam::Vec2;
use platformer_core::{clamp01, move_towards};
use platformer_physics::{Body2D, SurfaceContact};
use tracing::debug;

use super::{ControllerState, JumpProfile};

/// What happened to a jump request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// The jump started immediately
    Started,
    /// The request is waiting for the next landing
    Buffered,
}

/// A jump may start when supported (or in coyote time) and not mid-jump
pub(crate) fn can_launch(state: &ControllerState) -> bool {
    (state.is_grounded() || state.is_in_coyote_time) && !state.is_jumping
}

/// Apply the jump impulse
pub(crate) fn launch(state: &mut ControllerState, profile: &JumpProfile, body: &mut Body2D) {
    let impulse = if state.gravity_reversed {
        -profile.impulse_force
    } else {
        profile.impulse_force
    };

    state.jump_force.y = impulse;
    body.velocity.y = impulse;
    state.horizontal_velocity.y = 0.0;
    state.is_jumping = true;
    state.is_in_coyote_time = false;
    state.jump_start_air_time = state.air_time;
    state.has_bounced = false;
}

/// Reflect `force` about `normal` and scale it, if the surface opposes
/// gravity. `None` when the contact does not qualify for a bounce.
pub(crate) fn bounce_force(
    force: Vec2,
    normal: Vec2,
    bounciness: f32,
    gravity_reversed: bool,
) -> Option<Vec2> {
    let opposes = if gravity_reversed {
        normal.y > 0.0
    } else {
        normal.y < 0.0
    };
    if normal == Vec2::ZERO || !opposes {
        return None;
    }

    let reflected = force - 2.0 * force.dot(normal) * normal;
    Some(bounciness * reflected)
}

/// Ratios this close to 1 count as finished. Air time is a running f32 sum
/// and can land a few ulps short on the last tick.
const RATIO_END_TOLERANCE: f32 = 1e-4;

/// Progress through the jump, 0 at the start and 1 when it ends
pub(crate) fn jump_ratio(state: &ControllerState, profile: &JumpProfile) -> f32 {
    let ratio = clamp01((state.air_time - state.jump_start_air_time) / profile.duration());
    if ratio >= 1.0 - RATIO_END_TOLERANCE {
        1.0
    } else {
        ratio
    }
}

/// Advance an active jump one step and return the velocity change it needs.
///
/// `opposite` is the contact on the side the body jumps toward.
pub(crate) fn jump_delta(
    state: &mut ControllerState,
    profile: &JumpProfile,
    opposite: SurfaceContact,
    body_velocity: Vec2,
    dt: f32,
) -> Vec2 {
    if !state.is_jumping {
        return Vec2::ZERO;
    }

    if !state.has_bounced {
        if let Some(bounced) = bounce_force(
            state.jump_force,
            opposite.normal,
            profile.bounciness,
            state.gravity_reversed,
        ) {
            debug!("Jump bounced: {:?} -> {:?}", state.jump_force, bounced);
            state.jump_force = bounced;
            state.has_bounced = true;
        }
    }

    let ratio = jump_ratio(state, profile);
    let deceleration =
        (profile.deceleration * profile.deceleration_curve.evaluate(ratio) * dt).max(0.0);
    state.jump_force = move_towards(state.jump_force, Vec2::ZERO, deceleration);

    let mut delta = state.jump_force - body_velocity;
    if state.jump_force.x == 0.0 {
        delta.x = 0.0;
    }
    let delta = delta.clamp_length_max(profile.max_deceleration);

    if ratio >= 1.0 {
        cancel(state);
        debug!("Jump finished");
    }

    delta
}

/// Drop the active jump, whatever its progress
pub(crate) fn cancel(state: &mut ControllerState) {
    state.is_jumping = false;
    state.jump_force = Vec2::ZERO;
}
