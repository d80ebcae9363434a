//! Horizontal motion: steer toward `axis * max_speed`, following slopes

use glam::Vec2;
use platformer_core::move_towards;
use platformer_physics::SurfaceContact;

use super::{ControllerState, MovementProfile};

/// Normals closer than this to straight up count as flat ground
const FLAT_NORMAL_EPSILON: f32 = 1e-5;

/// Velocity the body should reach for the current input
pub(crate) fn target_velocity(
    state: &ControllerState,
    profile: &MovementProfile,
    support: SurfaceContact,
) -> Vec2 {
    let axis = state.movement_input;
    let flat = Vec2::new(axis * profile.max_speed, 0.0);

    if !state.is_grounded() || state.is_jumping || axis == 0.0 {
        return flat;
    }

    let normal = support.normal;
    if !support.has_normal() || normal.abs_diff_eq(state.up(), FLAT_NORMAL_EPSILON) {
        return flat;
    }

    // cross(normal, +Z) walks right along the surface, cross(normal, -Z) left
    let tangent = if axis > 0.0 {
        Vec2::new(normal.y, -normal.x)
    } else {
        Vec2::new(-normal.y, normal.x)
    };
    tangent * profile.max_speed
}

/// Advance the horizontal velocity one step and return the velocity change
/// the body needs
pub(crate) fn horizontal_delta(
    state: &mut ControllerState,
    profile: &MovementProfile,
    support: SurfaceContact,
    body_velocity: Vec2,
    dt: f32,
) -> Vec2 {
    let target = target_velocity(state, profile, support);

    let alignment = body_velocity.dot(target).clamp(-1.0, 1.0);
    let acceleration =
        (profile.acceleration * profile.acceleration_remap.evaluate(alignment) * dt).max(0.0);

    state.horizontal_velocity = move_towards(state.horizontal_velocity, target, acceleration);

    let mut delta = state.horizontal_velocity - body_velocity;
    if state.horizontal_velocity.y == 0.0 {
        delta.y = 0.0;
    }
    delta.clamp_length_max(profile.max_acceleration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PhysicState;
    use platformer_core::RemapCurve;

    fn profile(max_speed: f32, acceleration: f32, max_acceleration: f32) -> MovementProfile {
        MovementProfile {
            max_speed,
            acceleration,
            max_acceleration,
            acceleration_remap: RemapCurve::constant(1.0),
        }
    }

    fn flat_ground() -> SurfaceContact {
        SurfaceContact::touching(Vec2::Y)
    }

    #[test]
    fn test_first_tick_from_rest() {
        let mut state = ControllerState {
            movement_input: 1.0,
            ..Default::default()
        };
        let delta = horizontal_delta(&mut state, &profile(5.0, 10.0, 100.0), flat_ground(), Vec2::ZERO, 0.1);

        assert!((state.horizontal_velocity.x - 1.0).abs() < 1e-6);
        assert_eq!(state.horizontal_velocity.y, 0.0);
        assert!((delta.x - 1.0).abs() < 1e-6);
        assert_eq!(delta.y, 0.0);
    }

    #[test]
    fn test_identity_curve_gives_no_push_from_rest() {
        let mut movement = profile(5.0, 10.0, 100.0);
        movement.acceleration_remap = RemapCurve::linear(-1.0, -1.0, 1.0, 1.0).unwrap();
        let mut state = ControllerState {
            movement_input: 1.0,
            ..Default::default()
        };
        horizontal_delta(&mut state, &movement, flat_ground(), Vec2::ZERO, 0.1);
        assert_eq!(state.horizontal_velocity, Vec2::ZERO);
    }

    #[test]
    fn test_negative_remap_never_pushes_away() {
        let mut movement = profile(5.0, 10.0, 100.0);
        movement.acceleration_remap = RemapCurve::constant(-1.0);
        let mut state = ControllerState {
            movement_input: 1.0,
            horizontal_velocity: Vec2::new(2.0, 0.0),
            ..Default::default()
        };
        horizontal_delta(&mut state, &movement, flat_ground(), Vec2::new(2.0, 0.0), 0.1);
        assert_eq!(state.horizontal_velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_monotonic_approach_and_bounded_change() {
        let movement = profile(5.0, 10.0, 0.5);
        for axis in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            let mut state = ControllerState {
                movement_input: axis,
                physic_state: PhysicState::Ground,
                ..Default::default()
            };
            let target = axis * movement.max_speed;
            let mut body_velocity = Vec2::new(-2.0 * axis + 1.0, 0.0);
            let mut distance = (target - body_velocity.x).abs();

            for _ in 0..40 {
                let delta =
                    horizontal_delta(&mut state, &movement, SurfaceContact::NONE, body_velocity, 0.1);
                assert!(delta.length() <= movement.max_acceleration + 1e-6);
                body_velocity += delta;

                let next = (target - body_velocity.x).abs();
                assert!(next <= distance + 1e-6, "axis {} moved away from target", axis);
                distance = next;
            }
            assert!(distance < 1e-4, "axis {} did not settle: {}", axis, distance);
        }
    }

    #[test]
    fn test_slope_following() {
        let movement = profile(5.0, 10.0, 100.0);
        let slope = SurfaceContact::touching(Vec2::new(-0.6, 0.8));
        let mut state = ControllerState {
            movement_input: 1.0,
            ..Default::default()
        };

        let up_slope = target_velocity(&state, &movement, slope);
        assert!((up_slope - Vec2::new(4.0, 3.0)).length() < 1e-5);

        state.movement_input = -1.0;
        let down_slope = target_velocity(&state, &movement, slope);
        assert!((down_slope - Vec2::new(-4.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn test_no_slope_snapping_when_flat_airborne_or_jumping() {
        let movement = profile(5.0, 10.0, 100.0);
        let slope = SurfaceContact::touching(Vec2::new(-0.6, 0.8));
        let mut state = ControllerState {
            movement_input: 1.0,
            ..Default::default()
        };
        let flat = Vec2::new(5.0, 0.0);

        assert_eq!(target_velocity(&state, &movement, flat_ground()), flat);
        assert_eq!(target_velocity(&state, &movement, SurfaceContact::NONE), flat);

        state.is_jumping = true;
        assert_eq!(target_velocity(&state, &movement, slope), flat);

        state.is_jumping = false;
        state.physic_state = PhysicState::Air;
        assert_eq!(target_velocity(&state, &movement, slope), flat);

        state.physic_state = PhysicState::Ground;
        state.gravity_reversed = true;
        let ceiling = SurfaceContact::touching(Vec2::NEG_Y);
        assert_eq!(target_velocity(&state, &movement, ceiling), flat);
    }

    #[test]
    fn test_vertical_term_kept_on_slopes() {
        let movement = profile(5.0, 100.0, 100.0);
        let mut state = ControllerState {
            movement_input: 1.0,
            ..Default::default()
        };
        let delta = horizontal_delta(
            &mut state,
            &movement,
            SurfaceContact::touching(Vec2::new(-0.6, 0.8)),
            Vec2::ZERO,
            1.0,
        );
        assert!(delta.y > 0.0);
    }
}
