//! Small scalar and vector helpers shared by the movement models

use glam::Vec2;

/// Clamp to the unit interval; NaN maps to 0
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Move a scalar towards a target by at most `max_delta`
pub fn move_towards_f32(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Move a vector towards a target by a maximum delta
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let diff = target - current;
    let distance = diff.length();

    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + diff / distance * max_delta
    }
}
