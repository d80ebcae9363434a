//! Velocity integrator: one combined velocity change per step

use glam::Vec2;
use platformer_physics::Body2D;

/// Collects the per-model velocity deltas for a step and applies them once
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityIntegrator {
    combined: Vec2,
    pre_step_position: Vec2,
}

impl VelocityIntegrator {
    /// Start a new step for a body at its current position
    pub fn begin(&mut self, body: &Body2D) {
        self.combined = Vec2::ZERO;
        self.pre_step_position = body.position;
    }

    pub fn add(&mut self, delta: Vec2) {
        self.combined += delta;
    }

    /// Add the combined delta to the body velocity
    pub fn apply(&self, body: &mut Body2D) -> Vec2 {
        body.velocity += self.combined;
        self.combined
    }

    /// The body was pushed this step yet ended where it started
    pub fn is_stuck(&self, body: &Body2D) -> bool {
        self.combined != Vec2::ZERO && body.position == self.pre_step_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applies_sum_once() {
        let mut body = Body2D::default();
        body.velocity = Vec2::new(1.0, 1.0);

        let mut integrator = VelocityIntegrator::default();
        integrator.begin(&body);
        integrator.add(Vec2::new(0.5, 0.0));
        integrator.add(Vec2::new(0.0, -2.0));
        integrator.add(Vec2::new(0.25, 0.5));

        assert_eq!(integrator.apply(&mut body), Vec2::new(0.75, -1.5));
        assert_eq!(body.velocity, Vec2::new(1.75, -0.5));
    }

    #[test]
    fn test_stuck_detection() {
        let mut body = Body2D::default();
        let mut integrator = VelocityIntegrator::default();

        integrator.begin(&body);
        assert!(!integrator.is_stuck(&body));

        integrator.add(Vec2::new(1.0, 0.0));
        assert!(integrator.is_stuck(&body));

        body.position.x += 0.1;
        assert!(!integrator.is_stuck(&body));

        integrator.begin(&body);
        assert!(!integrator.is_stuck(&body));
    }
}
