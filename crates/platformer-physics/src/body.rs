use glam::Vec2;
use platformer_core::Aabb;

/// Rigid body state the host hands to the controller each step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body2D {
    /// Center position
    pub position: Vec2,
    /// Linear velocity in units per second
    pub velocity: Vec2,
    /// Collision box half extents
    pub half_extents: Vec2,
}

impl Body2D {
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            half_extents,
        }
    }

    /// Collision box at the current position
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.half_extents)
    }
}

impl Default for Body2D {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::new(0.5, 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_aabb_follows_position() {
        let mut body = Body2D::new(Vec2::new(2.0, 1.0), Vec2::new(0.5, 1.0));
        assert_eq!(body.aabb().min(), Vec2::new(1.5, 0.0));
        assert_eq!(body.velocity, Vec2::ZERO);

        body.position.x += 1.0;
        assert_eq!(body.aabb().max(), Vec2::new(3.5, 2.0));
    }
}
