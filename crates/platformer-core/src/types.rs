//! Core types used throughout the simulation

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for simulated entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    /// Short form: the first group of the UUID
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let full = self.0.to_string();
        let short = full.split('-').next().unwrap_or(&full);
        f.write_str(short)
    }
}

/// Axis-aligned rectangle given by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Build from the min and max corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min) * 0.5,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Strict overlap test; touching edges do not count
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Same box moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Aabb {
        Aabb::new(self.center + offset, self.half_extents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_corners() {
        let aabb = Aabb::from_min_max(Vec2::new(-1.0, 0.0), Vec2::new(3.0, 2.0));
        assert_eq!(aabb.center, Vec2::new(1.0, 1.0));
        assert_eq!(aabb.min(), Vec2::new(-1.0, 0.0));
        assert_eq!(aabb.max(), Vec2::new(3.0, 2.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::from_min_max(Vec2::ZERO, Vec2::ONE);
        let b = Aabb::from_min_max(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&b.translated(Vec2::new(-0.1, 0.0))));
    }

    #[test]
    fn test_entity_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn test_entity_id_display_is_short() {
        let id = EntityId(Uuid::nil());
        assert_eq!(id.to_string(), "00000000");
    }
}
