//! Reference stage: static axis-aligned solids and the bodies moving among them

use std::collections::HashMap;

use glam::Vec2;
use platformer_core::{Aabb, EntityId};
use tracing::debug;

use crate::{Body2D, ContactReport, ContactSide, SurfaceContact};

/// Stage configuration
#[derive(Debug, Clone)]
pub struct StageConfig {
    /// Probe distance used to detect resting contacts
    pub contact_skin: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self { contact_skin: 0.01 }
    }
}

/// A world of static boxes. Moves bodies with axis-separated resolution and
/// reports ground/ceiling contacts after each move.
pub struct Stage {
    /// Configuration
    pub config: StageConfig,
    /// Static level geometry
    solids: Vec<Aabb>,
    /// Bodies registered in this stage
    bodies: HashMap<EntityId, Body2D>,
}

impl Stage {
    /// Create an empty stage with default configuration
    pub fn new() -> Self {
        Self {
            config: StageConfig::default(),
            solids: Vec::new(),
            bodies: HashMap::new(),
        }
    }

    /// Add a static solid (ground, walls, ceilings)
    pub fn add_solid(&mut self, solid: Aabb) {
        self.solids.push(solid);
    }

    /// Create a floor slab whose top surface sits at `y`
    pub fn create_floor(&mut self, y: f32, min_x: f32, max_x: f32) {
        self.add_solid(Aabb::from_min_max(Vec2::new(min_x, y - 1.0), Vec2::new(max_x, y)));
    }

    /// Create a ceiling slab whose bottom surface sits at `y`
    pub fn create_ceiling(&mut self, y: f32, min_x: f32, max_x: f32) {
        self.add_solid(Aabb::from_min_max(Vec2::new(min_x, y), Vec2::new(max_x, y + 1.0)));
    }

    /// Create a wall whose face points left, at `x`
    pub fn create_wall(&mut self, x: f32, min_y: f32, max_y: f32) {
        self.add_solid(Aabb::from_min_max(Vec2::new(x, min_y), Vec2::new(x + 1.0, max_y)));
    }

    /// Register a body and return its id
    pub fn spawn_body(&mut self, position: Vec2, half_extents: Vec2) -> EntityId {
        let id = EntityId::new();
        self.bodies.insert(id, Body2D::new(position, half_extents));
        debug!("Spawned body {:?} at {:?}", id, position);
        id
    }

    pub fn body(&self, id: EntityId) -> Option<&Body2D> {
        self.bodies.get(&id)
    }

    pub fn body_mut(&mut self, id: EntityId) -> Option<&mut Body2D> {
        self.bodies.get_mut(&id)
    }

    /// Integrate a registered body by its velocity and report its contacts
    pub fn step_body(&mut self, id: EntityId, dt: f32) -> Option<ContactReport> {
        let body = self.bodies.get_mut(&id)?;
        resolve_motion(&self.solids, body, dt);
        Some(report_contacts(&self.solids, self.config.contact_skin, body))
    }

    /// Integrate a body that is not registered with the stage
    pub fn move_body(&self, body: &mut Body2D, dt: f32) -> ContactReport {
        resolve_motion(&self.solids, body, dt);
        report_contacts(&self.solids, self.config.contact_skin, body)
    }

    /// Contacts for a body at its current position
    pub fn contacts(&self, body: &Body2D) -> ContactReport {
        report_contacts(&self.solids, self.config.contact_skin, body)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

/// Move along X, push out of solids, then the same along Y.
/// Velocity into a solid is cancelled on the blocked axis.
fn resolve_motion(solids: &[Aabb], body: &mut Body2D, dt: f32) {
    let delta = body.velocity * dt;

    if delta.x != 0.0 {
        body.position.x += delta.x;
        for solid in solids {
            if body.aabb().intersects(solid) {
                body.position.x = if delta.x > 0.0 {
                    solid.min().x - body.half_extents.x
                } else {
                    solid.max().x + body.half_extents.x
                };
                body.velocity.x = 0.0;
            }
        }
    }

    if delta.y != 0.0 {
        body.position.y += delta.y;
        for solid in solids {
            if body.aabb().intersects(solid) {
                body.position.y = if delta.y > 0.0 {
                    solid.min().y - body.half_extents.y
                } else {
                    solid.max().y + body.half_extents.y
                };
                body.velocity.y = 0.0;
            }
        }
    }
}

fn report_contacts(solids: &[Aabb], skin: f32, body: &Body2D) -> ContactReport {
    ContactReport {
        ground: probe(solids, skin, body, ContactSide::Ground),
        ceiling: probe(solids, skin, body, ContactSide::Ceiling),
    }
}

fn probe(solids: &[Aabb], skin: f32, body: &Body2D, side: ContactSide) -> SurfaceContact {
    let (offset, normal) = match side {
        ContactSide::Ground => (Vec2::new(0.0, -skin), Vec2::Y),
        ContactSide::Ceiling => (Vec2::new(0.0, skin), Vec2::NEG_Y),
    };
    let probe = body.aabb().translated(offset);

    if solids.iter().any(|solid| probe.intersects(solid)) {
        SurfaceContact::touching(normal)
    } else {
        SurfaceContact::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_stage() -> Stage {
        let mut stage = Stage::new();
        stage.create_floor(0.0, -10.0, 10.0);
        stage.create_ceiling(4.0, -10.0, 10.0);
        stage.create_wall(5.0, 0.0, 4.0);
        stage
    }

    #[test]
    fn test_body_lands_on_floor() {
        let stage = box_stage();
        let mut body = Body2D::new(Vec2::new(0.0, 1.0), Vec2::new(0.5, 0.5));
        body.velocity = Vec2::new(0.0, -4.0);

        let contacts = stage.move_body(&mut body, 0.25);
        assert_eq!(body.position.y, 0.5);
        assert_eq!(body.velocity.y, 0.0);
        assert!(contacts.ground.touching);
        assert_eq!(contacts.ground.normal, Vec2::Y);
        assert!(!contacts.ceiling.touching);
    }

    #[test]
    fn test_ceiling_contact() {
        let stage = box_stage();
        let mut body = Body2D::new(Vec2::new(0.0, 3.0), Vec2::new(0.5, 0.5));
        body.velocity = Vec2::new(0.0, 4.0);

        let contacts = stage.move_body(&mut body, 0.25);
        assert_eq!(body.position.y, 3.5);
        assert!(contacts.ceiling.touching);
        assert_eq!(contacts.ceiling.normal, Vec2::NEG_Y);
    }

    #[test]
    fn test_wall_blocks_without_ground_contact() {
        let stage = box_stage();
        let mut body = Body2D::new(Vec2::new(4.5, 0.5), Vec2::new(0.5, 0.5));
        body.velocity = Vec2::new(2.0, 0.0);

        let before = body.position;
        let contacts = stage.move_body(&mut body, 0.25);
        assert_eq!(body.position, before);
        assert_eq!(body.velocity.x, 0.0);
        assert!(contacts.ground.touching);
    }

    #[test]
    fn test_registered_body_step() {
        let mut stage = box_stage();
        let id = stage.spawn_body(Vec2::new(0.0, 2.0), Vec2::new(0.5, 0.5));
        stage.body_mut(id).unwrap().velocity = Vec2::new(1.0, 0.0);

        let contacts = stage.step_body(id, 0.5).unwrap();
        assert_eq!(stage.body(id).unwrap().position, Vec2::new(0.5, 2.0));
        assert_eq!(contacts, ContactReport::airborne());

        assert!(stage.step_body(EntityId::new(), 0.5).is_none());
    }
}
