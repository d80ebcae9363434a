//! Contact queries supplied by the collision system

use glam::Vec2;

/// Result of a single side's contact query
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceContact {
    /// Whether anything is touching on this side
    pub touching: bool,
    /// Primary contact normal; zero when not touching or unknown
    pub normal: Vec2,
}

impl SurfaceContact {
    pub const NONE: SurfaceContact = SurfaceContact {
        touching: false,
        normal: Vec2::ZERO,
    };

    /// A touching contact with the given surface normal
    pub fn touching(normal: Vec2) -> Self {
        Self {
            touching: true,
            normal,
        }
    }

    /// Whether the normal carries a direction (a zero normal means "flat")
    pub fn has_normal(&self) -> bool {
        self.normal != Vec2::ZERO
    }
}

/// Which filter a contact query uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSide {
    /// Surfaces below the body (normals pointing up)
    Ground,
    /// Surfaces above the body (normals pointing down)
    Ceiling,
}

impl ContactSide {
    /// The side the body stands on; swaps under reversed gravity
    pub fn support(gravity_reversed: bool) -> Self {
        if gravity_reversed {
            ContactSide::Ceiling
        } else {
            ContactSide::Ground
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            ContactSide::Ground => ContactSide::Ceiling,
            ContactSide::Ceiling => ContactSide::Ground,
        }
    }
}

/// Source of per-step contact information
pub trait ContactQuery {
    fn contact(&self, side: ContactSide) -> SurfaceContact;
}

/// Plain snapshot of both sides, as produced by one collision pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactReport {
    pub ground: SurfaceContact,
    pub ceiling: SurfaceContact,
}

impl ContactReport {
    /// Standing on flat ground, nothing above
    pub fn grounded() -> Self {
        Self {
            ground: SurfaceContact::touching(Vec2::Y),
            ceiling: SurfaceContact::NONE,
        }
    }

    /// Touching nothing
    pub fn airborne() -> Self {
        Self::default()
    }
}

impl ContactQuery for ContactReport {
    fn contact(&self, side: ContactSide) -> SurfaceContact {
        match side {
            ContactSide::Ground => self.ground,
            ContactSide::Ceiling => self.ceiling,
        }
    }
}
