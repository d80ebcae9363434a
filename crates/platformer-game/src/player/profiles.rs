//! Movement, gravity and jump profiles
//!
//! Profiles are configuration: loaded once, validated, then shared read-only
//! between every controller that uses them.

use std::fs;
use std::path::{Path, PathBuf};

use platformer_core::RemapCurve;
use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating profiles
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("failed to read profiles '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse profiles: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("jump duration must be positive (height {height}, impulse force {impulse_force})")]
    InvalidJumpDuration { height: f32, impulse_force: f32 },

    #[error("{profile}.{field} must be finite and non-negative, got {value}")]
    InvalidValue {
        profile: &'static str,
        field: &'static str,
        value: f32,
    },
}

/// Horizontal movement tuning for one physical situation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementProfile {
    /// Top horizontal speed in units per second
    pub max_speed: f32,
    /// How fast the speed approaches `max_speed`
    pub acceleration: f32,
    /// Largest velocity change this profile may apply in one step
    pub max_acceleration: f32,
    /// Acceleration factor over the velocity/target alignment, range [-1, 1]
    pub acceleration_remap: RemapCurve,
}

impl MovementProfile {
    fn validate(&self, profile: &'static str) -> Result<(), ProfileError> {
        non_negative(profile, "max_speed", self.max_speed)?;
        non_negative(profile, "acceleration", self.acceleration)?;
        non_negative(profile, "max_acceleration", self.max_acceleration)
    }
}

/// When coyote time ends relative to `coyote_time`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoyoteBoundary {
    /// A jump at exactly `air_time == coyote_time` is still accepted
    #[default]
    Inclusive,
    /// Coyote time is over once `air_time` reaches `coyote_time`
    Exclusive,
}

/// Falling tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityProfile {
    /// Terminal vertical velocity under normal gravity (negative pulls down)
    pub max_force: f32,
    /// How fast the fall speed builds up
    pub acceleration: f32,
    /// Largest vertical velocity change per step
    pub max_acceleration: f32,
    /// Grace window after walking off a ledge, in seconds
    pub coyote_time: f32,
    /// Gravity factor over coyote progress, range [0, 1]
    pub coyote_remap: RemapCurve,
    #[serde(default)]
    pub coyote_boundary: CoyoteBoundary,
}

impl GravityProfile {
    fn validate(&self) -> Result<(), ProfileError> {
        if !self.max_force.is_finite() {
            return Err(ProfileError::InvalidValue {
                profile: "gravity",
                field: "max_force",
                value: self.max_force,
            });
        }
        non_negative("gravity", "acceleration", self.acceleration)?;
        non_negative("gravity", "max_acceleration", self.max_acceleration)?;
        non_negative("gravity", "coyote_time", self.coyote_time)
    }
}

/// Jump tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpProfile {
    /// Initial vertical velocity of a jump
    pub impulse_force: f32,
    /// How fast the jump force decays
    pub deceleration: f32,
    /// Largest velocity change the jump may apply per step
    pub max_deceleration: f32,
    /// Deceleration factor over jump progress, range [0, 1]
    pub deceleration_curve: RemapCurve,
    /// Together with `impulse_force`, sets how long a jump lasts
    pub height: f32,
    /// How long an early jump request is remembered, in seconds
    pub buffer_time: f32,
    /// Share of the jump force kept after bouncing off a ceiling
    pub bounciness: f32,
}

impl JumpProfile {
    /// Seconds from jump start until the jump force is released
    pub fn duration(&self) -> f32 {
        self.height / self.impulse_force
    }

    fn validate(&self) -> Result<(), ProfileError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.height) || !positive(self.impulse_force) {
            return Err(ProfileError::InvalidJumpDuration {
                height: self.height,
                impulse_force: self.impulse_force,
            });
        }
        non_negative("jump", "deceleration", self.deceleration)?;
        non_negative("jump", "max_deceleration", self.max_deceleration)?;
        non_negative("jump", "buffer_time", self.buffer_time)?;
        non_negative("jump", "bounciness", self.bounciness)
    }
}

/// Which movement profile a controller is currently using
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    Ground,
    Sprint,
    Air,
}

/// The full tuning set for a controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerProfiles {
    pub ground: MovementProfile,
    pub sprint: MovementProfile,
    pub air: MovementProfile,
    pub gravity: GravityProfile,
    pub jump: JumpProfile,
}

impl Default for ControllerProfiles {
    fn default() -> Self {
        let turn_boost =
            RemapCurve::new(vec![(-1.0, 2.0), (0.0, 1.0), (1.0, 1.0)]).unwrap_or_default();

        Self {
            ground: MovementProfile {
                max_speed: 6.0,
                acceleration: 60.0,
                max_acceleration: 3.0,
                acceleration_remap: turn_boost.clone(),
            },
            sprint: MovementProfile {
                max_speed: 10.0,
                acceleration: 70.0,
                max_acceleration: 3.0,
                acceleration_remap: turn_boost,
            },
            air: MovementProfile {
                max_speed: 6.0,
                acceleration: 25.0,
                max_acceleration: 1.5,
                acceleration_remap: RemapCurve::constant(1.0),
            },
            gravity: GravityProfile {
                max_force: -20.0,
                acceleration: 60.0,
                max_acceleration: 2.0,
                coyote_time: 0.12,
                coyote_remap: RemapCurve::linear(0.0, 0.2, 1.0, 1.0)
                    .unwrap_or_default(),
                coyote_boundary: CoyoteBoundary::Inclusive,
            },
            jump: JumpProfile {
                impulse_force: 12.0,
                deceleration: 30.0,
                max_deceleration: 3.0,
                deceleration_curve: RemapCurve::linear(0.0, 0.5, 1.0, 1.5)
                    .unwrap_or_default(),
                height: 4.8,
                buffer_time: 0.15,
                bounciness: 0.5,
            },
        }
    }
}

impl ControllerProfiles {
    /// Parse and validate profiles from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        let profiles: Self = toml::from_str(content)?;
        profiles.validate()?;
        Ok(profiles)
    }

    /// Read, parse and validate a profile file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ProfileError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&content)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.ground.validate("ground")?;
        self.sprint.validate("sprint")?;
        self.air.validate("air")?;
        self.gravity.validate()?;
        self.jump.validate()
    }

    pub fn movement(&self, kind: ProfileKind) -> &MovementProfile {
        match kind {
            ProfileKind::Ground => &self.ground,
            ProfileKind::Sprint => &self.sprint,
            ProfileKind::Air => &self.air,
        }
    }
}

fn non_negative(profile: &'static str, field: &'static str, value: f32) -> Result<(), ProfileError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidValue {
            profile,
            field,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED_PROFILES: &str = include_str!("../../../../config/controller.toml");

    #[test]
    fn test_default_profiles_are_valid() {
        let profiles = ControllerProfiles::default();
        assert!(profiles.validate().is_ok());
        assert!((profiles.jump.duration() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_shipped_profiles_parse() {
        let profiles = ControllerProfiles::from_toml_str(SHIPPED_PROFILES).unwrap();
        assert!(profiles.gravity.max_force < 0.0);
        assert!(profiles.sprint.max_speed > profiles.ground.max_speed);
        assert_eq!(profiles.gravity.coyote_boundary, CoyoteBoundary::Inclusive);
        assert!(profiles.jump.duration() > 0.0);
    }

    #[test]
    fn test_jump_duration_follows_fields() {
        let mut jump = ControllerProfiles::default().jump;
        jump.height = 3.0;
        jump.impulse_force = 6.0;
        assert_eq!(jump.duration(), 0.5);
        jump.impulse_force = 12.0;
        assert_eq!(jump.duration(), 0.25);
    }

    #[test]
    fn test_zero_jump_duration_is_rejected() {
        let mut profiles = ControllerProfiles::default();
        profiles.jump.height = 0.0;
        assert!(matches!(
            profiles.validate(),
            Err(ProfileError::InvalidJumpDuration { .. })
        ));

        profiles.jump.height = 2.0;
        profiles.jump.impulse_force = -1.0;
        assert!(matches!(
            profiles.validate(),
            Err(ProfileError::InvalidJumpDuration { .. })
        ));
    }

    #[test]
    fn test_negative_speed_is_rejected() {
        let mut profiles = ControllerProfiles::default();
        profiles.air.max_speed = -1.0;
        match profiles.validate() {
            Err(ProfileError::InvalidValue { profile, field, .. }) => {
                assert_eq!(profile, "air");
                assert_eq!(field, "max_speed");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unsorted_curve_fails_to_parse() {
        let broken = SHIPPED_PROFILES.replace(
            "acceleration_remap = [[-1.0, 2.0], [0.0, 1.0], [1.0, 1.0]]",
            "acceleration_remap = [[1.0, 2.0], [0.0, 1.0]]",
        );
        assert_ne!(broken, SHIPPED_PROFILES);
        assert!(matches!(
            ControllerProfiles::from_toml_str(&broken),
            Err(ProfileError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = ControllerProfiles::load("/nonexistent/controller.toml");
        assert!(matches!(result, Err(ProfileError::Io(_, _))));
    }

    #[test]
    fn test_movement_lookup() {
        let profiles = ControllerProfiles::default();
        assert_eq!(
            profiles.movement(ProfileKind::Sprint).max_speed,
            profiles.sprint.max_speed
        );
        assert_eq!(profiles.movement(ProfileKind::Air).max_speed, profiles.air.max_speed);
    }
}
