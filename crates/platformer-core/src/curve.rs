//! Piecewise-linear remap curves
//!
//! Profiles use these to shape a response over a normalized input, such as
//! acceleration over velocity alignment or jump deceleration over jump time.

use serde::{Deserialize, Serialize};

/// Errors raised when building a curve from keyframes
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("curve needs at least one keyframe")]
    Empty,

    #[error("keyframe {0} is not finite")]
    NonFinite(usize),

    #[error("keyframe {0} is out of order: times must strictly increase")]
    Unsorted(usize),
}

/// A curve defined by `(time, value)` keyframes, linearly interpolated.
///
/// Evaluation outside the keyed range clamps to the first or last value.
/// Serialized as a list of `[time, value]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f32, f32)>", into = "Vec<(f32, f32)>")]
pub struct RemapCurve {
    keys: Vec<(f32, f32)>,
}

impl RemapCurve {
    /// Build a curve from keyframes sorted by strictly increasing time
    pub fn new(keys: Vec<(f32, f32)>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (i, (t, v)) in keys.iter().enumerate() {
            if !t.is_finite() || !v.is_finite() {
                return Err(CurveError::NonFinite(i));
            }
            if i > 0 && keys[i - 1].0 >= *t {
                return Err(CurveError::Unsorted(i));
            }
        }
        Ok(Self { keys })
    }

    /// A flat curve that always evaluates to `value`
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![(0.0, value)],
        }
    }

    /// A straight line from `(t0, v0)` to `(t1, v1)`; `t0` must be below `t1`
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Result<Self, CurveError> {
        Self::new(vec![(t0, v0), (t1, v1)])
    }

    /// Sample the curve at `t`
    pub fn evaluate(&self, t: f32) -> f32 {
        let (first_t, first_v) = self.keys[0];
        if t <= first_t || self.keys.len() == 1 {
            return first_v;
        }

        for pair in self.keys.windows(2) {
            let (t0, v0) = pair[0];
            let (t1, v1) = pair[1];
            if t <= t1 {
                let alpha = (t - t0) / (t1 - t0);
                return v0 + (v1 - v0) * alpha;
            }
        }

        self.keys[self.keys.len() - 1].1
    }
}

impl Default for RemapCurve {
    fn default() -> Self {
        Self::constant(1.0)
    }
}

impl TryFrom<Vec<(f32, f32)>> for RemapCurve {
    type Error = CurveError;

    fn try_from(keys: Vec<(f32, f32)>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<RemapCurve> for Vec<(f32, f32)> {
    fn from(curve: RemapCurve) -> Self {
        curve.keys
    }
}
