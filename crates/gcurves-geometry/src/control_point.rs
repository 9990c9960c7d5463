//! Weighted control point.

use gcurves_math::{Homo4, Point3};
use serde::{Deserialize, Serialize};

/// A single curve control point: a 3D position plus a rational weight.
///
/// The weight only influences evaluation under the rational B-spline scheme;
/// it is stored unconditionally so switching schemes never loses data. Weights
/// ≤ 0 are storable but degrade B-spline evaluation (see the interpolation
/// engine's zero-weight handling).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Point3,
    pub weight: f64,
}

impl ControlPoint {
    pub fn new(position: Point3, weight: f64) -> Self {
        Self { position, weight }
    }

    /// The homogeneous form (position × weight, weight), used internally by
    /// rational B-spline blending. Never exposed at the curve's public
    /// boundary.
    pub(crate) fn homogeneous(&self) -> Homo4 {
        Homo4::new(
            self.position.x * self.weight,
            self.position.y * self.weight,
            self.position.z * self.weight,
            self.weight,
        )
    }
}

impl Default for ControlPoint {
    fn default() -> Self {
        Self {
            position: Point3::ZERO,
            weight: 1.0,
        }
    }
}
