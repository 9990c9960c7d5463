//! gcurves geometry: the weighted-control-point curve model, interpolation,
//! and nearest-point projection.

pub mod control_point;
pub mod curve;
pub mod interpolate;
pub mod project;

pub use control_point::ControlPoint;
pub use curve::{Curve, CurveKind};
