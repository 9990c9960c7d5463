//! The curve data model: ordered weighted control points, a blending-scheme
//! tag, and a lazily cached control-point bounding box.

use gcurves_core::traits::BoundingBox;
use gcurves_core::Tolerance;
use gcurves_math::{Aabb3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::control_point::ControlPoint;
use crate::{interpolate, project};

/// Blending scheme used to evaluate a curve. Changing the scheme never alters
/// the stored control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurveKind {
    /// Piecewise linear through every control point.
    Linear,
    /// Catmull-Rom (Hermite-style) cubic through every control point.
    #[default]
    CatmullRom,
    /// Uniform rational cubic B-spline; weights pull the curve toward points.
    BSpline,
}

impl CurveKind {
    /// The literal used for this scheme in the GCURVES text format.
    pub fn name(self) -> &'static str {
        match self {
            CurveKind::Linear => "polyline",
            CurveKind::CatmullRom => "hermite",
            CurveKind::BSpline => "bspline",
        }
    }

    /// Parse a GCURVES text-format literal.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "polyline" => Some(CurveKind::Linear),
            "hermite" => Some(CurveKind::CatmullRom),
            "bspline" => Some(CurveKind::BSpline),
            _ => None,
        }
    }
}

/// A parametric curve over an ordered sequence of weighted control points.
///
/// Insertion order is the parametrization order: index 0 is the start of the
/// curve, the last index its end. Duplicate points are legal.
///
/// The control-point bounding box is cached and invalidated by every point
/// mutation; the cache is not safe for concurrent mutate/query, so each curve
/// must have a single writer at a time. Concurrent readers should go through
/// [`Curve::calc_bbox`] or the [`BoundingBox`] trait, which never touch the
/// cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Curve {
    points: Vec<ControlPoint>,
    kind: CurveKind,
    #[serde(skip)]
    bounds: Option<Aabb3>,
}

impl Curve {
    pub fn new(kind: CurveKind) -> Self {
        Self {
            points: Vec::new(),
            kind,
            bounds: None,
        }
    }

    pub fn from_points(kind: CurveKind, points: Vec<ControlPoint>) -> Self {
        Self {
            points,
            kind,
            bounds: None,
        }
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: CurveKind) {
        self.kind = kind;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.bounds = None;
    }

    /// Append a control point at the end of the curve.
    pub fn add_point(&mut self, position: Point3, weight: f64) {
        self.points.push(ControlPoint::new(position, weight));
        self.bounds = None;
    }

    /// Insert an already-interpolated point at the break of its nearest
    /// segment, preserving along-curve ordering. Returns the new point's
    /// index. The inserted point gets weight 1.
    ///
    /// Used when projecting a click onto the curve interior: the caller
    /// projects first, then inserts the projected position.
    pub fn insert_point(&mut self, position: Point3) -> usize {
        let idx = match project::nearest_segment(self, position) {
            Some((i0, _)) => i0 + 1,
            None => self.points.len(),
        };
        self.points.insert(idx, ControlPoint::new(position, 1.0));
        self.bounds = None;
        idx
    }

    /// Remove the point at `idx`. Out-of-range indices are a no-op failure.
    pub fn remove_point(&mut self, idx: usize) -> bool {
        if idx >= self.points.len() {
            return false;
        }
        self.points.remove(idx);
        self.bounds = None;
        true
    }

    /// Move the point at `idx` to a new position, keeping its weight.
    pub fn move_point(&mut self, idx: usize, position: Point3) -> bool {
        let Some(cp) = self.points.get_mut(idx) else {
            return false;
        };
        cp.position = position;
        self.bounds = None;
        true
    }

    /// Replace both position and weight of the point at `idx`.
    pub fn set_point(&mut self, idx: usize, position: Point3, weight: f64) -> bool {
        let Some(cp) = self.points.get_mut(idx) else {
            return false;
        };
        *cp = ControlPoint::new(position, weight);
        self.bounds = None;
        true
    }

    /// Change only the weight of the point at `idx`. Weights do not affect
    /// the control-point bounding box, so the cache stays valid.
    pub fn set_weight(&mut self, idx: usize, weight: f64) -> bool {
        let Some(cp) = self.points.get_mut(idx) else {
            return false;
        };
        cp.weight = weight;
        true
    }

    pub fn control_point(&self, idx: usize) -> Option<&ControlPoint> {
        self.points.get(idx)
    }

    pub fn point(&self, idx: usize) -> Option<Point3> {
        self.points.get(idx).map(|cp| cp.position)
    }

    pub fn weight(&self, idx: usize) -> Option<f64> {
        self.points.get(idx).map(|cp| cp.weight)
    }

    /// Index of the stored control point closest to `query`, ties broken by
    /// the lowest index. `None` on an empty curve.
    pub fn nearest_point(&self, query: Point3) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, cp) in self.points.iter().enumerate() {
            let d = cp.position.distance_squared(query);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// The cached control-point bounding box, recomputed if a mutation
    /// invalidated it. Recomputation is a side effect of this accessor only.
    pub fn bbox(&mut self) -> Option<Aabb3> {
        if self.bounds.is_none() {
            self.bounds = self.calc_bbox();
        }
        self.bounds
    }

    /// Recompute the control-point bounding box from scratch, bypassing and
    /// leaving the cache untouched.
    pub fn calc_bbox(&self) -> Option<Aabb3> {
        let positions: Vec<Point3> = self.points.iter().map(|cp| cp.position).collect();
        Aabb3::from_points(&positions)
    }

    /// Rescale and offset all control points in place so their bounding box
    /// becomes the unit cube centered at the origin (half-extent 0.5 per
    /// axis). Axes with zero extent keep scale 1 to avoid dividing by zero.
    pub fn normalize(&mut self) {
        let Some(bbox) = self.calc_bbox() else {
            return;
        };
        let tol = Tolerance::default();
        let center = bbox.center();
        let ext = bbox.extents();
        let scale = Vector3::new(
            if tol.is_zero(ext.x) { 1.0 } else { 1.0 / ext.x },
            if tol.is_zero(ext.y) { 1.0 } else { 1.0 / ext.y },
            if tol.is_zero(ext.z) { 1.0 } else { 1.0 / ext.z },
        );
        for cp in &mut self.points {
            cp.position = (cp.position - center) * scale;
        }
        self.bounds = None;
    }

    /// Evaluate the curve at global parameter `t` ∈ [0, 1] under its own
    /// blending scheme.
    pub fn point_at(&self, t: f64) -> Point3 {
        interpolate::point_at(&self.points, self.kind, t)
    }

    /// Evaluate under a different blending scheme without changing the
    /// stored one.
    pub fn point_at_with(&self, kind: CurveKind, t: f64) -> Point3 {
        interpolate::point_at(&self.points, kind, t)
    }

    /// Closest point on the curve to `query` (approximate, see the
    /// projection engine).
    pub fn project(&self, query: Point3) -> Point3 {
        project::project(self, query)
    }

    pub fn distance(&self, query: Point3) -> f64 {
        project::distance(self, query)
    }

    pub fn distance_sq(&self, query: Point3) -> f64 {
        project::distance_sq(self, query)
    }
}

impl BoundingBox for Curve {
    type Output = Aabb3;

    fn bounding_box(&self) -> Option<Aabb3> {
        self.calc_bbox()
    }
}
