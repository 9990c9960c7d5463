//! Curve interpolation engine.
//!
//! Pure functions mapping a parameter to a point on a curve, given its
//! control points and blending scheme. The homogeneous-coordinate weight
//! trick for rational B-splines lives entirely inside this module.

use gcurves_math::{Homo4, Point3};

use crate::control_point::ControlPoint;
use crate::curve::CurveKind;

/// Evaluate a curve at global parameter `t` ∈ [0, 1] (out-of-range clamps).
///
/// An empty point list evaluates to the origin, a single point to itself.
pub fn point_at(points: &[ControlPoint], kind: CurveKind, t: f64) -> Point3 {
    let n = points.len();
    if n == 0 {
        return Point3::ZERO;
    }
    if n == 1 {
        return points[0].position;
    }

    let t = t.clamp(0.0, 1.0);
    let segs = (n - 1) as f64;
    let i0 = ((t * segs).floor() as usize).min(n - 2);
    let i1 = i0 + 1;

    // Renormalize t within the segment's [i0/segs, i1/segs] span.
    let t0 = i0 as f64 / segs;
    let t1 = i1 as f64 / segs;
    let local = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);

    segment_point(points, kind, i0, i1, local)
}

/// Evaluate the single segment between consecutive indices `i0` and `i1` at
/// local parameter `t` ∈ [0, 1].
///
/// This is the reusable unit behind whole-curve evaluation; the projection
/// engine calls it directly to refine within one segment without going
/// through the global-parameter mapping. The spline schemes gather one
/// neighbor on each side, clamped at the sequence boundary, so duplicate
/// control points are legal and no segment-length division ever occurs.
pub fn segment_point(
    points: &[ControlPoint],
    kind: CurveKind,
    i0: usize,
    i1: usize,
    t: f64,
) -> Point3 {
    let n = points.len();
    debug_assert!(i0 < n && i1 < n && i0 + 1 == i1);
    let t = t.clamp(0.0, 1.0);

    let prev = if i0 == 0 { i0 } else { i0 - 1 };
    let next = if i1 + 1 >= n { i1 } else { i1 + 1 };

    match kind {
        CurveKind::Linear => points[i0].position.lerp(points[i1].position, t),
        // A spline needs at least 3 points to have meaningful neighbors.
        _ if n <= 2 => points[i0].position.lerp(points[i1].position, t),
        CurveKind::CatmullRom => catmull_rom(
            points[prev].position,
            points[i0].position,
            points[i1].position,
            points[next].position,
            t,
        ),
        CurveKind::BSpline => {
            let r = bspline(
                points[prev].homogeneous(),
                points[i0].homogeneous(),
                points[i1].homogeneous(),
                points[next].homogeneous(),
                t,
            );
            if r.w != 0.0 {
                r.truncate() / r.w
            } else {
                // Degenerate homogeneous weight: return the undivided blend
                // rather than producing NaN.
                r.truncate()
            }
        }
    }
}

/// Standard 4-point Catmull-Rom blend; the curve passes through `p1` at t=0
/// and `p2` at t=1, with tangents derived from `p0` and `p3`.
pub fn catmull_rom(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64) -> Point3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * (p1 - p2) + p3 - p0) * t3)
}

/// Uniform cubic B-spline basis applied to homogeneous 4-vectors.
pub fn bspline(p0: Homo4, p1: Homo4, p2: Homo4, p3: Homo4, t: f64) -> Homo4 {
    let t2 = t * t;
    let t3 = t2 * t;
    let b0 = (1.0 - t) * (1.0 - t) * (1.0 - t) / 6.0;
    let b1 = (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0;
    let b2 = (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0;
    let b3 = t3 / 6.0;
    p0 * b0 + p1 * b1 + p2 * b2 + p3 * b3
}
