//! Nearest-point-on-curve projection engine.
//!
//! Two-stage approximate projection: pick the segment adjacent to the nearest
//! control point, then bisection-refine within it. The segment choice assumes
//! the globally nearest segment touches the globally nearest control point,
//! which is exact for polylines and generally good for splines, but not
//! guaranteed for Catmull-Rom curves with large overshoot. This is accepted
//! approximate behavior, not a bug.

use gcurves_core::Tolerance;
use gcurves_math::Point3;

use crate::curve::Curve;
use crate::interpolate;

/// Hard cap on bisection iterations; guarantees termination.
pub const MAX_REFINE_ITERS: usize = 32;

/// The consecutive index pair `(i0, i1)` of the segment most likely to
/// contain the point of the curve nearest to `query`: the segment between
/// the nearest control point and its closer neighbor. `None` for curves
/// with fewer than 2 points.
pub fn nearest_segment(curve: &Curve, query: Point3) -> Option<(usize, usize)> {
    let points = curve.points();
    let n = points.len();
    if n < 2 {
        return None;
    }
    let idx = curve.nearest_point(query)?;

    let neighbor = if idx == 0 {
        1
    } else if idx == n - 1 {
        n - 2
    } else {
        let d_prev = points[idx - 1].position.distance_squared(query);
        let d_next = points[idx + 1].position.distance_squared(query);
        if d_prev < d_next {
            idx - 1
        } else {
            idx + 1
        }
    };

    Some((idx.min(neighbor), idx.max(neighbor)))
}

/// The point on `curve` closest to `query` (approximate, see module docs).
///
/// Degenerate cases: an empty curve returns `query` unchanged, a one-point
/// curve returns that point.
pub fn project(curve: &Curve, query: Point3) -> Point3 {
    let points = curve.points();
    match points.len() {
        0 => return query,
        1 => return points[0].position,
        _ => {}
    }
    let Some((i0, i1)) = nearest_segment(curve, query) else {
        return query;
    };
    let kind = curve.kind();
    let tol = Tolerance::default();

    // Bisection refinement over the local parameter bracket [t0, t1],
    // with cached endpoint squared distances.
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let mut p0 = interpolate::segment_point(points, kind, i0, i1, t0);
    let mut p1 = interpolate::segment_point(points, kind, i0, i1, t1);
    let mut d0 = p0.distance_squared(query);
    let mut d1 = p1.distance_squared(query);

    for _ in 0..MAX_REFINE_ITERS {
        let tm = 0.5 * (t0 + t1);
        let pm = interpolate::segment_point(points, kind, i0, i1, tm);
        let dm = pm.distance_squared(query);

        if (d0 - d1).abs() < tol.projection_sq {
            // Endpoint distances have converged; the minimum sits between
            // them, so take the midpoint when it is the better point.
            if dm < d0 && dm < d1 {
                return pm;
            }
            break;
        }

        // Midpoint worse than both ends: the nearest point is one of the
        // current bracket endpoints.
        if dm > d0 && dm > d1 {
            break;
        }
        if d0 > d1 {
            t0 = tm;
            p0 = pm;
            d0 = dm;
        } else {
            t1 = tm;
            p1 = pm;
            d1 = dm;
        }
    }

    if d0 < d1 {
        p0
    } else {
        p1
    }
}

/// Squared distance from `query` to its projection on `curve`.
pub fn distance_sq(curve: &Curve, query: Point3) -> f64 {
    project(curve, query).distance_squared(query)
}

/// Distance from `query` to its projection on `curve`.
pub fn distance(curve: &Curve, query: Point3) -> f64 {
    distance_sq(curve, query).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveKind;
    use approx::assert_relative_eq;
    use gcurves_math::DVec3;

    fn l_shape(kind: CurveKind) -> Curve {
        let mut curve = Curve::new(kind);
        curve.add_point(DVec3::new(0.0, 0.0, 0.0), 1.0);
        curve.add_point(DVec3::new(1.0, 0.0, 0.0), 1.0);
        curve.add_point(DVec3::new(1.0, 1.0, 0.0), 1.0);
        curve
    }

    #[test]
    fn test_project_empty_returns_query() {
        let curve = Curve::new(CurveKind::Linear);
        let q = DVec3::new(3.0, 4.0, 5.0);
        assert_eq!(project(&curve, q), q);
    }

    #[test]
    fn test_project_single_point_returns_it() {
        let mut curve = Curve::new(CurveKind::Linear);
        curve.add_point(DVec3::new(1.0, 2.0, 3.0), 1.0);
        assert_eq!(
            project(&curve, DVec3::new(-10.0, 0.0, 0.0)),
            DVec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_project_point_on_segment_returns_it() {
        let curve = l_shape(CurveKind::Linear);
        let q = DVec3::new(0.25, 0.0, 0.0);
        let p = project(&curve, q);
        assert_relative_eq!(p.x, q.x, epsilon = 1e-3);
        assert_relative_eq!(p.y, q.y, epsilon = 1e-3);
    }

    #[test]
    fn test_project_off_segment_lands_on_it() {
        let curve = l_shape(CurveKind::Linear);
        let p = project(&curve, DVec3::new(0.5, 0.3, 0.0));
        assert_relative_eq!(p.x, 0.5, epsilon = 1e-2);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_project_never_worse_than_segment_endpoints() {
        for kind in [CurveKind::Linear, CurveKind::CatmullRom, CurveKind::BSpline] {
            let curve = l_shape(kind);
            let q = DVec3::new(0.7, 0.4, 0.2);
            let (i0, i1) = nearest_segment(&curve, q).unwrap();
            let d = distance_sq(&curve, q);
            let d0 = curve.points()[i0].position.distance_squared(q);
            let d1 = curve.points()[i1].position.distance_squared(q);
            assert!(d <= d0 + 1e-12);
            assert!(d <= d1 + 1e-12);
        }
    }

    #[test]
    fn test_nearest_segment_reorders_indices() {
        let curve = l_shape(CurveKind::Linear);
        // Nearest control point is the last one; its only neighbor precedes it.
        let seg = nearest_segment(&curve, DVec3::new(1.0, 2.0, 0.0));
        assert_eq!(seg, Some((1, 2)));
    }

    #[test]
    fn test_nearest_segment_too_few_points() {
        let mut curve = Curve::new(CurveKind::Linear);
        assert_eq!(nearest_segment(&curve, DVec3::ZERO), None);
        curve.add_point(DVec3::ZERO, 1.0);
        assert_eq!(nearest_segment(&curve, DVec3::ZERO), None);
    }

    #[test]
    fn test_distance_wrappers() {
        let curve = l_shape(CurveKind::Linear);
        let q = DVec3::new(0.5, 2.0, 0.0);
        let dsq = distance_sq(&curve, q);
        let d = distance(&curve, q);
        assert_relative_eq!(d * d, dsq, epsilon = 1e-12);
        // Closest polyline point is the corner (1,1,0), sqrt(1.25) away.
        assert!(d >= 1.25_f64.sqrt() - 1e-6);
        assert!(d < 1.2);
    }
}
