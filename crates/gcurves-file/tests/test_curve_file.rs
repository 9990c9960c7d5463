// Integration tests for the GCURVES codec: real files, full round-trips.

use gcurves_file::{load_curves, read_curves, save_curves};
use gcurves_geometry::{Curve, CurveKind};
use gcurves_math::DVec3;

fn sample_set() -> Vec<Curve> {
    let mut polyline = Curve::new(CurveKind::Linear);
    polyline.add_point(DVec3::new(0.0, 0.0, 0.0), 1.0);
    polyline.add_point(DVec3::new(1.0, 0.0, 0.0), 1.0);
    polyline.add_point(DVec3::new(1.0, 1.0, 0.0), 1.0);

    let mut spline = Curve::new(CurveKind::BSpline);
    spline.add_point(DVec3::new(-0.25, 3.5, 1.0), 0.5);
    spline.add_point(DVec3::new(2.0, -7.125, 0.0), 2.0);
    spline.add_point(DVec3::new(0.1, 0.2, 0.3), 1.0);
    spline.add_point(DVec3::new(1e-9, 1e9, -4.0), 1.0);

    vec![polyline, spline]
}

#[test]
fn integration_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.curves");

    let original = sample_set();
    save_curves(&path, &original).unwrap();
    let loaded = load_curves(&path).unwrap();

    assert_eq!(loaded.len(), original.len());
    for (a, b) in original.iter().zip(&loaded) {
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.points().iter().zip(b.points()) {
            // Shortest round-trip float formatting reloads exact values.
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.weight, pb.weight);
        }
    }
}

#[test]
fn integration_round_trip_preserves_evaluation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eval.curves");

    let original = sample_set();
    save_curves(&path, &original).unwrap();
    let loaded = load_curves(&path).unwrap();

    for (a, b) in original.iter().zip(&loaded) {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_eq!(a.point_at(t), b.point_at(t));
        }
    }
}

#[test]
fn integration_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_curves(dir.path().join("does_not_exist.curves")).is_err());
}

#[test]
fn integration_read_from_stream() {
    let text = "GCURVES\ncurve { type hermite cpcount 1 cp 1 2 3 4 }\n";
    let curves = read_curves(text.as_bytes()).unwrap();
    assert_eq!(curves.len(), 1);
    assert_eq!(curves[0].kind(), CurveKind::CatmullRom);
    assert_eq!(curves[0].point(0), Some(DVec3::new(1.0, 2.0, 3.0)));
    assert_eq!(curves[0].weight(0), Some(4.0));
}

#[test]
fn integration_hand_edited_file_with_bad_block() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edited.curves");
    std::fs::write(
        &path,
        "GCURVES\n\
         curve {\n    type bspline\n    cpcount 2\n    cp 0 0 0 1\n    cp 1 1 1 1\n}\n\
         curve {\n    type wiggly\n    cp 9 9 9 9\n}\n\
         curve {\n    type polyline\n    cpcount 1\n    cp 5 5 5 1\n}\n",
    )
    .unwrap();

    let curves = load_curves(&path).unwrap();
    assert_eq!(curves.len(), 2);
    assert_eq!(curves[0].kind(), CurveKind::BSpline);
    assert_eq!(curves[1].kind(), CurveKind::Linear);
}
