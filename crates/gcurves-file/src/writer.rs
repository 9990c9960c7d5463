//! GCURVES format writer.

use std::io::Write;

use gcurves_core::Result;
use gcurves_geometry::Curve;

/// Write a curve set in the GCURVES text format.
///
/// Emits the `GCURVES` magic, then one `curve { ... }` block per curve with
/// every control point on its own `cp x y z w` line. Floats use shortest
/// round-trip formatting, so a written file reloads to bit-identical values.
pub fn write_curves<W: Write>(mut out: W, curves: &[Curve]) -> Result<()> {
    writeln!(out, "GCURVES")?;
    for curve in curves {
        write_curve(&mut out, curve)?;
    }
    Ok(())
}

fn write_curve<W: Write>(out: &mut W, curve: &Curve) -> Result<()> {
    writeln!(out, "curve {{")?;
    writeln!(out, "    type {}", curve.kind().name())?;
    writeln!(out, "    cpcount {}", curve.len())?;
    for cp in curve.points() {
        let p = cp.position;
        writeln!(out, "    cp {} {} {} {}", p.x, p.y, p.z, cp.weight)?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcurves_geometry::CurveKind;
    use gcurves_math::DVec3;

    #[test]
    fn test_written_layout() {
        let mut curve = Curve::new(CurveKind::Linear);
        curve.add_point(DVec3::new(0.0, 0.0, 0.0), 1.0);
        curve.add_point(DVec3::new(1.0, 0.5, 0.0), 2.0);

        let mut buf = Vec::new();
        write_curves(&mut buf, &[curve]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let expected = "GCURVES\n\
            curve {\n\
            \x20   type polyline\n\
            \x20   cpcount 2\n\
            \x20   cp 0 0 0 1\n\
            \x20   cp 1 0.5 0 2\n\
            }\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_set_writes_magic_only() {
        let mut buf = Vec::new();
        write_curves(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "GCURVES\n");
    }
}
