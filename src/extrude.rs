//! Solid construction on the vcad kernel.
//!
//! Flat plates are sketch profiles pushed through `Solid::extrude`. Solids of
//! revolution are stacks of kernel cones (one frustum per profile span),
//! built along the kernel's Z axis and then turned so their axis is local +Y.

use vcad_kernel::vcad_kernel_sketch::{SketchError, SketchProfile, SketchSegment};
use vcad_kernel::Solid;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vec3, EPSILON};
use crate::mesh::Geometry;
use crate::outline::Outline;

/// Default plate thickness for wings and fins, in scaled units.
pub const DEFAULT_THICKNESS: f64 = 0.75;

/// Tessellation hint for plates. They have no curved faces, so it is unused.
const PLATE_SEGMENTS: u32 = 3;

fn sketch_error(err: SketchError) -> GeometryError {
    GeometryError::DegenerateOutline(err.to_string())
}

/// Kernel axis (+Z) onto local +Y.
fn z_to_y(solid: Solid) -> Solid {
    solid.rotate(-90.0, 0.0, 0.0)
}

/// Closed line-segment sketch of an outline in the XY plane, wound
/// counter-clockwise seen from +Z.
pub fn sketch_profile(outline: &Outline) -> Result<SketchProfile> {
    let mut ring: Vec<Point2> = outline.vertices().to_vec();
    if !outline.is_ccw() {
        ring.reverse();
    }
    let n = ring.len();
    let segments = (0..n)
        .map(|i| SketchSegment::Line {
            start: ring[i],
            end: ring[(i + 1) % n],
        })
        .collect();
    SketchProfile::new(Point3::origin(), Vec3::x(), Vec3::y(), segments).map_err(sketch_error)
}

/// Extrude an outline along +Z into a flat-capped prism.
///
/// The bottom cap lies at `z = 0`, the top cap at `z = thickness`. No bevels.
pub fn extrude_flat(outline: &Outline, thickness: f64) -> Result<Geometry> {
    if !thickness.is_finite() || thickness <= 0.0 {
        return Err(GeometryError::invalid("thickness", thickness));
    }
    let profile = sketch_profile(outline)?;
    let solid =
        Solid::extrude(profile, Vec3::new(0.0, 0.0, thickness)).map_err(sketch_error)?;
    Ok(Geometry::new(solid, PLATE_SEGMENTS))
}

/// Revolve a profile of `(radius, height)` points a full turn around the
/// local Y axis.
///
/// Each span between neighbouring points becomes one kernel frustum; a span
/// ending on the axis becomes a pointed cone. Neighbouring frustums share a
/// cap of equal radius, so the stack is watertight.
pub fn revolve(profile: &[Point2], radial_segments: u32) -> Result<Geometry> {
    if profile.len() < 2 {
        return Err(GeometryError::invalid("profile", format!("{} points", profile.len())));
    }
    if radial_segments < 3 {
        return Err(GeometryError::invalid("radial_segments", radial_segments));
    }
    for p in profile {
        if !p.x.is_finite() || !p.y.is_finite() || p.x < 0.0 {
            return Err(GeometryError::invalid("profile", format!("({}, {})", p.x, p.y)));
        }
    }
    if profile.iter().all(|p| p.x <= EPSILON) {
        return Err(GeometryError::DegenerateOutline(
            "profile lies on the axis".into(),
        ));
    }

    let mut pieces = Vec::with_capacity(profile.len() - 1);
    for pair in profile.windows(2) {
        let (lo, hi) = if pair[0].y <= pair[1].y {
            (pair[0], pair[1])
        } else {
            (pair[1], pair[0])
        };
        let height = hi.y - lo.y;
        if height <= EPSILON {
            return Err(GeometryError::DegenerateOutline(format!(
                "profile span at height {} has no length",
                lo.y
            )));
        }
        if lo.x <= EPSILON && hi.x <= EPSILON {
            continue;
        }
        // Kernel cones narrow towards +Z; a widening span is built upside down.
        let band = if lo.x >= hi.x {
            Solid::cone(lo.x, hi.x, height, radial_segments).translate(0.0, 0.0, lo.y)
        } else {
            Solid::cone(hi.x, lo.x, height, radial_segments)
                .rotate(180.0, 0.0, 0.0)
                .translate(0.0, 0.0, hi.y)
        };
        pieces.push(z_to_y(band));
    }

    Ok(Geometry::stacked(pieces, radial_segments))
}

/// Closed cylinder of `radius` and `height`, centered on the origin along Y.
pub fn cylinder(radius: f64, height: f64, radial_segments: u32) -> Result<Geometry> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeometryError::invalid("radius", radius));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(GeometryError::invalid("height", height));
    }
    if radial_segments < 3 {
        return Err(GeometryError::invalid("radial_segments", radial_segments));
    }
    let solid = Solid::cylinder(radius, height, radial_segments).translate(0.0, 0.0, -height / 2.0);
    Ok(Geometry::new(z_to_y(solid), radial_segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{bounding_box, is_closed, points, signed_volume};
    use crate::outline::{fin_outline_style_a, wing_outline};
    use crate::profile::ogive_profile;
    use std::f64::consts::PI;

    #[test]
    fn test_extrude_wing_is_closed_prism() {
        let wing = wing_outline(30.0, 20.0, 15.0).unwrap();
        let mesh = extrude_flat(&wing, DEFAULT_THICKNESS).unwrap().to_mesh();
        // 2 triangles per cap + 2 per side
        assert_eq!(mesh.num_triangles(), 12);
        assert!(is_closed(&mesh));
        let volume = 375.0 * DEFAULT_THICKNESS;
        assert!((signed_volume(&mesh) - volume).abs() < 1e-3);

        let (min, max) = bounding_box(&mesh).unwrap();
        assert!(min.z.abs() < 1e-6);
        assert!((max.z - DEFAULT_THICKNESS).abs() < 1e-6);
    }

    #[test]
    fn test_extrude_clockwise_outline_keeps_outward_winding() {
        let cw = Outline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 0.0),
        ])
        .unwrap();
        let mesh = extrude_flat(&cw, 2.0).unwrap().to_mesh();
        assert!(is_closed(&mesh));
        assert!((signed_volume(&mesh) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_extrude_swept_fin() {
        let fin = fin_outline_style_a(40.0, 20.0, 30.0, 35.0).unwrap();
        let mesh = extrude_flat(&fin, 1.0).unwrap().to_mesh();
        assert!(is_closed(&mesh));
        assert!((signed_volume(&mesh) - fin.signed_area().abs()).abs() < 1e-2);
    }

    #[test]
    fn test_extrude_rejects_bad_thickness() {
        let wing = wing_outline(3.0, 2.0, 1.0).unwrap();
        assert!(extrude_flat(&wing, 0.0).is_err());
        assert!(extrude_flat(&wing, f64::INFINITY).is_err());
    }

    #[test]
    fn test_revolve_ogive_nose() {
        let profile = ogive_profile(10.0, 50.0, 50).unwrap();
        let nose = revolve(&profile, 64).unwrap();
        assert_eq!(nose.pieces().len(), 50);

        let mesh = nose.to_mesh();
        assert!(is_closed(&mesh));
        assert!(signed_volume(&mesh) > 0.0);

        let (min, max) = bounding_box(&mesh).unwrap();
        assert!((max.y - 50.0).abs() < 1e-4);
        assert!(min.y.abs() < 1e-4);
        assert!((max.z - 10.0).abs() < 1e-4);
        assert!((min.x + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_revolved_apex_is_on_axis() {
        let profile = ogive_profile(10.0, 50.0, 20).unwrap();
        let mesh = revolve(&profile, 32).unwrap().to_mesh();
        let lowest = points(&mesh)
            .filter(|p| p.y.abs() < 1e-4)
            .map(|p| (p.x * p.x + p.z * p.z).sqrt())
            .fold(0.0, f64::max);
        assert!(lowest < 1e-4, "apex ring has radius {lowest}");
    }

    #[test]
    fn test_triangle_count_scales_with_segments() {
        let coarse = revolve(&ogive_profile(1.0, 2.0, 10).unwrap(), 16).unwrap();
        let fine = revolve(&ogive_profile(1.0, 2.0, 20).unwrap(), 16).unwrap();
        // Each extra frustum adds a 2n side band and two n-triangle caps.
        let extra = fine.to_mesh().num_triangles() - coarse.to_mesh().num_triangles();
        assert_eq!(extra, 10 * 4 * 16);
    }

    #[test]
    fn test_cylinder_dimensions_and_volume() {
        let mesh = cylinder(10.0, 250.0, 32).unwrap().to_mesh();
        assert!(is_closed(&mesh));
        let (min, max) = bounding_box(&mesh).unwrap();
        assert!((min.y + 125.0).abs() < 1e-4);
        assert!((max.y - 125.0).abs() < 1e-4);
        assert!((max.z - 10.0).abs() < 1e-4);

        // Inscribed 32-gon prism
        let polygon_area = 0.5 * 32.0 * 100.0 * (2.0 * PI / 32.0).sin();
        let expected = polygon_area * 250.0;
        assert!((signed_volume(&mesh) - expected).abs() < 1e-5 * expected);
    }

    #[test]
    fn test_revolve_rejects_axis_only_profile() {
        let profile = [Point2::new(0.0, 0.0), Point2::new(0.0, 1.0)];
        assert!(matches!(
            revolve(&profile, 8),
            Err(GeometryError::DegenerateOutline(_))
        ));
        assert!(revolve(&[Point2::new(1.0, 0.0)], 8).is_err());
        assert!(revolve(&[Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)], 2).is_err());
        assert!(revolve(&[Point2::new(1.0, 1.0), Point2::new(2.0, 1.0)], 8).is_err());
    }
}
