//! Ogive nose silhouette.

use crate::error::{GeometryError, Result};
use crate::math::Point2;

/// Default sample count for the nose profile.
pub const DEFAULT_SEGMENTS: usize = 50;

/// Sample a tangent-ogive silhouette as `segments + 1` points.
///
/// For `t = i / segments` the point is `(radius * sqrt(1 - (t - 1)^2), t * length)`.
/// The curve starts on the axis at `y = 0` (the apex) and reaches `radius` at
/// `y = length`, so a revolve around the Y axis gives the point at the low end
/// and the body seam at the high end.
pub fn ogive_profile(radius: f64, length: f64, segments: usize) -> Result<Vec<Point2>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeometryError::invalid("radius", radius));
    }
    if !length.is_finite() || length <= 0.0 {
        return Err(GeometryError::invalid("nose_length", length));
    }
    if segments == 0 {
        return Err(GeometryError::invalid("nose_segments", segments));
    }

    let points = (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            // Clamp keeps the last sample on the seam despite rounding.
            let x = radius * (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt();
            Point2::new(x, t * length)
        })
        .collect();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_length_and_endpoints() {
        let pts = ogive_profile(10.0, 50.0, DEFAULT_SEGMENTS).unwrap();
        assert_eq!(pts.len(), 51);
        assert_eq!(pts[0], Point2::new(0.0, 0.0));
        let last = pts[50];
        assert!((last.x - 10.0).abs() < 1e-12);
        assert!((last.y - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_profile_is_monotonic() {
        let pts = ogive_profile(3.0, 7.0, 20).unwrap();
        for w in pts.windows(2) {
            assert!(w[1].x >= w[0].x);
            assert!(w[1].y > w[0].y);
        }
    }

    #[test]
    fn test_profile_midpoint() {
        let pts = ogive_profile(2.0, 4.0, 2).unwrap();
        // t = 0.5 -> sqrt(1 - 0.25)
        assert!((pts[1].x - 2.0 * 0.75_f64.sqrt()).abs() < 1e-12);
        assert!((pts[1].y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_profile_is_deterministic() {
        assert_eq!(
            ogive_profile(5.0, 12.0, 33).unwrap(),
            ogive_profile(5.0, 12.0, 33).unwrap()
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            ogive_profile(0.0, 1.0, 10),
            Err(GeometryError::InvalidParameter { name: "radius", .. })
        ));
        assert!(matches!(
            ogive_profile(1.0, f64::NAN, 10),
            Err(GeometryError::InvalidParameter { name: "nose_length", .. })
        ));
        assert!(ogive_profile(1.0, 1.0, 0).is_err());
    }
}
