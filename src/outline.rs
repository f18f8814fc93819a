//! Planar outlines for wings and fins.
//!
//! Every outline lies in the XY plane with the root chord on the X axis and
//! the span along +Y. The polygon closes implicitly from the last vertex back
//! to the first.

use crate::error::{GeometryError, Result};
use crate::math::{Point2, EPSILON};

/// Sweep angle (degrees) at which the style-A fin has no leading-edge offset.
pub const REFERENCE_SWEEP_DEG: f64 = 16.54;

/// A closed, simple, convex polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    vertices: Vec<Point2>,
}

impl Outline {
    /// Build an outline from its vertices.
    ///
    /// Consecutive coincident vertices (including last-to-first) are merged.
    ///
    /// # Errors
    ///
    /// `DegenerateOutline` if fewer than three distinct vertices remain, the
    /// enclosed area is zero, two edges cross, or the polygon is not convex.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        let mut vertices: Vec<Point2> = Vec::with_capacity(points.len());
        for p in points {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(GeometryError::DegenerateOutline(format!(
                    "non-finite vertex ({}, {})",
                    p.x, p.y
                )));
            }
            if vertices.last().map_or(true, |q| (p - *q).norm() > EPSILON) {
                vertices.push(p);
            }
        }
        while vertices.len() > 1 && (vertices[0] - vertices[vertices.len() - 1]).norm() <= EPSILON {
            vertices.pop();
        }

        if vertices.len() < 3 {
            return Err(GeometryError::DegenerateOutline(format!(
                "only {} distinct vertices",
                vertices.len()
            )));
        }

        let outline = Self { vertices };
        if outline.signed_area().abs() <= EPSILON {
            return Err(GeometryError::DegenerateOutline("zero area".into()));
        }
        if let Some((i, j)) = outline.crossing_edges() {
            return Err(GeometryError::DegenerateOutline(format!(
                "edges {i} and {j} intersect"
            )));
        }
        if !outline.is_convex() {
            return Err(GeometryError::DegenerateOutline("outline is not convex".into()));
        }
        Ok(outline)
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Shoelace area; positive when the vertices run counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            / 2.0
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    fn crossing_edges(&self) -> Option<(usize, usize)> {
        let n = self.vertices.len();
        for i in 0..n {
            for j in (i + 2)..n {
                // First and last edge share a vertex.
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (a, b) = (self.vertices[i], self.vertices[(i + 1) % n]);
                let (c, d) = (self.vertices[j], self.vertices[(j + 1) % n]);
                if segments_intersect(a, b, c, d) {
                    return Some((i, j));
                }
            }
        }
        None
    }

    fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        let sign = self.signed_area().signum();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let c = self.vertices[(i + 2) % n];
            cross(a, b, c) * sign >= -EPSILON
        })
    }
}

fn cross(o: Point2, a: Point2, b: Point2) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn on_segment(a: Point2, b: Point2, p: Point2) -> bool {
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

fn segments_intersect(a: Point2, b: Point2, c: Point2, d: Point2) -> bool {
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > EPSILON && d2 < -EPSILON) || (d1 < -EPSILON && d2 > EPSILON))
        && ((d3 > EPSILON && d4 < -EPSILON) || (d3 < -EPSILON && d4 > EPSILON))
    {
        return true;
    }
    (d1.abs() <= EPSILON && on_segment(c, d, a))
        || (d2.abs() <= EPSILON && on_segment(c, d, b))
        || (d3.abs() <= EPSILON && on_segment(a, b, c))
        || (d4.abs() <= EPSILON && on_segment(a, b, d))
}

fn check_length(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GeometryError::invalid(name, value));
    }
    Ok(())
}

fn check_sweep(sweep_deg: f64) -> Result<()> {
    if !sweep_deg.is_finite() || sweep_deg.abs() >= 90.0 {
        return Err(GeometryError::invalid("sweep_angle_deg", sweep_deg));
    }
    Ok(())
}

fn trapezoid(root_chord: f64, tip_chord: f64, span: f64) -> Result<Outline> {
    check_length("root_chord", root_chord)?;
    check_length("tip_chord", tip_chord)?;
    check_length("span", span)?;
    Outline::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(root_chord, 0.0),
        Point2::new(tip_chord, span),
        Point2::new(0.0, span),
    ])
}

/// Unswept wing: `(0,0), (root,0), (tip,span), (0,span)`.
pub fn wing_outline(root_chord: f64, tip_chord: f64, span: f64) -> Result<Outline> {
    trapezoid(root_chord, tip_chord, span)
}

/// Swept fin whose leading edge is offset by `span * Δ`, where
/// `Δ = tan(sweep) - tan(REFERENCE_SWEEP_DEG)`.
pub fn fin_outline_style_a(
    root_chord: f64,
    tip_chord: f64,
    span: f64,
    sweep_deg: f64,
) -> Result<Outline> {
    check_length("root_chord", root_chord)?;
    check_length("tip_chord", tip_chord)?;
    check_length("span", span)?;
    check_sweep(sweep_deg)?;

    let delta = sweep_deg.to_radians().tan() - REFERENCE_SWEEP_DEG.to_radians().tan();
    let shift = span * delta;
    Outline::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(root_chord, 0.0),
        Point2::new(tip_chord - shift, span),
        Point2::new(-shift, span),
    ])
}

/// Unswept fin. `sweep_deg` is validated but does not change the shape.
pub fn fin_outline_style_b(
    root_chord: f64,
    tip_chord: f64,
    span: f64,
    sweep_deg: f64,
) -> Result<Outline> {
    check_sweep(sweep_deg)?;
    trapezoid(root_chord, tip_chord, span)
}
