//! Part poses along the airframe.
//!
//! The longitudinal axis is +X with the tail at `x = 0` and the nose tip at
//! `x = body_length + nose_length`. Solids are modelled with their own axis
//! along +Y (body, nose) or in the XY plane spanning +Y (wings, fins), and
//! the poses below bring them into airframe coordinates.

use std::f64::consts::FRAC_PI_2;

use crate::math::{Pose, Vec3};
use crate::params::SurfaceGroup;

/// Poses for a four-fold ring, ordered 0°, 90°, 180°, 270° about the body axis.
pub type Ring = [Pose; SurfaceGroup::COUNT];

/// Body cylinder (centered on its own origin, axis +Y).
///
/// Rotating +Y onto -X and shifting by half the length puts the tail face at
/// `x = 0` and the forward face at `x = body_length`.
pub fn body_pose(body_length: f64) -> Pose {
    Pose::new(
        Vec3::new(body_length / 2.0, 0.0, 0.0),
        Vec3::z_axis(),
        FRAC_PI_2,
    )
}

/// Nose solid (apex at local `y = 0`, base at `y = nose_length`).
///
/// After the pose the apex is at the front and the base sits on the body's
/// forward face.
pub fn nose_pose(body_length: f64, nose_length: f64) -> Pose {
    Pose::new(
        Vec3::new(body_length + nose_length, 0.0, 0.0),
        Vec3::z_axis(),
        FRAC_PI_2,
    )
}

/// Axial station of a group's root trailing corner (its local origin).
pub fn axial_station(body_length: f64, nose_length: f64, group: &SurfaceGroup) -> f64 {
    body_length + nose_length - group.root_chord - group.offset
}

/// Four copies of a plate, each rolled `k * 90°` about the body axis and
/// pushed out to the body wall.
pub fn ring(body_length: f64, nose_length: f64, diameter: f64, group: &SurfaceGroup) -> Ring {
    let x = axial_station(body_length, nose_length, group);
    let r = diameter / 2.0;
    std::array::from_fn(|k| {
        let angle = k as f64 * FRAC_PI_2;
        // Exact unit offsets keep the four placements symmetric.
        let (sin, cos) = [(0.0, 1.0), (1.0, 0.0), (0.0, -1.0), (-1.0, 0.0)][k];
        Pose::new(Vec3::new(x, r * cos, r * sin), Vec3::x_axis(), angle)
    })
}

/// All poses for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Placements {
    pub body: Pose,
    pub nose: Pose,
    pub wings: Ring,
    pub fins: Ring,
}

/// Plan every pose from overall dimensions. Inputs are in scaled units.
pub fn plan_positions(
    body_length: f64,
    nose_length: f64,
    diameter: f64,
    wing: &SurfaceGroup,
    fin: &SurfaceGroup,
) -> Placements {
    Placements {
        body: body_pose(body_length),
        nose: nose_pose(body_length, nose_length),
        wings: ring(body_length, nose_length, diameter, wing),
        fins: ring(body_length, nose_length, diameter, fin),
    }
}
