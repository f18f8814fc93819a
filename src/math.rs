//! Geometry aliases shared with the vcad kernel and the part pose.

use nalgebra::{Unit, UnitQuaternion};

pub use vcad_kernel::vcad_kernel_math::{Point2, Point3, Vec3};

/// Linear tolerance used for coincidence and area checks.
pub const EPSILON: f64 = 1e-9;

/// Rigid placement of a part: rotate about the local origin, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: UnitQuaternion<f64>,
}

impl Pose {
    pub fn identity() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Rotation of `angle` radians about `axis`, followed by `translation`.
    pub fn new(translation: Vec3, axis: Unit<Vec3>, angle: f64) -> Self {
        Self {
            translation,
            rotation: UnitQuaternion::from_axis_angle(&axis, angle),
        }
    }

    /// This pose followed by a pure translation.
    pub fn then_translate(&self, offset: Vec3) -> Self {
        Self {
            translation: self.translation + offset,
            rotation: self.rotation,
        }
    }

    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.rotation.transform_point(p) + self.translation
    }

    pub fn apply_vector(&self, v: &Vec3) -> Vec3 {
        self.rotation.transform_vector(v)
    }

    /// Move a kernel solid by this pose.
    ///
    /// The quaternion is split into roll, pitch and yaw, which the kernel
    /// applies one axis at a time (X, then Y, then Z).
    pub fn place(&self, solid: &vcad_kernel::Solid) -> vcad_kernel::Solid {
        let (roll, pitch, yaw) = self.rotation.euler_angles();
        let mut placed = solid.clone();
        if roll != 0.0 {
            placed = placed.rotate(roll.to_degrees(), 0.0, 0.0);
        }
        if pitch != 0.0 {
            placed = placed.rotate(0.0, pitch.to_degrees(), 0.0);
        }
        if yaw != 0.0 {
            placed = placed.rotate(0.0, 0.0, yaw.to_degrees());
        }
        let t = self.translation;
        placed.translate(t.x, t.y, t.z)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
