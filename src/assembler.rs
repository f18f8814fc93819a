//! Rocket assembler. Builds the full part list for one configuration.
//!
//! Body and nose are solids of revolution, wings and fins are extruded
//! plates arranged in two four-fold rings. The whole set is rebuilt on every
//! call; nothing is cached between assemblies.

use std::fmt;

use vcad_kernel::vcad_kernel_tessellate::TriangleMesh;

use crate::error::{GeometryError, Result};
use crate::extrude::{cylinder, extrude_flat, revolve};
use crate::math::{Point2, Point3, Pose, Vec3, EPSILON};
use crate::mesh::{self, Geometry};
use crate::outline::{self, Outline};
use crate::params::{BuildSettings, DesignParameters, SurfaceGroup};
use crate::placement::{self, Ring};
use crate::profile::ogive_profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Body,
    Nose,
    Wing,
    Fin,
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PartKind::Body => "body",
            PartKind::Nose => "nose",
            PartKind::Wing => "wing",
            PartKind::Fin => "fin",
        })
    }
}

/// The 2D input a solid was generated from.
#[derive(Debug, Clone, PartialEq)]
pub enum PartShape {
    Cylinder { radius: f64, height: f64 },
    Profile(Vec<Point2>),
    Outline(Outline),
}

/// RGB material color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const BODY: Color = Color(0x00ccff);
    pub const NOSE: Color = Color(0x0077be);
    pub const WING: Color = Color(0x999999);
    pub const FIN: Color = Color(0x666666);

    pub fn rgb(&self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }
}

/// One positioned piece of the airframe.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub kind: PartKind,
    /// Position within its ring (0..4); always 0 for body and nose.
    pub index: usize,
    pub shape: PartShape,
    /// Kernel geometry in the part's local frame.
    pub geometry: Geometry,
    pub pose: Pose,
    pub color: Color,
}

impl Part {
    pub fn name(&self) -> String {
        match self.kind {
            PartKind::Body | PartKind::Nose => self.kind.to_string(),
            PartKind::Wing | PartKind::Fin => format!("{}_{}", self.kind, self.index),
        }
    }

    /// Roll about the body axis, in degrees within `[0, 360)`.
    pub fn roll_deg(&self) -> f64 {
        let (roll, _, _) = self.pose.rotation.euler_angles();
        roll.to_degrees().rem_euclid(360.0)
    }
}

/// A complete, positioned rocket.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub parts: Vec<Part>,
    /// Applied after every part pose so the model is centered on the origin.
    pub recenter_offset: Vec3,
}

impl Assembly {
    pub fn empty() -> Self {
        Self {
            parts: Vec::new(),
            recenter_offset: Vec3::zeros(),
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts_of(&self, kind: PartKind) -> impl Iterator<Item = &Part> {
        self.parts.iter().filter(move |p| p.kind == kind)
    }

    pub fn part(&self, kind: PartKind) -> Option<&Part> {
        self.parts_of(kind).next()
    }

    /// Full transform of a part: its pose followed by the recentering offset.
    pub fn world_pose(&self, part: &Part) -> Pose {
        part.pose.then_translate(self.recenter_offset)
    }

    /// A part's geometry in viewport coordinates.
    pub fn world_geometry(&self, part: &Part) -> Geometry {
        part.geometry.placed(&self.world_pose(part))
    }

    /// A part tessellated in viewport coordinates.
    pub fn part_mesh(&self, part: &Part) -> TriangleMesh {
        self.world_geometry(part).to_mesh()
    }

    /// Every part merged into one mesh in viewport coordinates.
    pub fn world_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        for part in &self.parts {
            mesh.merge(&self.part_mesh(part));
        }
        mesh
    }

    pub fn bounding_box(&self) -> Option<(Point3, Point3)> {
        mesh::bounding_box(&self.world_mesh())
    }
}

/// Build the assembly for `params` (design units) using `settings`.
///
/// # Errors
///
/// `InvalidGeometry` when the body length is negative, `InvalidParameter`
/// naming `wing.offset` or `fin.offset` when a group's root would leave the
/// airframe, or any outline or solid error from the parts. A failure aborts
/// the whole build.
pub fn assemble(params: &DesignParameters, settings: &BuildSettings) -> Result<Assembly> {
    params.validate()?;
    check_root_on_airframe("wing.offset", params, &params.wing)?;
    check_root_on_airframe("fin.offset", params, &params.fin)?;
    if !settings.scale.is_finite() || settings.scale <= 0.0 {
        return Err(GeometryError::invalid("scale", settings.scale));
    }
    let p = params.scaled(settings.scale);
    let radius = p.radius();

    log::debug!(
        "RocketAssembler.assemble | mode='{}' body={:.2} nose={:.2} radius={:.2}",
        p.mode,
        p.body_length,
        p.nose_length,
        radius
    );

    let plan = placement::plan_positions(p.body_length, p.nose_length, p.diameter, &p.wing, &p.fin);
    let mut parts = Vec::with_capacity(2 + 2 * SurfaceGroup::COUNT);

    if p.body_length > 0.0 {
        parts.push(Part {
            kind: PartKind::Body,
            index: 0,
            shape: PartShape::Cylinder {
                radius,
                height: p.body_length,
            },
            geometry: cylinder(radius, p.body_length, settings.radial_segments)?,
            pose: plan.body,
            color: Color::BODY,
        });
    } else {
        log::debug!("RocketAssembler.assemble | zero body length, body omitted");
    }

    if p.nose_length > 0.0 {
        let profile = ogive_profile(radius, p.nose_length, settings.nose_segments)?;
        let geometry = revolve(&profile, settings.radial_segments)?;
        parts.push(Part {
            kind: PartKind::Nose,
            index: 0,
            shape: PartShape::Profile(profile),
            geometry,
            pose: plan.nose,
            color: Color::NOSE,
        });
    } else {
        log::debug!("RocketAssembler.assemble | zero nose length, nose omitted");
    }

    let wing = outline::wing_outline(p.wing.root_chord, p.wing.tip_chord, p.wing.span)?;
    push_ring(&mut parts, PartKind::Wing, &wing, &plan.wings, settings, Color::WING)?;

    let fin = p
        .fin_style
        .outline(p.fin.root_chord, p.fin.tip_chord, p.fin.span, p.sweep_angle_deg)?;
    push_ring(&mut parts, PartKind::Fin, &fin, &plan.fins, settings, Color::FIN)?;

    let assembly = Assembly {
        parts,
        recenter_offset: Vec3::new(-(p.body_length + p.nose_length) / 2.0, 0.0, 0.0),
    };
    log::debug!(
        "RocketAssembler.assemble | {} parts, offset={:.2}",
        assembly.len(),
        assembly.recenter_offset.x
    );
    Ok(assembly)
}

/// The root chord must lie between the tail (`x = 0`) and the nose tip.
fn check_root_on_airframe(
    name: &'static str,
    params: &DesignParameters,
    group: &SurfaceGroup,
) -> Result<()> {
    let trailing = placement::axial_station(params.body_length, params.nose_length, group);
    if group.offset < 0.0 || trailing < -EPSILON {
        log::debug!(
            "RocketAssembler.assemble | {name}={:.2} puts the root at x={:.2}..{:.2}",
            group.offset,
            trailing,
            trailing + group.root_chord
        );
        return Err(GeometryError::invalid(name, group.offset));
    }
    Ok(())
}

fn push_ring(
    parts: &mut Vec<Part>,
    kind: PartKind,
    outline: &Outline,
    ring: &Ring,
    settings: &BuildSettings,
    color: Color,
) -> Result<()> {
    let geometry = extrude_flat(outline, settings.plate_thickness)?;
    for (index, pose) in ring.iter().enumerate() {
        parts.push(Part {
            kind,
            index,
            shape: PartShape::Outline(outline.clone()),
            geometry: geometry.clone(),
            pose: *pose,
            color,
        });
    }
    Ok(())
}
