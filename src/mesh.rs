//! Part geometry on top of vcad kernel solids, and checks on the tessellated
//! triangle meshes they produce.
//!
//! The kernel tessellates face by face and stores vertices as `f32`, so a
//! point shared by two faces shows up as separate vertices that agree only
//! to rounding. The checks here weld those copies before looking at edges.

use std::collections::HashMap;

use vcad_kernel::vcad_kernel_tessellate::TriangleMesh;
use vcad_kernel::Solid;

use crate::math::{Point3, Pose, Vec3};

/// Distance below which two tessellated vertices are the same point.
pub const WELD_TOLERANCE: f64 = 1e-3;

/// The kernel solids making up one part.
///
/// Most parts are a single solid. The nose is a stack of frustums whose
/// touching caps cancel out, so the stack still bounds one closed volume.
#[derive(Debug, Clone)]
pub struct Geometry {
    pieces: Vec<Solid>,
    segments: u32,
}

impl Geometry {
    /// A single kernel solid, tessellated with `segments` around curved faces.
    pub fn new(solid: Solid, segments: u32) -> Self {
        Self::stacked(vec![solid], segments)
    }

    pub fn stacked(pieces: Vec<Solid>, segments: u32) -> Self {
        Self { pieces, segments }
    }

    pub fn pieces(&self) -> &[Solid] {
        &self.pieces
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// A copy with every piece moved by `pose`.
    pub fn placed(&self, pose: &Pose) -> Geometry {
        Geometry {
            pieces: self.pieces.iter().map(|s| pose.place(s)).collect(),
            segments: self.segments,
        }
    }

    /// Tessellate every piece into one mesh.
    pub fn to_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        for piece in &self.pieces {
            mesh.merge(&piece.to_mesh(self.segments));
        }
        mesh
    }
}

/// Two geometries are equal when they tessellate to the same mesh.
impl PartialEq for Geometry {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
            && self.pieces.len() == other.pieces.len()
            && self.pieces.iter().zip(&other.pieces).all(|(a, b)| {
                let (a, b) = (a.to_mesh(self.segments), b.to_mesh(self.segments));
                a.vertices == b.vertices && a.indices == b.indices
            })
    }
}

pub fn vertex(mesh: &TriangleMesh, i: u32) -> Point3 {
    let i = i as usize * 3;
    Point3::new(
        mesh.vertices[i] as f64,
        mesh.vertices[i + 1] as f64,
        mesh.vertices[i + 2] as f64,
    )
}

pub fn points(mesh: &TriangleMesh) -> impl Iterator<Item = Point3> + '_ {
    mesh.vertices
        .chunks_exact(3)
        .map(|c| Point3::new(c[0] as f64, c[1] as f64, c[2] as f64))
}

/// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
pub fn bounding_box(mesh: &TriangleMesh) -> Option<(Point3, Point3)> {
    let mut pts = points(mesh);
    let first = pts.next()?;
    Some(pts.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p))))
}

/// Unnormalized facet normal of triangle `i` (length is twice its area).
pub fn facet_normal(mesh: &TriangleMesh, i: usize) -> Vec3 {
    let tri = &mesh.indices[i * 3..i * 3 + 3];
    let (a, b, c) = (
        vertex(mesh, tri[0]),
        vertex(mesh, tri[1]),
        vertex(mesh, tri[2]),
    );
    (b - a).cross(&(c - a))
}

/// Enclosed volume via the divergence theorem. Positive for outward winding.
pub fn signed_volume(mesh: &TriangleMesh) -> f64 {
    mesh.indices
        .chunks_exact(3)
        .map(|tri| {
            let a = vertex(mesh, tri[0]).coords();
            let b = vertex(mesh, tri[1]).coords();
            let c = vertex(mesh, tri[2]).coords();
            a.dot(&b.cross(&c)) / 6.0
        })
        .sum()
}

/// Map every vertex to the first vertex within `tolerance` of it.
pub fn weld(mesh: &TriangleMesh, tolerance: f64) -> Vec<u32> {
    let cell = |p: &Point3| {
        [
            (p.x / tolerance).floor() as i64,
            (p.y / tolerance).floor() as i64,
            (p.z / tolerance).floor() as i64,
        ]
    };
    let mut grid: HashMap<[i64; 3], Vec<u32>> = HashMap::new();
    let mut remap = Vec::with_capacity(mesh.num_vertices());

    for (i, p) in points(mesh).enumerate() {
        let [cx, cy, cz] = cell(&p);
        let mut found = None;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = grid.get(&[cx + dx, cy + dy, cz + dz]) else {
                        continue;
                    };
                    if let Some(&j) = bucket
                        .iter()
                        .find(|&&j| (vertex(mesh, j) - p).norm() <= tolerance)
                    {
                        found = Some(j);
                        break 'search;
                    }
                }
            }
        }
        let id = found.unwrap_or_else(|| {
            grid.entry([cx, cy, cz]).or_default().push(i as u32);
            i as u32
        });
        remap.push(id);
    }
    remap
}

/// True when, after welding, every directed edge is matched by as many
/// opposite edges: the surface is watertight and consistently wound.
///
/// Counting instead of requiring single use lets coincident internal caps
/// (the frustum stack of a nose) cancel each other.
pub fn is_closed(mesh: &TriangleMesh) -> bool {
    if mesh.indices.len() < 3 {
        return false;
    }
    let remap = weld(mesh, WELD_TOLERANCE);
    let mut edges: HashMap<(u32, u32), i64> = HashMap::new();
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [0, 1, 2].map(|k| remap[tri[k] as usize]);
        for (from, to) in [(a, b), (b, c), (c, a)] {
            if from != to {
                *edges.entry((from, to)).or_insert(0) += 1;
            }
        }
    }
    edges
        .iter()
        .all(|(&(a, b), &n)| edges.get(&(b, a)).copied().unwrap_or(0) == n)
}
