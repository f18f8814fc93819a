//! STL export of assemblies and single parts.
//!
//! Meshes come straight from the kernel tessellation (flat `f32` vertex and
//! `u32` index buffers); errors are vcad's own `CadError`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use vcad::CadError;
use vcad_kernel::vcad_kernel_tessellate::TriangleMesh;

use crate::assembler::{Assembly, Part};

fn triangle(mesh: &TriangleMesh, tri: &[u32]) -> [[f32; 3]; 3] {
    [0, 1, 2].map(|k| {
        let i = tri[k] as usize * 3;
        [mesh.vertices[i], mesh.vertices[i + 1], mesh.vertices[i + 2]]
    })
}

fn unit_normal([v0, v1, v2]: &[[f32; 3]; 3]) -> [f32; 3] {
    let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
    let n = [
        e1[1] * e2[2] - e1[2] * e2[1],
        e1[2] * e2[0] - e1[0] * e2[2],
        e1[0] * e2[1] - e1[1] * e2[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-10 {
        n.map(|c| c / len)
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Encode a mesh as binary STL.
pub fn to_stl(mesh: &TriangleMesh, name: &str) -> Result<Vec<u8>, CadError> {
    let count = mesh.num_triangles();
    if count == 0 {
        return Err(CadError::EmptyGeometry);
    }
    let mut buf = Vec::with_capacity(84 + count * 50);

    let mut header = [0u8; 80];
    let label = name.as_bytes();
    let len = label.len().min(80);
    header[..len].copy_from_slice(&label[..len]);
    buf.extend_from_slice(&header);
    buf.extend_from_slice(&(count as u32).to_le_bytes());

    for tri in mesh.indices.chunks_exact(3) {
        let corners = triangle(mesh, tri);
        for c in unit_normal(&corners) {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        for v in corners {
            for c in v {
                buf.extend_from_slice(&c.to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }
    Ok(buf)
}

/// Write a mesh as ASCII STL.
pub fn write_ascii(mesh: &TriangleMesh, name: &str, out: &mut impl Write) -> Result<(), CadError> {
    if mesh.num_triangles() == 0 {
        return Err(CadError::EmptyGeometry);
    }
    writeln!(out, "solid {name}")?;
    for tri in mesh.indices.chunks_exact(3) {
        let corners = triangle(mesh, tri);
        let [nx, ny, nz] = unit_normal(&corners);
        writeln!(out, "  facet normal {nx:e} {ny:e} {nz:e}")?;
        writeln!(out, "    outer loop")?;
        for [x, y, z] in corners {
            writeln!(out, "      vertex {x:e} {y:e} {z:e}")?;
        }
        writeln!(out, "    endloop")?;
        writeln!(out, "  endfacet")?;
    }
    writeln!(out, "endsolid {name}")?;
    Ok(())
}

/// Write the whole assembly, in viewport coordinates, as binary STL.
pub fn write_stl(assembly: &Assembly, path: impl AsRef<Path>) -> Result<(), CadError> {
    let bytes = to_stl(&assembly.world_mesh(), "airframe")?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Write the whole assembly, in viewport coordinates, as ASCII STL.
pub fn write_stl_ascii(assembly: &Assembly, path: impl AsRef<Path>) -> Result<(), CadError> {
    let mesh = assembly.world_mesh();
    let mut out = BufWriter::new(File::create(path)?);
    write_ascii(&mesh, "airframe", &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write one part, in viewport coordinates.
pub fn write_part_stl(
    assembly: &Assembly,
    part: &Part,
    path: impl AsRef<Path>,
    ascii: bool,
) -> Result<(), CadError> {
    let mesh = assembly.part_mesh(part);
    let name = part.name();
    if ascii {
        let mut out = BufWriter::new(File::create(path)?);
        write_ascii(&mesh, &name, &mut out)?;
        out.flush()?;
    } else {
        std::fs::write(path, to_stl(&mesh, &name)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{assemble, PartKind};
    use crate::extrude::extrude_flat;
    use crate::outline::wing_outline;
    use crate::params::{BuildSettings, DesignParameters, RawInputs};

    fn plate() -> TriangleMesh {
        extrude_flat(&wing_outline(3.0, 2.0, 1.0).unwrap(), 0.5)
            .unwrap()
            .to_mesh()
    }

    fn read_f32(bytes: &[u8], at: usize) -> f32 {
        f32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn test_binary_layout() {
        let mesh = plate();
        let bytes = to_stl(&mesh, "plate").unwrap();
        assert_eq!(bytes.len(), 84 + 50 * mesh.num_triangles());
        assert_eq!(&bytes[..5], b"plate");
        let count = u32::from_le_bytes(bytes[80..84].try_into().unwrap());
        assert_eq!(count as usize, mesh.num_triangles());

        // First facet: unit normal, then the three corners as stored.
        let n = [read_f32(&bytes, 84), read_f32(&bytes, 88), read_f32(&bytes, 92)];
        assert!(((n[0] * n[0] + n[1] * n[1] + n[2] * n[2]) - 1.0).abs() < 1e-5);
        let first = mesh.indices[0] as usize * 3;
        assert_eq!(read_f32(&bytes, 96), mesh.vertices[first]);
    }

    #[test]
    fn test_ascii_layout() {
        let mesh = plate();
        let mut out = Vec::new();
        write_ascii(&mesh, "plate", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("solid plate\n"));
        assert!(text.trim_end().ends_with("endsolid plate"));
        assert_eq!(text.matches("facet normal").count(), mesh.num_triangles());
        assert_eq!(text.matches("vertex").count(), 3 * mesh.num_triangles());
    }

    #[test]
    fn test_empty_geometry_rejected() {
        assert!(matches!(
            to_stl(&TriangleMesh::new(), "x"),
            Err(CadError::EmptyGeometry)
        ));
        assert!(matches!(
            write_stl(&Assembly::empty(), std::env::temp_dir().join("airframe-empty.stl")),
            Err(CadError::EmptyGeometry)
        ));
    }

    #[test]
    fn test_write_assembly_file() {
        let params = DesignParameters::from_raw(&RawInputs::default()).unwrap();
        let assembly = assemble(&params, &BuildSettings::default()).unwrap();
        let path = std::env::temp_dir().join(format!("airframe-{}.stl", std::process::id()));
        write_stl(&assembly, &path).unwrap();
        let size = std::fs::metadata(&path).unwrap().len() as usize;
        assert_eq!(size, 84 + 50 * assembly.world_mesh().num_triangles());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_single_part_ascii() {
        let params = DesignParameters::from_raw(&RawInputs::default()).unwrap();
        let assembly = assemble(&params, &BuildSettings::default()).unwrap();
        let fin = assembly.parts_of(PartKind::Fin).nth(2).unwrap();
        let path = std::env::temp_dir().join(format!("airframe-fin-{}.stl", std::process::id()));
        write_part_stl(&assembly, fin, &path, true).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("solid fin_2\n"));
        std::fs::remove_file(&path).unwrap();
    }
}
