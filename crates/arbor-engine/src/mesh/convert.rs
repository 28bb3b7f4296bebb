use crate::coords::Vec3;
use crate::geometry::Triangle;
use crate::mesh::RawMesh;

/// Converts a builder mesh into engine vertices and triangles.
///
/// Faces with more than three vertices are fanned from their first vertex;
/// walking the fan in circular order keeps the pieces from overlapping.
/// Vertex Y and Z are swapped (builders are Z-up, the engine is Y-up) and
/// `fixup_offset` is added after the swap. Faces with fewer than three
/// vertices are dropped.
pub fn convert_raw_mesh(raw: &RawMesh, fixup_offset: Vec3) -> (Vec<Vec3>, Vec<Triangle>) {
    let vertices = raw
        .vertices
        .iter()
        .map(|v| swap_yz(*v) + fixup_offset)
        .collect();

    let mut triangles = Vec::with_capacity(raw.faces.len());
    for face in &raw.faces {
        if face.len() < 3 {
            continue;
        }
        for i in 1..face.len() - 1 {
            triangles.push([face[0], face[i], face[i + 1]]);
        }
    }

    (vertices, triangles)
}

/// Swaps a point between the builder's Z-up and the engine's Y-up frames.
#[inline]
pub fn swap_yz(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, v.y)
}
