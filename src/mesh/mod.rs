//! Mesh generation for hex terrain chunks
//!
//! Produces engine-agnostic triangle data from the cells of a chunk.

pub mod colors;
mod edge;
mod triangulate;

pub use colors::{lerp_color, CellColor};
pub use edge::EdgeVertices;
pub use triangulate::Triangulator;

use glam::Vec3;

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - Godot: Convert to `ArrayMesh`
/// - wgpu: Use directly as vertex buffers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions (3D coordinates)
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals (area-weighted average of the incident faces)
    pub normals: Vec<[f32; 3]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over triangles as position triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                Vec3::from(self.positions[tri[0] as usize]),
                Vec3::from(self.positions[tri[1] as usize]),
                Vec3::from(self.positions[tri[2] as usize]),
            ]
        })
    }

    /// Append a triangle with its own three vertices
    pub fn push_triangle(&mut self, vertices: [Vec3; 3], colors: [CellColor; 3]) {
        let base = self.positions.len() as u32;
        for (v, c) in vertices.iter().zip(colors) {
            self.positions.push(v.to_array());
            self.colors.push(c);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Append a quad as two triangles sharing four vertices
    ///
    /// Vertices are given as `(v1, v2)` along the near edge and `(v3, v4)`
    /// along the far edge.
    pub fn push_quad(&mut self, vertices: [Vec3; 4], colors: [CellColor; 4]) {
        let base = self.positions.len() as u32;
        for (v, c) in vertices.iter().zip(colors) {
            self.positions.push(v.to_array());
            self.colors.push(c);
        }
        self.indices
            .extend_from_slice(&[base, base + 2, base + 1, base + 1, base + 2, base + 3]);
    }

    /// Recompute per-vertex normals from the triangles
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let a = Vec3::from(self.positions[tri[0] as usize]);
            let b = Vec3::from(self.positions[tri[1] as usize]);
            let c = Vec3::from(self.positions[tri[2] as usize]);
            // Unnormalized cross product weights by area.
            let face = (b - a).cross(c - a);
            for &i in tri {
                normals[i as usize] += face;
            }
        }
        self.normals = normals
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: CellColor = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_push_triangle() {
        let mut mesh = MeshData::default();
        mesh.push_triangle([Vec3::ZERO, Vec3::Z, Vec3::X], [RED; 3]);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_push_quad_shares_vertices() {
        let mut mesh = MeshData::default();
        mesh.push_triangle([Vec3::ZERO, Vec3::Z, Vec3::X], [RED; 3]);
        mesh.push_quad([Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::ONE], [RED; 4]);

        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(&mesh.indices[3..], &[3, 5, 4, 4, 5, 6]);
    }

    #[test]
    fn test_normals_face_up_for_clockwise_triangles() {
        // Clockwise when seen from above, the winding used for terrain.
        let mut mesh = MeshData::default();
        mesh.push_triangle([Vec3::ZERO, Vec3::Z, Vec3::X], [RED; 3]);
        mesh.recalculate_normals();

        assert_eq!(mesh.normals.len(), 3);
        for n in &mesh.normals {
            assert!((Vec3::from(*n) - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_triangles_iterator() {
        let mut mesh = MeshData::default();
        mesh.push_quad([Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::ONE], [RED; 4]);
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[0], [Vec3::ZERO, Vec3::Z, Vec3::X]);
    }
}
